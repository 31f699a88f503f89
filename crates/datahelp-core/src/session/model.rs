//! Report session aggregate.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

use super::error_surface::ErrorState;
use crate::country::Country;
use crate::i18n::{MessageKey, Translator};
use crate::preference::DEFAULT_LANGUAGE;
use crate::progress::BuildProgress;
use crate::report::{DateRange, ReportData, SavedReport};

/// Top-level screens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Screen {
    #[default]
    Home,
    Preview,
    Help,
    Settings,
    History,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no report to preview")]
    PreviewUnavailable,
}

impl NavigationError {
    pub fn message_key(&self) -> MessageKey {
        MessageKey::ErrorPreviewUnavailable
    }
}

/// Per-visit state: selections, artifact, progress and UI flags.
///
/// Every user-initiated mutation goes through [`AppSession::user_action`],
/// which clears the error surface. System-initiated updates (progress, build
/// outcome) leave it alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSession {
    screen: Screen,
    selected_country: Option<Country>,
    date_range: Option<DateRange>,
    report: Option<ReportData>,
    progress: BuildProgress,
    is_loading: bool,
    language: String,
    saved_reports: Vec<SavedReport>,
    error: ErrorState,
}

impl Default for AppSession {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, BuildProgress::initial())
    }
}

impl AppSession {
    pub fn new(language: impl Into<String>, progress: BuildProgress) -> Self {
        Self {
            screen: Screen::Home,
            selected_country: None,
            date_range: None,
            report: None,
            progress,
            is_loading: false,
            language: language.into(),
            saved_reports: Vec::new(),
            error: ErrorState::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_country(&self) -> Option<&Country> {
        self.selected_country.as_ref()
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    pub fn report(&self) -> Option<&ReportData> {
        self.report.as_ref()
    }

    pub fn progress(&self) -> &BuildProgress {
        &self.progress
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn saved_reports(&self) -> &[SavedReport] {
        &self.saved_reports
    }

    pub fn error(&self) -> &ErrorState {
        &self.error
    }

    fn user_action(&mut self) {
        self.error.clear();
    }

    pub fn select_country(&mut self, country: Country) {
        self.user_action();
        self.selected_country = Some(country);
    }

    pub fn select_date_range(&mut self, date_range: DateRange) {
        self.user_action();
        self.date_range = Some(date_range);
    }

    /// Clears selections, artifact, progress and loading. Screen is kept.
    pub fn reset_form(&mut self) {
        self.user_action();
        self.selected_country = None;
        self.date_range = None;
        self.report = None;
        self.progress.reset();
        self.is_loading = false;
    }

    /// Loads a saved report's inputs and artifact, then shows the preview.
    pub fn open_saved_report(&mut self, report: &SavedReport) {
        self.user_action();
        self.selected_country = Some(report.country.clone());
        self.date_range = Some(report.date_range.clone());
        self.report = Some(report.report_data.clone());
        self.screen = Screen::Preview;
    }

    /// Switches screens. The error is cleared even when navigation is refused.
    pub fn navigate(&mut self, screen: Screen) -> Result<(), NavigationError> {
        self.user_action();
        if screen == Screen::Preview && self.report.is_none() {
            return Err(NavigationError::PreviewUnavailable);
        }
        self.screen = screen;
        Ok(())
    }

    pub fn dismiss_error(&mut self) {
        self.user_action();
    }

    /// Switches language and relabels the progress steps.
    pub fn set_language(&mut self, code: impl Into<String>, translator: &dyn Translator) {
        self.user_action();
        self.language = code.into();
        self.progress.relabel(translator, &self.language);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error.set(message);
    }

    /// Build accepted: loading on, any previous error gone.
    pub fn begin_build(&mut self, progress: BuildProgress) {
        self.user_action();
        self.progress = progress;
        self.is_loading = true;
    }

    pub fn update_progress(&mut self, progress: BuildProgress) {
        self.progress = progress;
    }

    /// Build succeeded: show the artifact on the preview screen.
    pub fn complete_build(&mut self, report: ReportData) {
        self.report = Some(report);
        self.is_loading = false;
        self.screen = Screen::Preview;
    }

    /// Build failed: loading off, progress back to the initial snapshot,
    /// screen unchanged.
    pub fn fail_build(&mut self, message: Option<String>) {
        self.is_loading = false;
        self.progress.reset();
        if let Some(message) = message {
            self.error.set(message);
        }
    }

    pub fn set_saved_reports(&mut self, reports: Vec<SavedReport>) {
        self.saved_reports = reports;
    }

    pub fn push_saved_report(&mut self, report: SavedReport) {
        self.saved_reports.push(report);
    }

    pub fn remove_saved_report(&mut self, report_id: &str) {
        self.saved_reports.retain(|r| r.id != report_id);
    }
}
