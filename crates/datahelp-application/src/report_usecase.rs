//! Report session use case.
//!
//! `ReportSessionUseCase` owns the session aggregate and the build pipeline,
//! and is the only place where store results, pipeline outcomes and the
//! error surface meet.

use std::sync::Arc;

use datahelp_core::country::Country;
use datahelp_core::download::{
    DownloadError, DownloadFormat, DownloadReceipt, DownloadRequest, ReportDownloader,
};
use datahelp_core::error::{DataHelpError, Result};
use datahelp_core::i18n::{MessageKey, Translator};
use datahelp_core::pipeline::{BuildError, BuildPipeline, StageExecutor};
use datahelp_core::preference::{Language, PreferenceRepository};
use datahelp_core::progress::BuildProgress;
use datahelp_core::report::{DateRange, ReportGenerator, ReportHistoryRepository, SavedReport};
use datahelp_core::session::{AppSession, NavigationError, Screen};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::session::SessionProgressObserver;

/// Use case for one report-building session.
///
/// # Responsibilities
///
/// - Running builds through the pipeline and recording successes in history
/// - Keeping the session's copy of saved reports in sync with the store
/// - Persisting the language preference
/// - Translating every failure into one message on the error surface
///
/// # Thread Safety
///
/// The pipeline sits behind a `Mutex` that is only ever `try_lock`ed: a
/// second build while one is running is rejected, never queued.
pub struct ReportSessionUseCase {
    session: Arc<RwLock<AppSession>>,
    pipeline: Mutex<BuildPipeline>,
    history: Arc<dyn ReportHistoryRepository>,
    preferences: Arc<dyn PreferenceRepository>,
    downloader: Arc<dyn ReportDownloader>,
    translator: Arc<dyn Translator>,
}

impl ReportSessionUseCase {
    pub fn new(
        executor: Arc<dyn StageExecutor>,
        generator: Arc<dyn ReportGenerator>,
        history: Arc<dyn ReportHistoryRepository>,
        preferences: Arc<dyn PreferenceRepository>,
        downloader: Arc<dyn ReportDownloader>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let session = AppSession::default();
        Self {
            session: Arc::new(RwLock::new(session)),
            pipeline: Mutex::new(BuildPipeline::new(executor, generator)),
            history,
            preferences,
            downloader,
            translator,
        }
    }

    /// Restores the language and saved reports from the stores.
    ///
    /// An unreadable history starts the session with an empty list.
    pub async fn bootstrap(&self) {
        let language = self.preferences.get_language().await;
        let saved = match self.history.list().await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("[ReportSessionUseCase] Failed to load history: {}", e);
                Vec::new()
            }
        };
        tracing::info!(
            "[ReportSessionUseCase] Session restored (language: {}, saved reports: {})",
            language,
            saved.len()
        );

        let progress = BuildProgress::localized(self.translator.as_ref(), &language);
        let mut session = AppSession::new(language, progress);
        session.set_saved_reports(saved);
        *self.session.write().await = session;
    }

    /// A copy of the current session state.
    pub async fn snapshot(&self) -> AppSession {
        self.session.read().await.clone()
    }

    pub fn session(&self) -> Arc<RwLock<AppSession>> {
        self.session.clone()
    }

    async fn message(&self, key: MessageKey) -> String {
        let language = self.session.read().await.language().to_string();
        self.translator.message(&language, key)
    }

    async fn show_error(&self, key: MessageKey) {
        let message = self.message(key).await;
        self.session.write().await.show_error(message);
    }

    pub async fn select_country(&self, country: Country) {
        tracing::debug!("[ReportSessionUseCase] Country selected: {}", country.code);
        self.session.write().await.select_country(country);
    }

    pub async fn select_date_range(&self, date_range: DateRange) {
        self.session.write().await.select_date_range(date_range);
    }

    pub async fn reset_form(&self) {
        self.session.write().await.reset_form();
    }

    pub async fn dismiss_error(&self) {
        self.session.write().await.dismiss_error();
    }

    pub async fn navigate(&self, screen: Screen) -> std::result::Result<(), NavigationError> {
        let result = self.session.write().await.navigate(screen);
        if result.is_err() {
            tracing::debug!("[ReportSessionUseCase] Navigation to {} refused", screen);
        }
        result
    }

    /// Runs one build for the current selections.
    ///
    /// On success the report is shown, appended to history and returned. A
    /// history write failure is surfaced but does not undo the build.
    pub async fn build_report(
        &self,
        cancel: &CancellationToken,
    ) -> std::result::Result<SavedReport, BuildError> {
        let Ok(mut pipeline) = self.pipeline.try_lock() else {
            tracing::warn!("[ReportSessionUseCase] Build rejected: another build is running");
            return Err(BuildError::Busy);
        };

        let (country, date_range, language) = {
            let session = self.session.read().await;
            if session.is_loading() {
                return Err(BuildError::Busy);
            }
            (
                session.selected_country().cloned(),
                session.date_range().cloned(),
                session.language().to_string(),
            )
        };

        pipeline.relabel(self.translator.as_ref(), &language);
        let observer = SessionProgressObserver::new(self.session.clone());
        let outcome = pipeline
            .build(country.as_ref(), date_range.as_ref(), &observer, cancel)
            .await;

        let saved = match outcome {
            Ok(saved) => saved,
            Err(e) => {
                self.handle_build_failure(&e, &language).await;
                return Err(e);
            }
        };

        self.session
            .write()
            .await
            .complete_build(saved.report_data.clone());

        match self.history.append(saved.clone()).await {
            Ok(()) => {
                self.session.write().await.push_saved_report(saved.clone());
                tracing::info!("[ReportSessionUseCase] Report {} built and saved", saved.id);
            }
            Err(e) => {
                tracing::error!("[ReportSessionUseCase] Report built but not saved: {}", e);
                let message = self.translator.message(&language, MessageKey::ErrorHistorySave);
                self.session.write().await.show_error(message);
            }
        }

        Ok(saved)
    }

    async fn handle_build_failure(&self, error: &BuildError, language: &str) {
        let message = error
            .message_key()
            .map(|key| self.translator.message(language, key));
        let mut session = self.session.write().await;
        match error {
            BuildError::Validation(_) => {
                if let Some(message) = message {
                    session.show_error(message);
                }
            }
            BuildError::Busy => {}
            _ => session.fail_build(message),
        }
        tracing::info!("[ReportSessionUseCase] Build failed: {}", error);
    }

    /// Exports the report currently shown.
    pub async fn download(
        &self,
        format: DownloadFormat,
    ) -> std::result::Result<DownloadReceipt, DownloadError> {
        let (request, language) = {
            let session = self.session.read().await;
            let request = match (session.selected_country(), session.date_range(), session.report()) {
                (Some(country), Some(date_range), Some(report)) => Some(DownloadRequest {
                    country: country.clone(),
                    date_range: date_range.clone(),
                    report_data: report.clone(),
                    format,
                }),
                _ => None,
            };
            (request, session.language().to_string())
        };

        let Some(request) = request else {
            tracing::warn!("[ReportSessionUseCase] Download requested without a report");
            self.show_error(DownloadError::NoReport.message_key()).await;
            return Err(DownloadError::NoReport);
        };

        match self.downloader.download(&request, &language).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                tracing::error!("[ReportSessionUseCase] Download failed: {}", e);
                self.show_error(e.message_key()).await;
                Err(e)
            }
        }
    }

    /// Validates, persists and applies a UI language.
    pub async fn set_language(&self, code: &str) -> Result<Language> {
        let Some(language) = Language::from_code(code) else {
            self.show_error(MessageKey::ErrorUnsupportedLanguage).await;
            return Err(DataHelpError::config(format!("Unsupported language '{}'", code)));
        };

        if let Err(e) = self.preferences.set_language(language.code()).await {
            tracing::error!("[ReportSessionUseCase] Failed to save language: {}", e);
            self.show_error(MessageKey::ErrorSettingsSave).await;
            return Err(e);
        }

        self.session
            .write()
            .await
            .set_language(language.code(), self.translator.as_ref());
        tracing::info!("[ReportSessionUseCase] Language set to {}", language);
        Ok(language)
    }

    /// Current language code.
    pub async fn language(&self) -> String {
        self.session.read().await.language().to_string()
    }

    /// Translates `key` into the session language.
    pub async fn translate(&self, key: MessageKey) -> String {
        self.message(key).await
    }

    /// Reloads saved reports from the store into the session.
    pub async fn list_history(&self) -> Result<Vec<SavedReport>> {
        let reports = self.history.list().await?;
        self.session
            .write()
            .await
            .set_saved_reports(reports.clone());
        Ok(reports)
    }

    pub async fn search_history(&self, term: &str) -> Result<Vec<SavedReport>> {
        self.history.search(term).await
    }

    /// Shows a saved report without running the pipeline.
    pub async fn open_saved_report(&self, report_id: &str) -> Result<SavedReport> {
        let report = self
            .history
            .list()
            .await?
            .into_iter()
            .find(|r| r.id == report_id)
            .ok_or_else(|| DataHelpError::not_found("report", report_id))?;

        self.session.write().await.open_saved_report(&report);
        tracing::info!("[ReportSessionUseCase] Opened saved report {}", report.id);
        Ok(report)
    }

    /// Deletes one saved report. Unknown IDs are a no-op.
    pub async fn delete_report(&self, report_id: &str) -> Result<bool> {
        match self.history.remove(report_id).await {
            Ok(removed) => {
                if removed {
                    self.session.write().await.remove_saved_report(report_id);
                }
                Ok(removed)
            }
            Err(e) => {
                tracing::error!("[ReportSessionUseCase] Failed to delete report {}: {}", report_id, e);
                self.show_error(MessageKey::ErrorHistoryUpdate).await;
                Err(e)
            }
        }
    }

    pub async fn clear_history(&self) -> Result<()> {
        if let Err(e) = self.history.clear().await {
            tracing::error!("[ReportSessionUseCase] Failed to clear history: {}", e);
            self.show_error(MessageKey::ErrorHistoryUpdate).await;
            return Err(e);
        }
        self.session.write().await.set_saved_reports(Vec::new());
        Ok(())
    }
}
