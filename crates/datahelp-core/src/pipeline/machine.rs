//! The report build state machine.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::executor::{ProgressObserver, StageExecutor};
use super::state::{BuildError, BuildRequest, BuildState};
use crate::country::Country;
use crate::i18n::Translator;
use crate::progress::BuildProgress;
use crate::report::{DateRange, ReportData, ReportGenerator, SavedReport};
use crate::validation::validate_build_request;

/// Drives one report request through the ordered stages.
///
/// ```text
/// Idle ─request─▶ Validating ─ok─▶ Running(0) ─▶ … ─▶ Running(N) ─▶ Succeeded
///                     │                 │                  │
///                     └─invalid─▶ Idle  └──────failure─────┴─▶ Failed
/// ```
///
/// Stages run strictly in sequence. After each one the progress snapshot is
/// handed to the observer and awaited before the next stage starts.
pub struct BuildPipeline {
    executor: Arc<dyn StageExecutor>,
    generator: Arc<dyn ReportGenerator>,
    state: BuildState,
    progress: BuildProgress,
}

impl BuildPipeline {
    pub fn new(executor: Arc<dyn StageExecutor>, generator: Arc<dyn ReportGenerator>) -> Self {
        Self {
            executor,
            generator,
            state: BuildState::Idle,
            progress: BuildProgress::initial(),
        }
    }

    pub fn state(&self) -> &BuildState {
        &self.state
    }

    pub fn progress(&self) -> &BuildProgress {
        &self.progress
    }

    pub fn relabel(&mut self, translator: &dyn Translator, language: &str) {
        self.progress.relabel(translator, language);
    }

    /// Returns to `Idle` with a pristine progress snapshot.
    pub fn reset(&mut self) {
        self.state = BuildState::Idle;
        self.progress.reset();
    }

    /// Validates the inputs and, if admitted, moves to `Running(0)`.
    ///
    /// A rejected request leaves progress untouched and the pipeline `Idle`.
    pub fn begin(
        &mut self,
        country: Option<&Country>,
        date_range: Option<&DateRange>,
    ) -> Result<BuildRequest, BuildError> {
        if !self.state.accepts_request() {
            tracing::warn!(target: "build_pipeline", state = ?self.state, "[BuildPipeline] Rejected request while busy");
            return Err(BuildError::Busy);
        }

        self.state = BuildState::Validating;
        let (country, date_range) = match validate_build_request(country, date_range) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::info!(target: "build_pipeline", error = %e, "[BuildPipeline] Validation failed");
                self.state = BuildState::Idle;
                return Err(e.into());
            }
        };

        self.progress.start();
        self.state = BuildState::Running { stage_index: 0 };

        tracing::info!(
            target: "build_pipeline",
            country = %country.code,
            start = %date_range.start_date,
            end = %date_range.end_date,
            "[BuildPipeline] Build started"
        );

        Ok(BuildRequest {
            country: country.clone(),
            date_range: date_range.clone(),
        })
    }

    /// Runs a full attempt: validation, every stage, then content generation.
    ///
    /// Returns the history record for the new report.
    pub async fn build(
        &mut self,
        country: Option<&Country>,
        date_range: Option<&DateRange>,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Result<SavedReport, BuildError> {
        let request = self.begin(country, date_range)?;
        let span = tracing::info_span!(
            target: "build_pipeline",
            "build",
            country = %request.country.code,
            start = %request.date_range.start_date,
            end = %request.date_range.end_date
        );
        self.drive(&request, observer, cancel).instrument(span).await
    }

    async fn drive(
        &mut self,
        request: &BuildRequest,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Result<SavedReport, BuildError> {
        observer.on_started(&self.progress).await;

        match self.run_stages(request, observer, cancel).await {
            Ok(report) => {
                let saved = SavedReport::new(
                    request.country.clone(),
                    request.date_range.clone(),
                    report.clone(),
                );
                tracing::info!(target: "build_pipeline", report_id = %saved.id, "[BuildPipeline] Build succeeded");
                self.state = BuildState::Succeeded(report);
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!(target: "build_pipeline", error = %e, "[BuildPipeline] Build failed");
                self.progress.reset();
                self.state = BuildState::Failed(e.clone());
                observer.on_progress(&self.progress).await;
                Err(e)
            }
        }
    }

    async fn run_stages(
        &mut self,
        request: &BuildRequest,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> Result<ReportData, BuildError> {
        let executor = Arc::clone(&self.executor);

        for index in 0..self.progress.len() {
            let Some(stage) = self.progress.stage_at(index) else {
                break;
            };
            self.state = BuildState::Running { stage_index: index };
            tracing::debug!(target: "build_pipeline", %stage, index, "[BuildPipeline] Stage started");

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(BuildError::Cancelled),
                result = executor.run_stage(stage, request, cancel) => {
                    result.map_err(|e| BuildError::Stage { stage, message: e.to_string() })
                }
            };
            outcome?;
            if cancel.is_cancelled() {
                return Err(BuildError::Cancelled);
            }

            self.progress.complete_stage(index);
            observer.on_progress(&self.progress).await;
        }

        self.state = BuildState::Running {
            stage_index: self.progress.len(),
        };

        let generator = Arc::clone(&self.generator);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(BuildError::Cancelled),
            result = generator.generate(&request.country, &request.date_range) => {
                result.map_err(|e| BuildError::Generator(e.to_string()))
            }
        }
    }
}
