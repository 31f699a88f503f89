//! Composition root.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use datahelp_application::ReportSessionUseCase;
use datahelp_core::config::AppConfig;
use datahelp_core::i18n::TranslationTable;
use datahelp_execution::{DelayStageExecutor, MockReportDownloader, MockReportGenerator};
use datahelp_infrastructure::{
    DataHelpPaths, FileKeyValueStore, KeyValueStore, KvPreferenceRepository,
    KvReportHistoryRepository,
};

/// Wires the file-backed stores and mock collaborators into a use case and
/// restores the persisted session.
pub async fn build_usecase(config: &AppConfig, paths: &DataHelpPaths) -> Result<ReportSessionUseCase> {
    let store_dir = paths
        .store_dir()
        .context("Failed to resolve the data directory")?;
    tracing::debug!("[Context] Using store directory {}", store_dir.display());

    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(store_dir));
    let translator = Arc::new(TranslationTable::builtin());

    let usecase = ReportSessionUseCase::new(
        Arc::new(DelayStageExecutor::from_millis(config.stage_delay_ms)),
        Arc::new(MockReportGenerator::new()),
        Arc::new(KvReportHistoryRepository::new(store.clone())),
        Arc::new(KvPreferenceRepository::new(store).with_default_language(config.language())),
        Arc::new(MockReportDownloader::new(
            Duration::from_millis(config.download_delay_ms),
            translator.clone(),
        )),
        translator,
    );
    usecase.bootstrap().await;
    Ok(usecase)
}
