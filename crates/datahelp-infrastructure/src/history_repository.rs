//! Report history repository backed by a key/value record.
//!
//! The whole history is one JSON array stored under [`HISTORY_KEY`]. Nothing
//! is cached: `list` reads the record, and every mutation re-reads and
//! rewrites it inside one [`KeyValueStore::update`], so sessions in other
//! processes sharing the store never lose each other's changes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use datahelp_core::error::Result;
use datahelp_core::report::{ReportHistoryRepository, SavedReport};

use crate::storage::KeyValueStore;

/// Storage key of the saved-report list.
pub const HISTORY_KEY: &str = "ngo-reports-history";

pub struct KvReportHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvReportHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

/// Unreadable or malformed content counts as an empty history.
fn parse_history(raw: Option<&str>) -> Vec<SavedReport> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<SavedReport>>(raw) {
        Ok(reports) => reports,
        Err(e) => {
            tracing::warn!(error = %e, "[History] Malformed history record, treating as empty");
            Vec::new()
        }
    }
}

#[async_trait]
impl ReportHistoryRepository for KvReportHistoryRepository {
    async fn list(&self) -> Result<Vec<SavedReport>> {
        let raw = match self.store.get(HISTORY_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "[History] Failed to read history, starting empty");
                None
            }
        };
        let reports = parse_history(raw.as_deref());
        tracing::debug!(count = reports.len(), "[History] Loaded saved reports");
        Ok(reports)
    }

    async fn append(&self, report: SavedReport) -> Result<()> {
        let report_id = report.id.clone();
        self.store
            .update(
                HISTORY_KEY,
                Box::new(move |raw| {
                    let mut reports = parse_history(raw.as_deref());
                    reports.push(report);
                    Ok(Some(serde_json::to_string(&reports)?))
                }),
            )
            .await?;

        tracing::info!(report_id = %report_id, "[History] Report saved");
        Ok(())
    }

    async fn remove(&self, report_id: &str) -> Result<bool> {
        let removed = Arc::new(AtomicBool::new(false));
        let target = report_id.to_string();
        let flag = removed.clone();
        self.store
            .update(
                HISTORY_KEY,
                Box::new(move |raw| {
                    let reports = parse_history(raw.as_deref());
                    if !reports.iter().any(|r| r.id == target) {
                        return Ok(raw);
                    }
                    let next: Vec<SavedReport> =
                        reports.into_iter().filter(|r| r.id != target).collect();
                    flag.store(true, Ordering::SeqCst);
                    Ok(Some(serde_json::to_string(&next)?))
                }),
            )
            .await?;

        let removed = removed.load(Ordering::SeqCst);
        if removed {
            tracing::info!(report_id, "[History] Report removed");
        } else {
            tracing::debug!(report_id, "[History] Remove ignored, no such report");
        }
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY).await?;
        tracing::info!("[History] History cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
    use datahelp_core::country::Country;
    use datahelp_core::report::{DateRange, ReportData};
    use tempfile::TempDir;

    fn report(code: &str, name: &str, start: &str, end: &str) -> SavedReport {
        SavedReport::new(
            Country::new(code, name),
            DateRange::new(start, end),
            ReportData {
                summary: format!("{name} summary"),
                key_events: vec![],
                trends: vec![],
                risks: vec![],
                chart_data: vec![],
            },
        )
    }

    fn memory_repo() -> (Arc<MemoryKeyValueStore>, KvReportHistoryRepository) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = KvReportHistoryRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_append_keeps_insertion_order() {
        let (_store, repo) = memory_repo();
        let first = report("KE", "Kenya", "2024-01-01", "2024-03-31");
        let second = report("SO", "Somalia", "2024-04-01", "2024-06-30");

        repo.append(first.clone()).await.unwrap();
        repo.append(second.clone()).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_remove_unknown_and_twice_is_noop() {
        let (_store, repo) = memory_repo();
        let kept = report("KE", "Kenya", "2024-01-01", "2024-03-31");
        let dropped = report("UG", "Uganda", "2024-01-01", "2024-03-31");
        repo.append(kept.clone()).await.unwrap();
        repo.append(dropped.clone()).await.unwrap();

        assert!(!repo.remove("missing").await.unwrap());
        assert!(repo.remove(&dropped.id).await.unwrap());
        assert!(!repo.remove(&dropped.id).await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_clear_removes_backing_record() {
        let (store, repo) = memory_repo();
        repo.append(report("KE", "Kenya", "2024-01-01", "2024-03-31"))
            .await
            .unwrap();
        assert!(store.get(HISTORY_KEY).await.unwrap().is_some());

        repo.clear().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(store.get(HISTORY_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_record_loads_as_empty() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(HISTORY_KEY, "{ definitely not a list").await.unwrap();
        let repo = KvReportHistoryRepository::new(store.clone());

        assert!(repo.list().await.unwrap().is_empty());
        repo.append(report("KE", "Kenya", "2024-01-01", "2024-03-31"))
            .await
            .unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_name_title_and_dates() {
        let (_store, repo) = memory_repo();
        repo.append(report("KE", "Kenya", "2024-01-01", "2024-03-31"))
            .await
            .unwrap();
        repo.append(report("SS", "South Sudan", "2023-07-01", "2023-12-31"))
            .await
            .unwrap();

        assert_eq!(repo.search("kenya").await.unwrap().len(), 1);
        assert_eq!(repo.search("SUDAN REPORT").await.unwrap().len(), 1);
        assert_eq!(repo.search("2023-12").await.unwrap().len(), 1);
        assert_eq!(repo.search("   ").await.unwrap(), repo.list().await.unwrap());
        assert!(repo.search("chad").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_survives_reopen_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let saved = report("KE", "Kenya", "2024-01-01", "2024-03-31");
        {
            let repo = KvReportHistoryRepository::new(Arc::new(FileKeyValueStore::new(temp_dir.path())));
            repo.append(saved.clone()).await.unwrap();
        }

        let reopened = KvReportHistoryRepository::new(Arc::new(FileKeyValueStore::new(temp_dir.path())));
        assert_eq!(reopened.list().await.unwrap(), vec![saved]);
    }

    fn file_repo(temp_dir: &TempDir) -> KvReportHistoryRepository {
        KvReportHistoryRepository::new(Arc::new(FileKeyValueStore::new(temp_dir.path())))
    }

    #[tokio::test]
    async fn test_sessions_sharing_a_directory_keep_each_others_appends() {
        let temp_dir = TempDir::new().unwrap();
        let first = file_repo(&temp_dir);
        let second = file_repo(&temp_dir);
        assert!(first.list().await.unwrap().is_empty());

        let from_second = report("SO", "Somalia", "2024-04-01", "2024-06-30");
        let from_first = report("KE", "Kenya", "2024-01-01", "2024-03-31");
        second.append(from_second.clone()).await.unwrap();
        first.append(from_first.clone()).await.unwrap();

        let expected = vec![from_second, from_first];
        assert_eq!(file_repo(&temp_dir).list().await.unwrap(), expected);
        assert_eq!(first.list().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_remove_in_one_session_keeps_appends_from_another() {
        let temp_dir = TempDir::new().unwrap();
        let first = file_repo(&temp_dir);
        let second = file_repo(&temp_dir);

        let doomed = report("KE", "Kenya", "2024-01-01", "2024-03-31");
        first.append(doomed.clone()).await.unwrap();
        assert_eq!(first.list().await.unwrap().len(), 1);

        let kept = report("UG", "Uganda", "2024-01-01", "2024-03-31");
        second.append(kept.clone()).await.unwrap();
        assert!(first.remove(&doomed.id).await.unwrap());

        assert_eq!(second.list().await.unwrap(), vec![kept]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_from_separate_instances() {
        let temp_dir = TempDir::new().unwrap();

        let mut handles = Vec::new();
        for i in 0..12 {
            let repo = file_repo(&temp_dir);
            handles.push(tokio::spawn(async move {
                let day = format!("2024-02-{:02}", i + 1);
                repo.append(report("KE", "Kenya", &day, &day)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(file_repo(&temp_dir).list().await.unwrap().len(), 12);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let (_store, repo) = memory_repo();
        let repo = Arc::new(repo);

        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let day = format!("2024-01-{:02}", i + 1);
                repo.append(report("KE", "Kenya", &day, &day)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.list().await.unwrap().len(), 16);
    }
}
