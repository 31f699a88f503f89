//! Report history repository trait.
//!
//! Defines the interface for persisting the list of built reports.

use async_trait::async_trait;

use super::model::SavedReport;
use super::search::filter_reports;
use crate::error::Result;

/// An abstract repository for the report history.
///
/// The history is a single ordered list, oldest first. Entries are only ever
/// appended, except for an explicit single delete or a full clear.
///
/// # Implementation Notes
///
/// Implementations must serialize read-modify-write cycles (`append`,
/// `remove`, `clear`) so concurrent callers never lose an update, and must
/// treat an unreadable backing record as an empty history.
#[async_trait]
pub trait ReportHistoryRepository: Send + Sync {
    /// Lists all saved reports in insertion order.
    async fn list(&self) -> Result<Vec<SavedReport>>;

    /// Appends one report and persists the updated list.
    async fn append(&self, report: SavedReport) -> Result<()>;

    /// Removes the report with the given ID.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: A report was removed and the list persisted
    /// - `Ok(false)`: No report had that ID; nothing changed
    /// - `Err(_)`: Error occurred while persisting
    async fn remove(&self, report_id: &str) -> Result<bool>;

    /// Empties the history and removes the backing record.
    async fn clear(&self) -> Result<()>;

    /// Case-insensitive search over country name, title and dates.
    async fn search(&self, term: &str) -> Result<Vec<SavedReport>> {
        let reports = self.list().await?;
        Ok(filter_reports(&reports, term))
    }
}
