//! Report-content generator collaborator.

use async_trait::async_trait;

use super::model::{DateRange, ReportData};
use crate::country::Country;
use crate::error::Result;

/// Produces report content for a country and date range.
///
/// The pipeline treats this as a black box. Output may be deterministic or
/// not; inputs are borrowed and must not be altered. Implementations should
/// return within a bounded time.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, country: &Country, date_range: &DateRange) -> Result<ReportData>;
}
