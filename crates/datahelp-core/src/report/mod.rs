//! Report domain module.
//!
//! # Module Structure
//!
//! - `model`: `DateRange`, `ReportData`, `ChartDataPoint`, `SavedReport`
//! - `search`: free-text filtering over saved reports
//! - `repository`: `ReportHistoryRepository` persistence trait
//! - `generator`: `ReportGenerator` content collaborator

mod generator;
mod model;
mod repository;
mod search;

pub use generator::ReportGenerator;
pub use model::{ChartDataPoint, DateRange, ReportData, SavedReport};
pub use repository::ReportHistoryRepository;
pub use search::filter_reports;
