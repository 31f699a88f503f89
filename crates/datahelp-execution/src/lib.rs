//! Reference collaborators for the report pipeline: timed stage work, mock
//! report content and mock export.

pub mod downloader;
pub mod report_generator;
pub mod stage_executor;

pub use downloader::MockReportDownloader;
pub use report_generator::MockReportGenerator;
pub use stage_executor::DelayStageExecutor;
