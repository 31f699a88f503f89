//! Application layer for DataHelp.
//!
//! This crate provides the report session use case, which coordinates the
//! build pipeline, the stores and the session aggregate.

pub mod report_usecase;
pub mod session;

pub use report_usecase::ReportSessionUseCase;
