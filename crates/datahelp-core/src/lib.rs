pub mod config;
pub mod country;
pub mod download;
pub mod error;
pub mod i18n;
pub mod pipeline;
pub mod preference;
pub mod progress;
pub mod report;
pub mod session;
pub mod validation;

// Re-export common error type
pub use error::DataHelpError;
