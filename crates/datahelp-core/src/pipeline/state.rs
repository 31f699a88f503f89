//! Build pipeline state and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::country::Country;
use crate::i18n::MessageKey;
use crate::progress::StageId;
use crate::report::{DateRange, ReportData};
use crate::validation::ValidationError;

/// A validated build request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub country: Country,
    pub date_range: DateRange,
}

/// Why a build attempt did not produce a report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("invalid build request: {0}")]
    Validation(#[from] ValidationError),

    /// Admission control: another attempt is still in flight.
    #[error("a report build is already in progress")]
    Busy,

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: StageId, message: String },

    #[error("report generation failed: {0}")]
    Generator(String),

    #[error("report build was cancelled")]
    Cancelled,
}

impl BuildError {
    /// Message shown on the error surface. `Busy` shows nothing: the build
    /// control is already disabled while a build runs.
    pub fn message_key(&self) -> Option<MessageKey> {
        match self {
            BuildError::Validation(e) => Some(e.message_key()),
            BuildError::Busy => None,
            BuildError::Stage { .. } | BuildError::Generator(_) => Some(MessageKey::ErrorBuildReport),
            BuildError::Cancelled => Some(MessageKey::ErrorBuildCancelled),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, BuildError::Cancelled)
    }
}

/// Lifecycle state of the build pipeline.
///
/// `Succeeded` and `Failed` are terminal for one attempt; the next request
/// or an explicit reset returns the pipeline to `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BuildState {
    #[default]
    Idle,
    Validating,
    Running { stage_index: usize },
    Succeeded(ReportData),
    Failed(BuildError),
}

impl BuildState {
    /// True when a new request may be admitted.
    pub fn accepts_request(&self) -> bool {
        matches!(
            self,
            BuildState::Idle | BuildState::Succeeded(_) | BuildState::Failed(_)
        )
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, BuildState::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, BuildState::Running { .. })
    }
}
