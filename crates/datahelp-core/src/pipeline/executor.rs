//! Stage execution and progress observation capabilities.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::state::BuildRequest;
use crate::error::Result;
use crate::progress::{BuildProgress, StageId};

/// Performs the work behind one pipeline stage.
///
/// The fixed-delay executor is the reference implementation; real data
/// collection can replace it without touching the state machine.
#[async_trait]
pub trait StageExecutor: Send + Sync {
    /// Runs `stage` to completion. Long-running work should watch `cancel`
    /// and return early once it fires.
    async fn run_stage(
        &self,
        stage: StageId,
        request: &BuildRequest,
        cancel: &CancellationToken,
    ) -> Result<()>;
}

/// Receives progress snapshots from the pipeline.
///
/// Each call is awaited before the pipeline moves on, so an observer sees
/// every snapshot in order and before the next stage starts.
#[async_trait]
pub trait ProgressObserver: Send + Sync {
    /// Called once validation passed and the first step is active.
    async fn on_started(&self, snapshot: &BuildProgress);

    /// Called after each completed stage and after a failure reset.
    async fn on_progress(&self, snapshot: &BuildProgress);
}
