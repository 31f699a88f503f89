use std::sync::Arc;

use async_trait::async_trait;
use datahelp_core::pipeline::ProgressObserver;
use datahelp_core::progress::BuildProgress;
use datahelp_core::session::AppSession;
use tokio::sync::RwLock;

/// Writes pipeline snapshots into the shared session.
///
/// Each call returns only after the session holds the snapshot, so readers
/// never see a stage start before the previous snapshot landed.
#[derive(Clone)]
pub struct SessionProgressObserver {
    session: Arc<RwLock<AppSession>>,
}

impl SessionProgressObserver {
    pub fn new(session: Arc<RwLock<AppSession>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl ProgressObserver for SessionProgressObserver {
    async fn on_started(&self, snapshot: &BuildProgress) {
        self.session.write().await.begin_build(snapshot.clone());
    }

    async fn on_progress(&self, snapshot: &BuildProgress) {
        tracing::debug!(
            "[SessionProgressObserver] Progress {}/{}",
            snapshot.current_step(),
            snapshot.len()
        );
        self.session.write().await.update_progress(snapshot.clone());
    }
}
