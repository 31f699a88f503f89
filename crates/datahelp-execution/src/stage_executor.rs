use std::time::Duration;

use async_trait::async_trait;
use datahelp_core::error::Result;
use datahelp_core::pipeline::{BuildRequest, StageExecutor};
use datahelp_core::progress::StageId;
use tokio_util::sync::CancellationToken;

/// Simulates each stage with a fixed delay.
///
/// Returns early, without error, once `cancel` fires; the pipeline decides
/// what a cancelled stage means.
#[derive(Debug, Clone)]
pub struct DelayStageExecutor {
    delay: Duration,
}

impl DelayStageExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for DelayStageExecutor {
    fn default() -> Self {
        Self::from_millis(1000)
    }
}

#[async_trait]
impl StageExecutor for DelayStageExecutor {
    async fn run_stage(
        &self,
        stage: StageId,
        request: &BuildRequest,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::debug!(
            %stage,
            country = %request.country.code,
            delay_ms = self.delay.as_millis() as u64,
            "[DelayStageExecutor] Running stage"
        );
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(%stage, "[DelayStageExecutor] Stage interrupted");
            }
            _ = tokio::time::sleep(self.delay) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datahelp_core::country::Country;
    use datahelp_core::report::DateRange;
    use std::time::Instant;

    fn request() -> BuildRequest {
        BuildRequest {
            country: Country::new("KE", "Kenya"),
            date_range: DateRange::new("2024-01-01", "2024-03-31"),
        }
    }

    #[tokio::test]
    async fn test_waits_for_configured_delay() {
        let executor = DelayStageExecutor::from_millis(20);
        let started = Instant::now();
        executor
            .run_stage(StageId::Collecting, &request(), &CancellationToken::new())
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_cancelled_token_returns_immediately() {
        let executor = DelayStageExecutor::from_millis(60_000);
        let token = CancellationToken::new();
        token.cancel();

        let started = Instant::now();
        executor
            .run_stage(StageId::Processing, &request(), &token)
            .await
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_default_delay_is_one_second() {
        assert_eq!(DelayStageExecutor::default().delay(), Duration::from_secs(1));
    }
}
