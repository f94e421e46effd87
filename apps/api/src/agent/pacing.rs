use std::time::Duration;

use async_trait::async_trait;

/// Presentational pause points of the matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacePoint {
    AfterFilter,
    AfterNeedsInput,
    AfterAttachResume,
    AfterCoverLetter,
    BetweenJobs,
}

impl PacePoint {
    pub fn duration(self) -> Duration {
        match self {
            PacePoint::AfterFilter => Duration::from_millis(600),
            PacePoint::AfterNeedsInput => Duration::from_millis(1000),
            PacePoint::AfterAttachResume => Duration::from_millis(1000),
            PacePoint::AfterCoverLetter => Duration::from_millis(1000),
            PacePoint::BetweenJobs => Duration::from_millis(800),
        }
    }
}

/// Suspend point between agent steps. Carries no meaning beyond pacing.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, point: PacePoint);
}

/// Sleeps on the tokio timer for each point's duration.
pub struct SleepPacer;

#[async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self, point: PacePoint) {
        tokio::time::sleep(point.duration()).await;
    }
}

/// Only yields to the scheduler.
pub struct NoPacer;

#[async_trait]
impl Pacer for NoPacer {
    async fn pause(&self, _point: PacePoint) {
        tokio::task::yield_now().await;
    }
}
