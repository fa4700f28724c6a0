//! Sweep Idle Sessions Use Case

use crate::application::config::QuizConfig;
use crate::domain::repository::QuizSessionRepository;
use crate::error::QuizResult;
use chrono::Utc;
use std::sync::Arc;

/// Sweep Idle Sessions Use Case
pub struct SweepIdleSessionsUseCase<R>
where
    R: QuizSessionRepository,
{
    repo: Arc<R>,
    config: Arc<QuizConfig>,
}

impl<R> SweepIdleSessionsUseCase<R>
where
    R: QuizSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<QuizConfig>) -> Self {
        Self { repo, config }
    }

    /// Drop sessions idle for longer than the configured TTL; returns how
    /// many were removed.
    pub async fn execute(&self) -> QuizResult<usize> {
        self.repo
            .remove_idle(Utc::now(), self.config.session_idle_ttl)
            .await
    }

    /// Run `execute` every `sweep_interval` until the task is dropped.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.config.sweep_interval);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = self.execute().await {
                tracing::error!(error = %e, "Idle session sweep failed");
            }
        }
    }
}
