//! Create Session Use Case

use crate::application::config::QuizConfig;
use crate::application::settings::SettingsInput;
use crate::domain::entities::QuizSession;
use crate::domain::repository::QuizSessionRepository;
use crate::error::QuizResult;
use kernel::id::QuizSessionId;
use std::sync::Arc;

/// Create Session Use Case
pub struct CreateSessionUseCase<R>
where
    R: QuizSessionRepository,
{
    repo: Arc<R>,
    config: Arc<QuizConfig>,
}

impl<R> CreateSessionUseCase<R>
where
    R: QuizSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<QuizConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SettingsInput) -> QuizResult<QuizSession> {
        let settings = input.resolve(&self.config)?;
        let session = QuizSession::new(QuizSessionId::new(), settings)?;

        self.repo.create(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            pool_size = session.pool().len(),
            cards_per_round = session.settings().cards_per_round,
            "Created quiz session"
        );

        Ok(session)
    }
}
