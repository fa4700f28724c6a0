//! Configure Session Use Case

use crate::application::config::QuizConfig;
use crate::application::settings::SettingsInput;
use crate::domain::entities::QuizSession;
use crate::domain::repository::QuizSessionRepository;
use crate::error::QuizResult;
use kernel::id::QuizSessionId;
use std::sync::Arc;

/// Configure Session Use Case
pub struct ConfigureSessionUseCase<R>
where
    R: QuizSessionRepository,
{
    repo: Arc<R>,
    config: Arc<QuizConfig>,
}

impl<R> ConfigureSessionUseCase<R>
where
    R: QuizSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<QuizConfig>) -> Self {
        Self { repo, config }
    }

    /// Apply a partial settings update to a session that is still
    /// configuring. A bare round-length change keeps the current pool.
    pub async fn execute(&self, id: QuizSessionId, input: SettingsInput) -> QuizResult<QuizSession> {
        input.check_limits(&self.config)?;

        let config = self.config.clone();
        let (_, session) = self
            .repo
            .update(id, move |session| {
                if let (true, Some(cards)) = (input.only_cards_per_round(), input.cards_per_round) {
                    return session.set_cards_per_round(cards).map(|_| ());
                }
                let settings = input.resolve_over(session.settings().clone(), &config)?;
                session.configure(settings)
            })
            .await?;

        tracing::info!(
            session_id = %id,
            pool_size = session.pool().len(),
            cards_per_round = session.settings().cards_per_round,
            "Reconfigured quiz session"
        );

        Ok(session)
    }
}
