//! Play Round Use Case
//!
//! Everything a player does once a session exists: deal, answer, skip,
//! peek at the answer, and start over.

use crate::domain::entities::{AnswerOutcome, QuizSession};
use crate::domain::repository::QuizSessionRepository;
use crate::error::QuizResult;
use kernel::id::QuizSessionId;
use std::sync::Arc;

/// Play Round Use Case
pub struct PlayRoundUseCase<R>
where
    R: QuizSessionRepository,
{
    repo: Arc<R>,
}

impl<R> PlayRoundUseCase<R>
where
    R: QuizSessionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Deal a shuffled round
    pub async fn start(&self, id: QuizSessionId) -> QuizResult<QuizSession> {
        let (_, session) = self
            .repo
            .update(id, |session| session.start(&mut rand::rng()))
            .await?;

        tracing::info!(
            session_id = %id,
            cards = session.progress().total,
            "Quiz round started"
        );

        Ok(session)
    }

    /// Check an answer for the current card
    pub async fn answer(
        &self,
        id: QuizSessionId,
        answer: i64,
    ) -> QuizResult<(AnswerOutcome, QuizSession)> {
        let (outcome, session) = self
            .repo
            .update(id, move |session| session.submit_answer(answer))
            .await?;

        tracing::debug!(
            session_id = %id,
            correct = outcome.correct,
            position = session.position(),
            "Answer submitted"
        );
        if outcome.finished {
            log_finished(&session);
        }

        Ok((outcome, session))
    }

    /// Move past the current card without scoring it
    pub async fn skip(&self, id: QuizSessionId) -> QuizResult<QuizSession> {
        let (_, session) = self.repo.update(id, QuizSession::skip).await?;

        tracing::debug!(session_id = %id, position = session.position(), "Card skipped");
        if session.phase().is_finished() {
            log_finished(&session);
        }

        Ok(session)
    }

    /// Show the current card's answer
    pub async fn reveal(&self, id: QuizSessionId) -> QuizResult<(u32, QuizSession)> {
        self.repo.update(id, QuizSession::reveal_answer).await
    }

    /// Back to configuring with the same settings
    pub async fn reset(&self, id: QuizSessionId) -> QuizResult<QuizSession> {
        let (_, session) = self
            .repo
            .update(id, |session| {
                session.reset();
                Ok(())
            })
            .await?;

        tracing::info!(session_id = %id, "Quiz session reset");

        Ok(session)
    }
}

fn log_finished(session: &QuizSession) {
    let progress = session.progress();
    tracing::info!(
        session_id = %session.id(),
        score = progress.score,
        total = progress.total,
        "Quiz round finished"
    );
}
