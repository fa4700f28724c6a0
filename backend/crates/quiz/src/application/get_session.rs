//! Get Session Use Case

use crate::domain::entities::QuizSession;
use crate::domain::repository::QuizSessionRepository;
use crate::error::{QuizError, QuizResult};
use kernel::id::QuizSessionId;
use std::sync::Arc;

/// Get Session Use Case
pub struct GetSessionUseCase<R>
where
    R: QuizSessionRepository,
{
    repo: Arc<R>,
}

impl<R> GetSessionUseCase<R>
where
    R: QuizSessionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: QuizSessionId) -> QuizResult<QuizSession> {
        self.repo.get(id).await?.ok_or(QuizError::SessionNotFound)
    }
}
