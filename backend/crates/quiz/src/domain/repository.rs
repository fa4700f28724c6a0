//! Repository Traits
//!
//! Interfaces for session persistence. Implementations live in `infra`.

use chrono::{DateTime, Utc};
use kernel::id::QuizSessionId;
use std::time::Duration;

use crate::domain::entities::QuizSession;
use crate::error::QuizResult;

/// Quiz session repository trait
#[trait_variant::make(QuizSessionRepository: Send)]
pub trait LocalQuizSessionRepository {
    /// Store a new session; fails with `CapacityExceeded` when full
    async fn create(&self, session: &QuizSession) -> QuizResult<()>;

    /// Get a session by id
    async fn get(&self, id: QuizSessionId) -> QuizResult<Option<QuizSession>>;

    /// Apply `mutate` to a stored session atomically and return its result
    /// together with the updated session. Changes are kept only if
    /// `mutate` succeeds.
    async fn update<F, T>(&self, id: QuizSessionId, mutate: F) -> QuizResult<(T, QuizSession)>
    where
        F: FnOnce(&mut QuizSession) -> QuizResult<T> + Send,
        T: Send;

    /// Delete sessions not updated within `ttl`; returns how many were removed
    async fn remove_idle(&self, now: DateTime<Utc>, ttl: Duration) -> QuizResult<usize>;
}
