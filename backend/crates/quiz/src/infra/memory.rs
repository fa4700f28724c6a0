//! In-Memory Repository Implementation
//!
//! Sessions live only as long as the process; the store is capped and
//! idle sessions are swept periodically.

use chrono::{DateTime, Utc};
use kernel::id::QuizSessionId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::QuizSession;
use crate::domain::repository::QuizSessionRepository;
use crate::error::{QuizError, QuizResult};

/// `RwLock<HashMap>`-backed repository, cheap to clone
#[derive(Clone)]
pub struct InMemoryQuizRepository {
    sessions: Arc<RwLock<HashMap<QuizSessionId, QuizSession>>>,
    max_sessions: usize,
}

impl InMemoryQuizRepository {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl QuizSessionRepository for InMemoryQuizRepository {
    async fn create(&self, session: &QuizSession) -> QuizResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(QuizError::CapacityExceeded);
        }
        sessions.insert(session.id(), session.clone());

        tracing::debug!(
            session_id = %session.id(),
            active_sessions = sessions.len(),
            "Quiz session stored"
        );

        Ok(())
    }

    async fn get(&self, id: QuizSessionId) -> QuizResult<Option<QuizSession>> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn update<F, T>(&self, id: QuizSessionId, mutate: F) -> QuizResult<(T, QuizSession)>
    where
        F: FnOnce(&mut QuizSession) -> QuizResult<T> + Send,
        T: Send,
    {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(&id).ok_or(QuizError::SessionNotFound)?;

        let mut draft = stored.clone();
        let output = mutate(&mut draft)?;
        *stored = draft.clone();

        Ok((output, draft))
    }

    async fn remove_idle(&self, now: DateTime<Utc>, ttl: Duration) -> QuizResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, ttl));
        let removed = before - sessions.len();

        if removed > 0 {
            tracing::info!(
                removed,
                remaining = sessions.len(),
                "Swept idle quiz sessions"
            );
        }

        Ok(removed)
    }
}
