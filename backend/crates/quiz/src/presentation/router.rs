//! Quiz Router

use crate::application::config::QuizConfig;
use crate::domain::repository::QuizSessionRepository;
use crate::infra::memory::InMemoryQuizRepository;
use crate::presentation::handlers::{self, QuizAppState};
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Create the quiz router with the in-memory repository
pub fn quiz_router(repo: InMemoryQuizRepository, config: QuizConfig) -> Router {
    quiz_router_generic(repo, config)
}

/// Create a generic quiz router for any repository implementation
pub fn quiz_router_generic<R>(repo: R, config: QuizConfig) -> Router
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let state = QuizAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/preview", post(handlers::preview_pool::<R>))
        .route("/sessions", post(handlers::create_session::<R>))
        .route("/sessions/{id}", get(handlers::get_session::<R>))
        .route("/sessions/{id}/settings", put(handlers::update_settings::<R>))
        .route("/sessions/{id}/start", post(handlers::start_round::<R>))
        .route("/sessions/{id}/answer", post(handlers::submit_answer::<R>))
        .route("/sessions/{id}/skip", post(handlers::skip_card::<R>))
        .route("/sessions/{id}/reveal", post(handlers::reveal_answer::<R>))
        .route("/sessions/{id}/reset", post(handlers::reset_session::<R>))
        .with_state(state)
}
