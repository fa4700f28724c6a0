//! HTTP Handlers

use crate::application::config::QuizConfig;
use crate::application::configure_session::ConfigureSessionUseCase;
use crate::application::create_session::CreateSessionUseCase;
use crate::application::get_session::GetSessionUseCase;
use crate::application::play_round::PlayRoundUseCase;
use crate::application::preview_pool::PreviewPoolUseCase;
use crate::domain::entities::QuizSession;
use crate::domain::repository::QuizSessionRepository;
use crate::error::QuizResult;
use crate::presentation::dto::{
    AnswerRequest, AnswerResponse, PreviewResponse, RevealResponse, SessionView, SettingsRequest,
};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::QuizSessionId;
use std::sync::Arc;

/// Shared state for quiz handlers
pub struct QuizAppState<R>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<QuizConfig>,
}

impl<R> Clone for QuizAppState<R>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> QuizAppState<R>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    fn view(&self, session: &QuizSession) -> SessionView {
        SessionView::new(session, &self.config.card_presets)
    }
}

/// POST /api/quiz/preview
pub async fn preview_pool<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<SettingsRequest>,
) -> QuizResult<Json<PreviewResponse>>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let use_case = PreviewPoolUseCase::new(state.config.clone());
    let preview = use_case.execute(req.into())?;
    Ok(Json(preview.into()))
}

/// POST /api/quiz/sessions
pub async fn create_session<R>(
    State(state): State<QuizAppState<R>>,
    Json(req): Json<SettingsRequest>,
) -> QuizResult<(StatusCode, Json<SessionView>)>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let use_case = CreateSessionUseCase::new(state.repo.clone(), state.config.clone());
    let session = use_case.execute(req.into()).await?;
    Ok((StatusCode::CREATED, Json(state.view(&session))))
}

/// GET /api/quiz/sessions/{id}
pub async fn get_session<R>(
    State(state): State<QuizAppState<R>>,
    Path(id): Path<QuizSessionId>,
) -> QuizResult<Json<SessionView>>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let use_case = GetSessionUseCase::new(state.repo.clone());
    let session = use_case.execute(id).await?;
    Ok(Json(state.view(&session)))
}

/// PUT /api/quiz/sessions/{id}/settings
pub async fn update_settings<R>(
    State(state): State<QuizAppState<R>>,
    Path(id): Path<QuizSessionId>,
    Json(req): Json<SettingsRequest>,
) -> QuizResult<Json<SessionView>>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let use_case = ConfigureSessionUseCase::new(state.repo.clone(), state.config.clone());
    let session = use_case.execute(id, req.into()).await?;
    Ok(Json(state.view(&session)))
}

/// POST /api/quiz/sessions/{id}/start
pub async fn start_round<R>(
    State(state): State<QuizAppState<R>>,
    Path(id): Path<QuizSessionId>,
) -> QuizResult<Json<SessionView>>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let session = PlayRoundUseCase::new(state.repo.clone()).start(id).await?;
    Ok(Json(state.view(&session)))
}

/// POST /api/quiz/sessions/{id}/answer
pub async fn submit_answer<R>(
    State(state): State<QuizAppState<R>>,
    Path(id): Path<QuizSessionId>,
    Json(req): Json<AnswerRequest>,
) -> QuizResult<Json<AnswerResponse>>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let (outcome, session) = PlayRoundUseCase::new(state.repo.clone())
        .answer(id, req.answer)
        .await?;
    Ok(Json(AnswerResponse::new(outcome, state.view(&session))))
}

/// POST /api/quiz/sessions/{id}/skip
pub async fn skip_card<R>(
    State(state): State<QuizAppState<R>>,
    Path(id): Path<QuizSessionId>,
) -> QuizResult<Json<SessionView>>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let session = PlayRoundUseCase::new(state.repo.clone()).skip(id).await?;
    Ok(Json(state.view(&session)))
}

/// POST /api/quiz/sessions/{id}/reveal
pub async fn reveal_answer<R>(
    State(state): State<QuizAppState<R>>,
    Path(id): Path<QuizSessionId>,
) -> QuizResult<Json<RevealResponse>>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let (answer, session) = PlayRoundUseCase::new(state.repo.clone()).reveal(id).await?;
    Ok(Json(RevealResponse {
        answer,
        session: state.view(&session),
    }))
}

/// POST /api/quiz/sessions/{id}/reset
pub async fn reset_session<R>(
    State(state): State<QuizAppState<R>>,
    Path(id): Path<QuizSessionId>,
) -> QuizResult<Json<SessionView>>
where
    R: QuizSessionRepository + Send + Sync + 'static,
{
    let session = PlayRoundUseCase::new(state.repo.clone()).reset(id).await?;
    Ok(Json(state.view(&session)))
}
