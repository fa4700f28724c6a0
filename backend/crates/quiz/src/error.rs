//! Quiz Error Types
//!
//! Quiz-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use crate::domain::value_objects::Phase;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Quiz-specific result type alias
pub type QuizResult<T> = Result<T, QuizError>;

/// Quiz-specific error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Operations or numbers selection is empty, or otherwise unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The session's phase does not allow the requested action
    #[error("Cannot {action} while session is {from}")]
    InvalidStateTransition { from: Phase, action: &'static str },

    /// No session with that id (never created or already swept)
    #[error("Quiz session not found")]
    SessionNotFound,

    /// The session store is full
    #[error("Too many active quiz sessions")]
    CapacityExceeded,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuizError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        QuizError::InvalidConfiguration(reason.into())
    }

    pub(crate) fn transition(from: Phase, action: &'static str) -> Self {
        QuizError::InvalidStateTransition { from, action }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::InvalidConfiguration(_) => ErrorKind::BadRequest,
            QuizError::InvalidStateTransition { .. } => ErrorKind::Conflict,
            QuizError::SessionNotFound => ErrorKind::NotFound,
            QuizError::CapacityExceeded => ErrorKind::ServiceUnavailable,
            QuizError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Recovery hint surfaced to the client as the problem document's `action`
    fn action(&self) -> Option<&'static str> {
        match self {
            QuizError::InvalidConfiguration(_) => {
                Some("Select at least one operation and one positive number")
            }
            QuizError::InvalidStateTransition {
                from: Phase::Finished,
                ..
            } => Some("Reset the session to start a new round"),
            QuizError::InvalidStateTransition {
                from: Phase::Configuring,
                ..
            } => Some("Start the session first"),
            QuizError::InvalidStateTransition { .. } => {
                Some("Finish or reset the current round first")
            }
            QuizError::SessionNotFound => Some("Create a new quiz session"),
            QuizError::CapacityExceeded => Some("Please try again later"),
            QuizError::Internal(_) => None,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuizError::Internal(msg) => {
                tracing::error!(message = %msg, "Quiz internal error");
            }
            QuizError::CapacityExceeded => {
                tracing::warn!("Quiz session store at capacity");
            }
            _ => {
                tracing::debug!(error = %self, "Quiz request rejected");
            }
        }
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        let kind = err.kind();
        let action = err.action();
        let app_err = AppError::new(kind, err.to_string());
        match action {
            Some(action) => app_err.with_action(action),
            None => app_err,
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        self.log();
        if let QuizError::Internal(_) = self {
            // Don't leak internal details
            return AppError::internal("Internal error").into_response();
        }
        AppError::from(self).into_response()
    }
}
