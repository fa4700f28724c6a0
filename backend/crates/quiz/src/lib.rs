//! Quiz Backend Module
//!
//! Arithmetic flash-card quizzes. Clean Architecture structure:
//! - `domain/` - Questions, pool generation, session state machine,
//!   repository trait
//! - `application/` - Use cases and configuration
//! - `infra/` - In-memory session store
//! - `presentation/` - HTTP handlers
//!
//! ## Session Model
//! - A pool is generated deterministically from the selected operations and
//!   numbers; randomness only enters when a round is dealt
//! - Session phases move `configuring -> in progress -> finished`; reset is
//!   the only way back
//! - Each request mutates one session atomically under the store's lock

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::QuizConfig;
pub use application::sweep_sessions::SweepIdleSessionsUseCase;
pub use error::{QuizError, QuizResult};
pub use infra::memory::InMemoryQuizRepository;
pub use presentation::router::{quiz_router, quiz_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
