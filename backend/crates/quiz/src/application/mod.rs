//! Application Layer - Use Cases
//!
//! Orchestrates the quiz domain and the session repository.

pub mod config;
pub mod configure_session;
pub mod create_session;
pub mod get_session;
pub mod play_round;
pub mod preview_pool;
pub mod settings;
pub mod sweep_sessions;
