//! Presentation Layer
//!
//! HTTP handlers and DTOs for the quiz API.

pub mod dto;
pub mod handlers;
pub mod router;
