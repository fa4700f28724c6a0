//! Health Check
//!
//! Liveness endpoint for the container platform.

use crate::config::Environment;
use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

const SERVICE_NAME: &str = "flash-math-fun";

/// Response for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub environment: Environment,
    pub timestamp: DateTime<Utc>,
}

/// GET /health
pub async fn health(State(environment): State<Environment>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        environment,
        timestamp: Utc::now(),
    })
}

pub fn health_router(environment: Environment) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(environment)
}
