//! Health check endpoint

use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Clone)]
struct HealthState {
    started_at: Instant,
}

async fn health_handler(State(state): State<HealthState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

pub fn health_router(started_at: Instant) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(HealthState { started_at })
}
