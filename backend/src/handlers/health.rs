//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
    pub version: String,
    pub message: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        mode: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "SpaceRain development server running with simulated data".to_string(),
    })
}
