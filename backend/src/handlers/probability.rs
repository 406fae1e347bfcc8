//! Probability calculation handlers

use axum::{extract::rejection::JsonRejection, Json};
use spacerain_shared::{AnalysisResponse, Coordinate, RequestPayload, ValidationError};

use crate::error::AppResult;
use crate::services::simulation;

/// Answer a probability request with simulated values
pub async fn calculate_probability(
    payload: Result<Json<RequestPayload>, JsonRejection>,
) -> AppResult<Json<AnalysisResponse>> {
    let Json(payload) = payload?;

    Coordinate::new(payload.lat, payload.lon)?;
    if payload.conditions.is_empty() {
        return Err(ValidationError::EmptyConditions.into());
    }

    tracing::info!(
        date = %payload.date,
        time = %payload.time,
        lat = payload.lat,
        lon = payload.lon,
        conditions = payload.conditions.len(),
        "simulating analysis"
    );

    let response = simulation::simulate(&payload, &mut rand::rng());
    Ok(Json(response))
}
