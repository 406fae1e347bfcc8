//! Local validation for SpaceRain
//!
//! Checks performed on the client before anything is sent to the analysis
//! service: coordinate text entry and submission readiness of a draft.

use thiserror::Error;

use crate::models::{RequestPayload, SessionDraft};
use crate::types::Coordinate;

/// Validation failures detected locally
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a date for your event")]
    MissingDate,

    #[error("Please select at least one condition to analyze")]
    EmptyConditions,

    #[error("Latitude must be a number between -90 and 90 (got '{0}')")]
    InvalidLatitude(String),

    #[error("Longitude must be a number between -180 and 180 (got '{0}')")]
    InvalidLongitude(String),

    #[error("Unknown condition '{0}'")]
    UnknownCondition(String),

    #[error("Time must be HH:MM on a 24-hour clock (got '{0}')")]
    InvalidTime(String),
}

// ============================================================================
// Coordinate Validations
// ============================================================================

/// Parse free-text latitude/longitude in decimal degrees.
///
/// Both fields must parse and be in range; nothing is applied otherwise.
pub fn parse_coordinate_text(lat_text: &str, lon_text: &str) -> Result<Coordinate, ValidationError> {
    let lat = parse_degrees(lat_text)
        .ok_or_else(|| ValidationError::InvalidLatitude(lat_text.to_string()))?;
    let lon = parse_degrees(lon_text)
        .ok_or_else(|| ValidationError::InvalidLongitude(lon_text.to_string()))?;

    Coordinate::new(lat, lon).map_err(|e| match e {
        ValidationError::InvalidLatitude(_) => ValidationError::InvalidLatitude(lat_text.to_string()),
        ValidationError::InvalidLongitude(_) => {
            ValidationError::InvalidLongitude(lon_text.to_string())
        }
        other => other,
    })
}

fn parse_degrees(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// Submission Validations
// ============================================================================

/// Validate a draft and snapshot it into a request payload
pub fn validate_draft(draft: &SessionDraft) -> Result<RequestPayload, ValidationError> {
    let date = draft.date.ok_or(ValidationError::MissingDate)?;
    if draft.conditions.is_empty() {
        return Err(ValidationError::EmptyConditions);
    }

    Ok(RequestPayload {
        date,
        time: draft.time.clone(),
        lat: draft.coordinate.lat,
        lon: draft.coordinate.lon,
        conditions: draft.conditions.clone(),
    })
}
