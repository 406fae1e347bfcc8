//! WebAssembly module for SpaceRain
//!
//! Provides client-side computation for a browser front end:
//! - Coordinate text parsing
//! - Draft validation and request payload construction
//! - Result card rendering
//!
//! Values cross the boundary as JSON strings.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use spacerain_shared::{
    parse_coordinate_text, validate_draft, AnalysisResponse, ConditionId, ConditionSet,
    Coordinate, EventTime, SessionDraft, PRESET_CITIES,
};

/// Parse latitude/longitude text into a coordinate JSON object
#[wasm_bindgen]
pub fn parse_coordinate(lat_text: &str, lon_text: &str) -> Result<String, JsValue> {
    parse_coordinate_json(lat_text, lon_text).map_err(reject)
}

/// Validate a draft and return the request payload JSON to send.
///
/// `date` may be empty when no date has been picked; `conditions_json` is a
/// JSON array of condition ids.
#[wasm_bindgen]
pub fn build_request(
    date: &str,
    time: &str,
    lat: f64,
    lon: f64,
    conditions_json: &str,
) -> Result<String, JsValue> {
    build_request_json(date, time, lat, lon, conditions_json).map_err(reject)
}

/// Render an analysis response JSON into result card JSON
#[wasm_bindgen]
pub fn render_results(response_json: &str) -> Result<String, JsValue> {
    render_results_json(response_json).map_err(reject)
}

/// Preset cities offered in the confirmation view, as JSON
#[wasm_bindgen]
pub fn preset_cities() -> String {
    serde_json::to_string(PRESET_CITIES).unwrap_or_else(|_| "[]".to_string())
}

fn reject(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

// ============================================================================
// JSON Bridges
// ============================================================================

fn parse_coordinate_json(lat_text: &str, lon_text: &str) -> Result<String, String> {
    let coordinate = parse_coordinate_text(lat_text, lon_text).map_err(|e| e.to_string())?;
    serde_json::to_string(&coordinate).map_err(|e| e.to_string())
}

fn build_request_json(
    date: &str,
    time: &str,
    lat: f64,
    lon: f64,
    conditions_json: &str,
) -> Result<String, String> {
    let date = match date.trim() {
        "" => None,
        text => Some(
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| format!("Date must be YYYY-MM-DD (got '{}')", text))?,
        ),
    };
    let time = time.parse::<EventTime>().map_err(|e| e.to_string())?;
    let coordinate = Coordinate::new(lat, lon).map_err(|e| e.to_string())?;

    let ids: Vec<String> = serde_json::from_str(conditions_json)
        .map_err(|e| format!("Invalid conditions JSON: {}", e))?;
    let conditions = ids
        .iter()
        .map(|id| id.parse::<ConditionId>())
        .collect::<Result<ConditionSet, _>>()
        .map_err(|e| e.to_string())?;

    let payload = validate_draft(&SessionDraft {
        date,
        time,
        coordinate,
        conditions,
    })
    .map_err(|e| e.to_string())?;

    serde_json::to_string(&payload).map_err(|e| e.to_string())
}

fn render_results_json(response_json: &str) -> Result<String, String> {
    let response: AnalysisResponse = serde_json::from_str(response_json)
        .map_err(|e| format!("Invalid response JSON: {}", e))?;
    let cards = spacerain_shared::render_results(&response);
    serde_json::to_string(&cards).map_err(|e| e.to_string())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_rejection_crosses_boundary() {
        let err = parse_coordinate("north", "0").unwrap_err();
        assert!(err.as_string().unwrap().contains("north"));
    }
}
