//! Analysis response models
//!
//! The service returns one loosely shaped JSON object per condition. Each entry
//! is decoded into a [`ConditionResult`] chosen by its condition id, with a
//! separate variant for entries that carry an `error` marker. Decoding is
//! per-entry: a malformed entry becomes a failure for that condition only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::ConditionId;

/// Message shown when a failed entry does not provide one
pub const DEFAULT_FAILURE_MESSAGE: &str = "No data available for this condition";

/// Successful response of the analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAnalysisResponse", into = "RawAnalysisResponse")]
pub struct AnalysisResponse {
    pub location: String,
    pub date: String,
    pub time: String,
    /// Per-condition results, in the order the service returned them
    pub probabilities: Vec<ConditionEntry>,
}

impl AnalysisResponse {
    /// Look up the result for a condition id
    pub fn get(&self, id: &str) -> Option<&ConditionResult> {
        self.probabilities
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.result)
    }
}

/// One `(conditionId, result)` pair of a response
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionEntry {
    /// Identifier as sent by the service
    pub id: String,
    /// Known condition, if the identifier is recognised
    pub condition: Option<ConditionId>,
    pub result: ConditionResult,
}

impl ConditionEntry {
    /// Decode a raw entry using its condition id to pick the shape
    pub fn decode(id: String, value: Value) -> Self {
        let condition = id.parse::<ConditionId>().ok();
        let result = ConditionResult::decode(condition, value);
        Self {
            id,
            condition,
            result,
        }
    }
}

/// Result for a single condition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConditionResult {
    Temperature(TemperatureSummary),
    Probability(ProbabilitySummary),
    Failed(ConditionFailure),
}

impl ConditionResult {
    fn decode(condition: Option<ConditionId>, value: Value) -> Self {
        if value.get("error").is_some_and(|marker| !marker.is_null()) {
            return ConditionResult::Failed(ConditionFailure::from_value(&value));
        }

        let temperature_shaped = match condition {
            Some(ConditionId::Temperature) => true,
            Some(_) => false,
            None => value.get("probability").is_none() && value.get("avg").is_some(),
        };

        let decoded = if temperature_shaped {
            serde_json::from_value(value).map(ConditionResult::Temperature)
        } else {
            serde_json::from_value(value).map(ConditionResult::Probability)
        };

        decoded.unwrap_or_else(|e| {
            ConditionResult::Failed(ConditionFailure {
                error: "malformed result".to_string(),
                message: e.to_string(),
            })
        })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ConditionResult::Failed(_))
    }
}

/// Temperature statistics in degrees Celsius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub message: String,
}

/// Probability of a weather-risk condition occurring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilitySummary {
    /// Percentage, 0-100
    pub probability: f64,
    /// Average number of days per month the condition occurs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_days: Option<f64>,
    /// Recorded extremum; speed for wind, depth for everything else
    #[serde(default, alias = "maxSpeed", skip_serializing_if = "Option::is_none")]
    pub max_recorded: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    pub message: String,
}

/// Failure marker for a single condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionFailure {
    pub error: String,
    pub message: String,
}

impl ConditionFailure {
    fn from_value(value: &Value) -> Self {
        let error = match value.get("error") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
        Self { error, message }
    }
}

/// Wire form of [`AnalysisResponse`]
#[derive(Serialize, Deserialize)]
struct RawAnalysisResponse {
    location: String,
    date: String,
    time: String,
    #[serde(default)]
    probabilities: Map<String, Value>,
}

impl From<RawAnalysisResponse> for AnalysisResponse {
    fn from(raw: RawAnalysisResponse) -> Self {
        Self {
            location: raw.location,
            date: raw.date,
            time: raw.time,
            probabilities: raw
                .probabilities
                .into_iter()
                .map(|(id, value)| ConditionEntry::decode(id, value))
                .collect(),
        }
    }
}

impl From<AnalysisResponse> for RawAnalysisResponse {
    fn from(response: AnalysisResponse) -> Self {
        let probabilities = response
            .probabilities
            .into_iter()
            .map(|entry| {
                let mut value = serde_json::to_value(&entry.result).unwrap_or(Value::Null);
                if entry.condition == Some(ConditionId::Wind) {
                    rename_key(&mut value, "maxRecorded", "maxSpeed");
                }
                (entry.id, value)
            })
            .collect();
        Self {
            location: response.location,
            date: response.date,
            time: response.time,
            probabilities,
        }
    }
}

/// The service reports the wind extremum as `maxSpeed`
fn rename_key(value: &mut Value, from: &str, to: &str) {
    if let Some(object) = value.as_object_mut() {
        if let Some(field) = object.remove(from) {
            object.insert(to.to_string(), field);
        }
    }
}
