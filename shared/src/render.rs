//! Result presentation
//!
//! Turns an [`AnalysisResponse`] into one card per condition. Every entry is
//! rendered on its own, so a failed condition only degrades its own card.

use std::fmt;

use serde::Serialize;

use crate::models::{
    AnalysisResponse, ConditionEntry, ConditionFailure, ConditionId, ConditionResult,
    ProbabilitySummary, TemperatureSummary,
};

/// Display label and icon for a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionProfile {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Profile used for condition ids the registry does not know
pub const DEFAULT_PROFILE: ConditionProfile = ConditionProfile {
    label: "Condition",
    icon: "circle-help",
};

const PROFILES: &[(ConditionId, ConditionProfile)] = &[
    (ConditionId::Rain, ConditionProfile { label: "Rain", icon: "cloud-rain" }),
    (ConditionId::Temperature, ConditionProfile { label: "Temperature", icon: "thermometer" }),
    (ConditionId::ExtremeRain, ConditionProfile { label: "Extreme rain", icon: "cloud-lightning" }),
    (ConditionId::HeatWave, ConditionProfile { label: "Heat wave", icon: "sun" }),
    (ConditionId::Wind, ConditionProfile { label: "Strong wind", icon: "wind" }),
    (ConditionId::Cold, ConditionProfile { label: "Extreme cold", icon: "snowflake" }),
];

/// Look up the presentation profile for a wire condition id
pub fn profile_for(id: &str) -> ConditionProfile {
    id.parse::<ConditionId>()
        .ok()
        .and_then(|condition| {
            PROFILES
                .iter()
                .find(|(known, _)| *known == condition)
                .map(|(_, profile)| *profile)
        })
        .unwrap_or(DEFAULT_PROFILE)
}

/// Measurement unit of a rendered value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Celsius,
    Millimetres,
    MetresPerSecond,
    DaysPerMonth,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Millimetres => "mm",
            Unit::MetresPerSecond => "m/s",
            Unit::DaysPerMonth => "days/month",
        }
    }
}

/// A value with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

/// Rendered content of a card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardBody {
    /// Failed condition; only the message is shown
    Degraded { message: String },
    Temperature {
        average: Measurement,
        minimum: Measurement,
        maximum: Measurement,
        message: String,
    },
    Probability {
        probability_percent: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        frequency: Option<Measurement>,
        #[serde(skip_serializing_if = "Option::is_none")]
        extremum: Option<Measurement>,
        #[serde(skip_serializing_if = "Option::is_none")]
        average_speed: Option<Measurement>,
        #[serde(skip_serializing_if = "Option::is_none")]
        peak_temperature: Option<Measurement>,
        #[serde(skip_serializing_if = "Option::is_none")]
        lowest_temperature: Option<Measurement>,
        message: String,
    },
}

/// One presentation unit of the result view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub condition_id: String,
    pub profile: ConditionProfile,
    pub body: CardBody,
}

impl ResultCard {
    pub fn is_degraded(&self) -> bool {
        matches!(self.body, CardBody::Degraded { .. })
    }
}

/// Render every entry of a response, in response order
pub fn render_results(response: &AnalysisResponse) -> Vec<ResultCard> {
    response.probabilities.iter().map(render_entry).collect()
}

/// Render a single `(conditionId, result)` pair
pub fn render_entry(entry: &ConditionEntry) -> ResultCard {
    let body = match &entry.result {
        ConditionResult::Failed(failure) => degraded(failure),
        ConditionResult::Temperature(summary) => temperature(summary),
        ConditionResult::Probability(summary) => probability(entry.condition, summary),
    };

    ResultCard {
        condition_id: entry.id.clone(),
        profile: profile_for(&entry.id),
        body,
    }
}

fn degraded(failure: &ConditionFailure) -> CardBody {
    CardBody::Degraded {
        message: failure.message.clone(),
    }
}

fn temperature(summary: &TemperatureSummary) -> CardBody {
    CardBody::Temperature {
        average: Measurement::new(summary.avg, Unit::Celsius),
        minimum: Measurement::new(summary.min, Unit::Celsius),
        maximum: Measurement::new(summary.max, Unit::Celsius),
        message: summary.message.clone(),
    }
}

fn probability(condition: Option<ConditionId>, summary: &ProbabilitySummary) -> CardBody {
    let extremum_unit = match condition {
        Some(ConditionId::Wind) => Unit::MetresPerSecond,
        _ => Unit::Millimetres,
    };

    CardBody::Probability {
        probability_percent: summary.probability,
        frequency: summary
            .avg_days
            .map(|days| Measurement::new(days, Unit::DaysPerMonth)),
        extremum: summary
            .max_recorded
            .map(|value| Measurement::new(value, extremum_unit)),
        average_speed: summary
            .avg_speed
            .map(|speed| Measurement::new(speed, Unit::MetresPerSecond)),
        peak_temperature: summary
            .max_temp
            .map(|temp| Measurement::new(temp, Unit::Celsius)),
        lowest_temperature: summary
            .min_temp
            .map(|temp| Measurement::new(temp, Unit::Celsius)),
        message: summary.message.clone(),
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.profile.icon, self.profile.label)?;
        match &self.body {
            CardBody::Degraded { message } => writeln!(f, "  unavailable: {}", message),
            CardBody::Temperature {
                average,
                minimum,
                maximum,
                message,
            } => {
                writeln!(f, "  average: {}", average)?;
                writeln!(f, "  min: {}  max: {}", minimum, maximum)?;
                writeln!(f, "  {}", message)
            }
            CardBody::Probability {
                probability_percent,
                frequency,
                extremum,
                average_speed,
                peak_temperature,
                lowest_temperature,
                message,
            } => {
                writeln!(f, "  probability: {}%", probability_percent)?;
                if let Some(frequency) = frequency {
                    writeln!(f, "  frequency: {}", frequency)?;
                }
                if let Some(speed) = average_speed {
                    writeln!(f, "  average speed: {}", speed)?;
                }
                if let Some(extremum) = extremum {
                    writeln!(f, "  max recorded: {}", extremum)?;
                }
                if let Some(peak) = peak_temperature {
                    writeln!(f, "  peak temperature: {}", peak)?;
                }
                if let Some(lowest) = lowest_temperature {
                    writeln!(f, "  lowest temperature: {}", lowest)?;
                }
                writeln!(f, "  {}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(probabilities: serde_json::Value) -> AnalysisResponse {
        serde_json::from_value(json!({
            "location": "Santiago",
            "date": "2025-06-01",
            "time": "14:00",
            "probabilities": probabilities,
        }))
        .unwrap()
    }

    #[test]
    fn test_scenario_two_cards() {
        let cards = render_results(&response(json!({
            "rain": {"probability": 40, "avgDays": 5, "maxRecorded": 30, "message": "m"},
            "temperature": {"avg": 18, "min": 10, "max": 25, "message": "m"}
        })));

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].profile.label, "Rain");
        assert_eq!(
            cards[0].body,
            CardBody::Probability {
                probability_percent: 40.0,
                frequency: Some(Measurement::new(5.0, Unit::DaysPerMonth)),
                extremum: Some(Measurement::new(30.0, Unit::Millimetres)),
                average_speed: None,
                peak_temperature: None,
                lowest_temperature: None,
                message: "m".to_string(),
            }
        );
        assert_eq!(
            cards[1].body,
            CardBody::Temperature {
                average: Measurement::new(18.0, Unit::Celsius),
                minimum: Measurement::new(10.0, Unit::Celsius),
                maximum: Measurement::new(25.0, Unit::Celsius),
                message: "m".to_string(),
            }
        );
    }

    #[test]
    fn test_failed_entry_does_not_affect_siblings() {
        let cards = render_results(&response(json!({
            "rain": {"error": "No data", "message": "Precipitation unavailable"},
            "wind": {"probability": 15, "avgSpeed": 6, "maxSpeed": 20, "message": "breezy"},
            "temperature": {"avg": 18, "min": 10, "max": 25, "message": "mild"}
        })));

        assert_eq!(cards.len(), 3);
        assert_eq!(
            cards[0].body,
            CardBody::Degraded {
                message: "Precipitation unavailable".to_string()
            }
        );
        assert!(!cards[1].is_degraded());
        assert!(!cards[2].is_degraded());
    }

    #[test]
    fn test_zero_values_are_present() {
        let cards = render_results(&response(json!({
            "cold": {"probability": 0, "avgDays": 0, "maxRecorded": 0, "message": "m"}
        })));
        let CardBody::Probability { frequency, extremum, .. } = &cards[0].body else {
            panic!("expected probability card");
        };
        assert_eq!(*frequency, Some(Measurement::new(0.0, Unit::DaysPerMonth)));
        assert_eq!(*extremum, Some(Measurement::new(0.0, Unit::Millimetres)));
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let cards = render_results(&response(json!({
            "extreme_rain": {"probability": 3, "message": "m"}
        })));
        let text = cards[0].to_string();
        assert!(text.contains("probability: 3%"));
        assert!(!text.contains("frequency"));
        assert!(!text.contains("max recorded"));
    }

    #[test]
    fn test_wind_extremum_uses_speed_unit() {
        let cards = render_results(&response(json!({
            "wind": {"probability": 15, "maxRecorded": 20, "message": "m"},
            "rain": {"probability": 15, "maxRecorded": 20, "message": "m"}
        })));
        let units: Vec<Unit> = cards
            .iter()
            .filter_map(|card| match &card.body {
                CardBody::Probability { extremum: Some(m), .. } => Some(m.unit),
                _ => None,
            })
            .collect();
        assert_eq!(units, [Unit::MetresPerSecond, Unit::Millimetres]);
    }

    #[test]
    fn test_unknown_condition_uses_default_profile() {
        let cards = render_results(&response(json!({
            "fog": {"probability": 8, "message": "m"}
        })));
        assert_eq!(cards[0].profile, DEFAULT_PROFILE);
        assert_eq!(cards[0].condition_id, "fog");
    }

    #[test]
    fn test_card_serializes_with_kind_tag() {
        let cards = render_results(&response(json!({
            "rain": {"error": "x", "message": "gone"}
        })));
        let value = serde_json::to_value(&cards[0]).unwrap();
        assert_eq!(value["body"]["kind"], "degraded");
        assert_eq!(value["body"]["message"], "gone");
        assert_eq!(value["profile"]["icon"], "cloud-rain");
    }
}
