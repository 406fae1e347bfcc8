//! Simulated analysis results for local development
//!
//! Produces plausible per-condition values without touching any historical
//! dataset, so the client can be exercised end-to-end offline.

use chrono::Datelike;
use rand::Rng;
use spacerain_shared::{
    round_to, AnalysisResponse, ConditionEntry, ConditionId, ConditionResult, ProbabilitySummary,
    RequestPayload, TemperatureSummary,
};

/// Build a simulated response for every requested condition
pub fn simulate<R: Rng + ?Sized>(payload: &RequestPayload, rng: &mut R) -> AnalysisResponse {
    let probabilities = payload
        .conditions
        .iter()
        .map(|condition| ConditionEntry {
            id: condition.as_str().to_string(),
            condition: Some(condition),
            result: simulate_condition(condition, payload, rng),
        })
        .collect();

    AnalysisResponse {
        location: format!("{}, {}", payload.lat, payload.lon),
        date: payload.date.to_string(),
        time: payload.time.to_string(),
        probabilities,
    }
}

fn simulate_condition<R: Rng + ?Sized>(
    condition: ConditionId,
    payload: &RequestPayload,
    rng: &mut R,
) -> ConditionResult {
    match condition {
        ConditionId::Temperature => {
            // Spring months run warmer in the southern hemisphere.
            let base = if (9..=11).contains(&payload.date.month()) {
                18.0
            } else {
                15.0
            };
            let avg = base + rng.random_range(-3.0..5.0);
            let min = avg - rng.random_range(5.0..8.0);
            let max = avg + rng.random_range(5.0..10.0);
            ConditionResult::Temperature(TemperatureSummary {
                avg: round_to(avg, 1),
                min: round_to(min, 1),
                max: round_to(max, 1),
                message: positive_message(condition, avg).to_string(),
            })
        }
        ConditionId::Rain => {
            let p = rng.random_range(15.0..35.0);
            ConditionResult::Probability(ProbabilitySummary {
                avg_days: Some(round_to(p * 0.3, 1)),
                max_recorded: Some(round_to(rng.random_range(5.0..25.0), 1)),
                ..probability(condition, p)
            })
        }
        ConditionId::ExtremeRain => {
            let p = rng.random_range(2.0..8.0);
            ConditionResult::Probability(ProbabilitySummary {
                avg_days: Some(round_to(p * 0.2, 1)),
                max_recorded: Some(round_to(rng.random_range(20.0..50.0), 1)),
                ..probability(condition, p)
            })
        }
        ConditionId::HeatWave => {
            let p = rng.random_range(3.0..12.0);
            ConditionResult::Probability(ProbabilitySummary {
                avg_days: Some(round_to(p * 0.25, 1)),
                max_temp: Some(round_to(rng.random_range(28.0..35.0), 1)),
                ..probability(condition, p)
            })
        }
        ConditionId::Wind => {
            let p = rng.random_range(10.0..25.0);
            ConditionResult::Probability(ProbabilitySummary {
                avg_speed: Some(round_to(rng.random_range(4.0..8.0), 1)),
                max_recorded: Some(round_to(rng.random_range(15.0..25.0), 1)),
                ..probability(condition, p)
            })
        }
        ConditionId::Cold => {
            let p = rng.random_range(0.0..5.0);
            ConditionResult::Probability(ProbabilitySummary {
                avg_days: Some(round_to(p * 0.1, 1)),
                min_temp: Some(round_to(rng.random_range(0.0..5.0), 1)),
                ..probability(condition, p)
            })
        }
    }
}

fn probability(condition: ConditionId, p: f64) -> ProbabilitySummary {
    ProbabilitySummary {
        probability: round_to(p, 1),
        avg_days: None,
        max_recorded: None,
        avg_speed: None,
        max_temp: None,
        min_temp: None,
        message: positive_message(condition, p).to_string(),
    }
}

/// Upbeat message for a condition's value.
///
/// Temperature uses the average in °C; every other condition uses its
/// probability in percent.
pub fn positive_message(condition: ConditionId, value: f64) -> &'static str {
    let (low, medium, high) = match condition {
        ConditionId::Temperature => return temperature_message(value),
        ConditionId::Rain => (
            "Mostly clear skies. Perfect for outdoor plans",
            "A fine chance to enjoy the sound of the rain",
            "Great for nature. The ecosystem will be grateful for the water",
        ),
        ConditionId::ExtremeRain => (
            "Very low probability. Enjoy with peace of mind",
            "Stay informed, but no need to worry",
            "A natural spectacle in the making",
        ),
        ConditionId::HeatWave => (
            "Pleasant weather without extreme temperatures",
            "Perfect for heat lovers",
            "Ideal for the beach and the pool",
        ),
        ConditionId::Wind => (
            "Calm and peaceful surroundings",
            "Perfect for flying kites or windsurfing",
            "Wind lovers will enjoy it",
        ),
        ConditionId::Cold => (
            "Very low probability of extreme cold",
            "A chance for warm clothes and hot drinks",
            "Possible wintry weather for cold lovers",
        ),
    };

    if value < 20.0 {
        low
    } else if value < 50.0 {
        medium
    } else {
        high
    }
}

fn temperature_message(avg_celsius: f64) -> &'static str {
    if avg_celsius < 15.0 {
        "Cool weather, ideal for staying active"
    } else if avg_celsius < 25.0 {
        "Perfect temperature for any activity"
    } else {
        "Warm weather, ideal for enjoying the outdoors"
    }
}
