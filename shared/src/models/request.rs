//! Analysis request models

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::ConditionSet;
use crate::types::{Coordinate, DEFAULT_COORDINATE};
use crate::validation::ValidationError;

/// Event time of day, `HH:MM` on a 24-hour clock.
///
/// Holds the text exactly as entered once it has been checked, so it is sent
/// to the service verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventTime(String);

impl EventTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventTime {
    fn default() -> Self {
        Self("12:00".to_string())
    }
}

impl FromStr for EventTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono tolerates padding inside numeric fields, so the layout is checked first.
        let well_formed = matches!(
            s.as_bytes(),
            [h1, h2, b':', m1, m2] if [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
        ) && NaiveTime::parse_from_str(s, "%H:%M").is_ok();
        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::InvalidTime(s.to_string()))
        }
    }
}

impl TryFrom<String> for EventTime {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EventTime> for String {
    fn from(time: EventTime) -> Self {
        time.0
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mutable draft of an analysis request, edited by the user
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDraft {
    pub date: Option<NaiveDate>,
    pub time: EventTime,
    pub coordinate: Coordinate,
    pub conditions: ConditionSet,
}

impl Default for SessionDraft {
    fn default() -> Self {
        Self {
            date: None,
            time: EventTime::default(),
            coordinate: DEFAULT_COORDINATE,
            conditions: ConditionSet::new(),
        }
    }
}

/// Body of `POST /api/calculate-probability`.
///
/// An immutable snapshot of a [`SessionDraft`] taken at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub date: NaiveDate,
    pub time: EventTime,
    pub lat: f64,
    pub lon: f64,
    pub conditions: ConditionSet,
}

impl RequestPayload {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }
}
