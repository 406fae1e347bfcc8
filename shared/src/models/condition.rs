//! Weather-risk conditions selectable for analysis

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// One weather-risk category.
///
/// Declaration order is the canonical order used when a set of conditions is
/// serialized into a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConditionId {
    Rain,
    Temperature,
    ExtremeRain,
    HeatWave,
    Wind,
    Cold,
}

impl ConditionId {
    pub const ALL: [ConditionId; 6] = [
        ConditionId::Rain,
        ConditionId::Temperature,
        ConditionId::ExtremeRain,
        ConditionId::HeatWave,
        ConditionId::Wind,
        ConditionId::Cold,
    ];

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionId::Rain => "rain",
            ConditionId::Temperature => "temperature",
            ConditionId::ExtremeRain => "extreme_rain",
            ConditionId::HeatWave => "heat_wave",
            ConditionId::Wind => "wind",
            ConditionId::Cold => "cold",
        }
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCondition(s.to_string()))
    }
}

/// Set of conditions selected for one analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ConditionSet(BTreeSet<ConditionId>);

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition; returns false if it was already selected
    pub fn insert(&mut self, id: ConditionId) -> bool {
        self.0.insert(id)
    }

    /// Flip the selection state of a condition
    pub fn toggle(&mut self, id: ConditionId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    pub fn contains(&self, id: ConditionId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ConditionId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ConditionId> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = ConditionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
