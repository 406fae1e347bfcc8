//! Common types used across the platform

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::ValidationError;

/// Decimal-degree GPS coordinate (WGS84)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
pub struct Coordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the valid degree ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        let coordinate = Self { lat, lon };
        let rejected = coordinate
            .validate()
            .err()
            .map(|errors| errors.field_errors().keys().copied().collect::<Vec<_>>())
            .unwrap_or_default();

        // Range checks let NaN through, so finiteness is checked separately.
        if !lat.is_finite() || rejected.contains(&"lat") {
            return Err(ValidationError::InvalidLatitude(lat.to_string()));
        }
        if !lon.is_finite() || rejected.contains(&"lon") {
            return Err(ValidationError::InvalidLongitude(lon.to_string()));
        }
        Ok(coordinate)
    }

    /// Round both components to `places` decimal places
    pub fn rounded(&self, places: i32) -> Self {
        Self {
            lat: round_to(self.lat, places),
            lon: round_to(self.lon, places),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// Round a value to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A named location offered in the coordinate-confirmation view
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PresetCity {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl PresetCity {
    /// The preset's literal coordinate
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Preset cities, in display order
pub const PRESET_CITIES: &[PresetCity] = &[
    PresetCity { name: "Santiago", lat: -33.4489, lon: -70.6693 },
    PresetCity { name: "Valparaíso", lat: -33.0472, lon: -71.6127 },
    PresetCity { name: "Concepción", lat: -36.8201, lon: -73.0444 },
    PresetCity { name: "La Serena", lat: -29.9027, lon: -71.2519 },
    PresetCity { name: "Antofagasta", lat: -23.6509, lon: -70.3975 },
    PresetCity { name: "Puerto Montt", lat: -41.4689, lon: -72.9411 },
    PresetCity { name: "Punta Arenas", lat: -53.1638, lon: -70.9171 },
];

/// Coordinate used before any source has reported one (Santiago)
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    lat: -33.4489,
    lon: -70.6693,
};

/// Look up a preset by name, ignoring case
pub fn find_preset(name: &str) -> Option<&'static PresetCity> {
    let wanted = name.trim().to_lowercase();
    PRESET_CITIES
        .iter()
        .find(|city| city.name.to_lowercase() == wanted)
}
