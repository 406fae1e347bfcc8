//! Device location lookup
//!
//! A single-shot read of the device's approximate position. Failure is never
//! fatal to the caller; the selector falls back to the coordinate it has.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use spacerain_shared::Coordinate;
use thiserror::Error;

/// Why a position could not be read
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("Geolocation is not available on this device")]
    Unavailable,

    #[error("Geolocation lookup failed: {0}")]
    Lookup(String),

    #[error("Geolocation reported an invalid position: {0}")]
    InvalidPosition(String),
}

/// Source of the device's current position
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Provider for devices without a location capability
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl GeolocationProvider for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::Unavailable)
    }
}

/// Approximate position from an IP geolocation service (ip-api.com format)
#[derive(Clone)]
pub struct IpGeolocation {
    client: Client,
    service_url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

impl IpGeolocation {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            service_url: service_url.into(),
        }
    }
}

#[async_trait]
impl GeolocationProvider for IpGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        let response = self
            .client
            .get(&self.service_url)
            .send()
            .await
            .map_err(|e| GeolocationError::Lookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeolocationError::Lookup(format!(
                "service responded {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Lookup(e.to_string()))?;

        if data.status != "success" {
            return Err(GeolocationError::Lookup(
                data.message.unwrap_or_else(|| data.status.clone()),
            ));
        }

        let (Some(lat), Some(lon)) = (data.lat, data.lon) else {
            return Err(GeolocationError::InvalidPosition(
                "missing latitude or longitude".to_string(),
            ));
        };

        tracing::debug!(lat, lon, city = ?data.city, "ip geolocation resolved");
        Coordinate::new(lat, lon).map_err(|e| GeolocationError::InvalidPosition(e.to_string()))
    }
}
