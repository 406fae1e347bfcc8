//! Coordinate selection
//!
//! Keeps one authoritative coordinate consistent across every input channel:
//! the latitude/longitude text fields, map clicks, marker drags, the preset
//! list and device geolocation. Each channel produces a [`CoordinateUpdate`]
//! and all of them go through [`CoordinateSelector::apply`]; the last writer
//! wins.
//!
//! The map surface only exists while the coordinate-confirmation view is
//! open. Opening the view builds a fresh surface, closing it destroys it.

pub mod map;

use spacerain_shared::{parse_coordinate_text, Coordinate, PresetCity, ValidationError};

use crate::config::MapConfig;
use crate::external::GeolocationProvider;

pub use map::{HeadlessMap, HeadlessMapFactory, MapEvent, MapHandle, MapSurface, MapSurfaceFactory};

/// Decimal places kept from a device-reported position
pub const DEVICE_PRECISION: i32 = 4;

/// Where a coordinate update came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    Text,
    MapClick,
    MarkerDrag,
    Preset,
    Device,
}

impl CoordinateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateSource::Text => "text",
            CoordinateSource::MapClick => "map_click",
            CoordinateSource::MarkerDrag => "marker_drag",
            CoordinateSource::Preset => "preset",
            CoordinateSource::Device => "device",
        }
    }

    /// Whether the map view should be recentered on the new coordinate
    fn recenters_view(&self) -> bool {
        !matches!(self, CoordinateSource::MapClick | CoordinateSource::MarkerDrag)
    }
}

/// A validated coordinate reported by one input channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateUpdate {
    pub source: CoordinateSource,
    pub coordinate: Coordinate,
}

impl From<MapEvent> for CoordinateUpdate {
    fn from(event: MapEvent) -> Self {
        let source = match event {
            MapEvent::Click(_) => CoordinateSource::MapClick,
            MapEvent::MarkerDragEnd(_) => CoordinateSource::MarkerDrag,
        };
        Self {
            source,
            coordinate: event.position(),
        }
    }
}

/// Owner of the current coordinate and of the confirmation view's map
pub struct CoordinateSelector<F: MapSurfaceFactory> {
    coordinate: Coordinate,
    lat_text: String,
    lon_text: String,
    hint: Option<ValidationError>,
    factory: F,
    map: Option<MapHandle>,
    zoom: MapConfig,
}

impl<F: MapSurfaceFactory> CoordinateSelector<F> {
    pub fn new(initial: Coordinate, factory: F, zoom: MapConfig) -> Self {
        Self {
            coordinate: initial,
            lat_text: initial.lat.to_string(),
            lon_text: initial.lon.to_string(),
            hint: None,
            factory,
            map: None,
            zoom,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Current contents of the latitude and longitude fields
    pub fn text_fields(&self) -> (&str, &str) {
        (&self.lat_text, &self.lon_text)
    }

    /// Validation hint for the text fields, if the last entry was rejected
    pub fn hint(&self) -> Option<&ValidationError> {
        self.hint.as_ref()
    }

    /// Apply text entry from the latitude/longitude fields.
    ///
    /// If either field does not parse or is out of range, the previous
    /// coordinate is kept and a hint is recorded for display.
    pub fn set_from_text(&mut self, lat_text: &str, lon_text: &str) -> Result<Coordinate, ValidationError> {
        self.lat_text = lat_text.to_string();
        self.lon_text = lon_text.to_string();

        match parse_coordinate_text(lat_text, lon_text) {
            Ok(coordinate) => {
                self.apply(CoordinateUpdate {
                    source: CoordinateSource::Text,
                    coordinate,
                });
                Ok(coordinate)
            }
            Err(e) => {
                tracing::warn!(lat = lat_text, lon = lon_text, error = %e, "coordinate entry rejected");
                self.hint = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Apply a click or marker drag reported by the map surface
    pub fn set_from_map_interaction(&mut self, event: MapEvent) {
        self.apply(event.into());
    }

    /// Jump to a preset city's literal coordinate
    pub fn select_preset(&mut self, city: &PresetCity) {
        tracing::debug!(city = city.name, "preset selected");
        self.apply(CoordinateUpdate {
            source: CoordinateSource::Preset,
            coordinate: city.coordinate(),
        });
    }

    /// Read the device position once, then open the confirmation view.
    ///
    /// On failure the current coordinate is kept and the view opens anyway.
    pub async fn request_device_location(&mut self, provider: &dyn GeolocationProvider) {
        match provider.current_position().await {
            Ok(position) => {
                self.apply(CoordinateUpdate {
                    source: CoordinateSource::Device,
                    coordinate: position.rounded(DEVICE_PRECISION),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "device location unavailable, keeping current coordinate");
            }
        }
        self.open_confirmation();
    }

    /// The single state update every input channel goes through
    pub fn apply(&mut self, update: CoordinateUpdate) {
        let CoordinateUpdate { source, coordinate } = update;
        tracing::info!(source = source.as_str(), lat = coordinate.lat, lon = coordinate.lon, "coordinate updated");

        self.coordinate = coordinate;
        self.lat_text = coordinate.lat.to_string();
        self.lon_text = coordinate.lon.to_string();
        self.hint = None;

        if let Some(map) = self.map.as_mut() {
            map.set_marker(coordinate);
            if source.recenters_view() {
                let zoom = match source {
                    CoordinateSource::Preset => self.zoom.preset_zoom,
                    _ => self.zoom.default_zoom,
                };
                map.set_view(coordinate, zoom);
            }
        }
    }

    // ========================================================================
    // Coordinate-confirmation view
    // ========================================================================

    /// Open the confirmation view, building a new map surface.
    ///
    /// Does nothing if the view is already open.
    pub fn open_confirmation(&mut self) {
        if self.map.is_some() {
            return;
        }
        self.map = Some(MapHandle::open(&self.factory, self.coordinate, self.zoom.default_zoom));
    }

    /// Close the confirmation view and release its map surface
    pub fn close_confirmation(&mut self) -> Coordinate {
        self.map = None;
        self.coordinate
    }

    pub fn is_confirmation_open(&self) -> bool {
        self.map.is_some()
    }
}
