//! Map surface seam
//!
//! The tile engine is only used through coordinates: the selector pushes a
//! view center and marker position in, and the engine reports clicks and
//! marker drags out. A surface is owned by a [`MapHandle`] for as long as the
//! coordinate-confirmation view is open.

use spacerain_shared::Coordinate;

/// An interactive map instance with a single draggable marker
pub trait MapSurface {
    /// Center the view on a coordinate at the given zoom
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Move the marker
    fn set_marker(&mut self, position: Coordinate);

    /// Detach listeners and release the underlying map instance
    fn destroy(&mut self);
}

/// Creates map surfaces on demand
pub trait MapSurfaceFactory {
    fn create(&self, center: Coordinate, zoom: u8) -> Box<dyn MapSurface>;
}

/// Coordinate reported by the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    Click(Coordinate),
    MarkerDragEnd(Coordinate),
}

impl MapEvent {
    pub fn position(&self) -> Coordinate {
        match self {
            MapEvent::Click(position) | MapEvent::MarkerDragEnd(position) => *position,
        }
    }
}

/// Exclusive owner of a live map surface.
///
/// The surface is destroyed exactly once, when the handle is dropped.
pub struct MapHandle {
    surface: Box<dyn MapSurface>,
}

impl MapHandle {
    /// Create a surface centered on `center` with the marker placed there
    pub fn open(factory: &dyn MapSurfaceFactory, center: Coordinate, zoom: u8) -> Self {
        let mut surface = factory.create(center, zoom);
        surface.set_marker(center);
        tracing::debug!(lat = center.lat, lon = center.lon, zoom, "map surface created");
        Self { surface }
    }

    pub fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.surface.set_view(center, zoom);
    }

    pub fn set_marker(&mut self, position: Coordinate) {
        self.surface.set_marker(position);
    }
}

impl Drop for MapHandle {
    fn drop(&mut self) {
        self.surface.destroy();
        tracing::debug!("map surface destroyed");
    }
}

/// Map surface without a display, used by the command-line front end
#[derive(Debug, Default)]
pub struct HeadlessMap {
    center: Option<Coordinate>,
    marker: Option<Coordinate>,
    zoom: u8,
}

impl HeadlessMap {
    pub fn marker(&self) -> Option<Coordinate> {
        self.marker
    }
}

impl MapSurface for HeadlessMap {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = Some(center);
        self.zoom = zoom;
        tracing::trace!(lat = center.lat, lon = center.lon, zoom, "view moved");
    }

    fn set_marker(&mut self, position: Coordinate) {
        self.marker = Some(position);
        tracing::trace!(lat = position.lat, lon = position.lon, "marker moved");
    }

    fn destroy(&mut self) {
        self.center = None;
        self.marker = None;
    }
}

/// Factory for [`HeadlessMap`] surfaces
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessMapFactory;

impl MapSurfaceFactory for HeadlessMapFactory {
    fn create(&self, center: Coordinate, zoom: u8) -> Box<dyn MapSurface> {
        let mut map = HeadlessMap::default();
        map.set_view(center, zoom);
        Box::new(map)
    }
}
