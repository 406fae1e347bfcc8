//! Coordinate selection integration tests
//!
//! Tests for the coordinate selector including:
//! - Map surface lifecycle across open/close cycles
//! - Marker and view synchronization per input channel
//! - Text entry properties over the full coordinate range

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use spacerain_client::config::MapConfig;
use spacerain_client::selector::{MapEvent, MapSurface, MapSurfaceFactory};
use spacerain_client::CoordinateSelector;
use spacerain_shared::{find_preset, Coordinate, DEFAULT_COORDINATE};

const ZOOM: MapConfig = MapConfig {
    default_zoom: 10,
    preset_zoom: 12,
};

/// Calls observed on map surfaces, tagged with the surface number
#[derive(Debug, Clone, PartialEq)]
enum MapCall {
    Create(usize, Coordinate, u8),
    View(usize, Coordinate, u8),
    Marker(usize, Coordinate),
    Destroy(usize),
}

type MapLog = Rc<RefCell<Vec<MapCall>>>;

struct RecordingSurface {
    id: usize,
    log: MapLog,
}

impl MapSurface for RecordingSurface {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.log.borrow_mut().push(MapCall::View(self.id, center, zoom));
    }

    fn set_marker(&mut self, position: Coordinate) {
        self.log.borrow_mut().push(MapCall::Marker(self.id, position));
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().push(MapCall::Destroy(self.id));
    }
}

#[derive(Default)]
struct RecordingFactory {
    log: MapLog,
    created: RefCell<usize>,
}

impl MapSurfaceFactory for RecordingFactory {
    fn create(&self, center: Coordinate, zoom: u8) -> Box<dyn MapSurface> {
        let id = {
            let mut created = self.created.borrow_mut();
            *created += 1;
            *created
        };
        self.log.borrow_mut().push(MapCall::Create(id, center, zoom));
        Box::new(RecordingSurface {
            id,
            log: Rc::clone(&self.log),
        })
    }
}

fn recording_selector() -> (CoordinateSelector<RecordingFactory>, MapLog) {
    let factory = RecordingFactory::default();
    let log = Rc::clone(&factory.log);
    (CoordinateSelector::new(DEFAULT_COORDINATE, factory, ZOOM), log)
}

fn count(log: &MapLog, pred: impl Fn(&MapCall) -> bool) -> usize {
    log.borrow().iter().filter(|call| pred(call)).count()
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_each_open_builds_a_fresh_surface() {
    let (mut selector, log) = recording_selector();

    for _ in 0..3 {
        selector.open_confirmation();
        selector.close_confirmation();
    }

    assert_eq!(count(&log, |c| matches!(c, MapCall::Create(..))), 3);
    assert_eq!(count(&log, |c| matches!(c, MapCall::Destroy(..))), 3);
    // Surfaces are numbered in creation order; each is destroyed before the next exists.
    let lifecycle: Vec<MapCall> = log
        .borrow()
        .iter()
        .filter(|c| matches!(c, MapCall::Create(..) | MapCall::Destroy(..)))
        .cloned()
        .collect();
    assert_eq!(
        lifecycle,
        [
            MapCall::Create(1, DEFAULT_COORDINATE, 10),
            MapCall::Destroy(1),
            MapCall::Create(2, DEFAULT_COORDINATE, 10),
            MapCall::Destroy(2),
            MapCall::Create(3, DEFAULT_COORDINATE, 10),
            MapCall::Destroy(3),
        ]
    );
}

#[test]
fn test_reopening_while_open_does_not_duplicate_surface() {
    let (mut selector, log) = recording_selector();
    selector.open_confirmation();
    selector.open_confirmation();
    assert_eq!(count(&log, |c| matches!(c, MapCall::Create(..))), 1);
}

#[test]
fn test_dropping_selector_releases_open_surface() {
    let (mut selector, log) = recording_selector();
    selector.open_confirmation();
    drop(selector);
    assert_eq!(log.borrow().last(), Some(&MapCall::Destroy(1)));
}

#[test]
fn test_updates_while_closed_do_not_touch_a_map() {
    let (mut selector, log) = recording_selector();
    selector.set_from_text("10", "20").unwrap();
    selector.select_preset(find_preset("Antofagasta").unwrap());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_open_view_starts_at_current_coordinate() {
    let (mut selector, log) = recording_selector();
    selector.set_from_text("-41.4689", "-72.9411").unwrap();
    selector.open_confirmation();
    let here = Coordinate { lat: -41.4689, lon: -72.9411 };
    assert_eq!(
        log.borrow().as_slice(),
        [MapCall::Create(1, here, 10), MapCall::Marker(1, here)]
    );
}

// ============================================================================
// Synchronization Tests
// ============================================================================

#[test]
fn test_map_click_moves_marker_without_recentering() {
    let (mut selector, log) = recording_selector();
    selector.open_confirmation();
    log.borrow_mut().clear();

    let clicked = Coordinate { lat: -30.0, lon: -71.0 };
    selector.set_from_map_interaction(MapEvent::Click(clicked));

    assert_eq!(selector.coordinate(), clicked);
    assert_eq!(selector.text_fields(), ("-30", "-71"));
    assert_eq!(log.borrow().as_slice(), [MapCall::Marker(1, clicked)]);
}

#[test]
fn test_marker_drag_updates_coordinate() {
    let (mut selector, _log) = recording_selector();
    selector.open_confirmation();
    let dropped = Coordinate { lat: 12.3456, lon: 65.4321 };
    selector.set_from_map_interaction(MapEvent::MarkerDragEnd(dropped));
    assert_eq!(selector.coordinate(), dropped);
}

#[test]
fn test_preset_jumps_view_to_literal_coordinate() {
    let (mut selector, log) = recording_selector();
    selector.open_confirmation();
    log.borrow_mut().clear();

    let city = find_preset("Concepción").unwrap();
    selector.select_preset(city);

    let expected = Coordinate { lat: -36.8201, lon: -73.0444 };
    assert_eq!(selector.coordinate(), expected);
    assert_eq!(
        log.borrow().as_slice(),
        [MapCall::Marker(1, expected), MapCall::View(1, expected, 12)]
    );
}

#[test]
fn test_rejected_text_leaves_map_untouched() {
    let (mut selector, log) = recording_selector();
    selector.open_confirmation();
    log.borrow_mut().clear();

    assert!(selector.set_from_text("-33.4", "not a number").is_err());
    assert!(log.borrow().is_empty());
    assert_eq!(selector.coordinate(), DEFAULT_COORDINATE);
    assert!(selector.hint().is_some());
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    fn selector() -> CoordinateSelector<RecordingFactory> {
        CoordinateSelector::new(DEFAULT_COORDINATE, RecordingFactory::default(), ZOOM)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: In-range text stores exactly the parsed values
        #[test]
        fn prop_text_entry_stores_parsed_values(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0
        ) {
            let mut s = selector();
            let lat_text = lat.to_string();
            let lon_text = lon.to_string();

            prop_assert!(s.set_from_text(&lat_text, &lon_text).is_ok());
            prop_assert_eq!(
                s.coordinate(),
                Coordinate {
                    lat: lat_text.parse::<f64>().unwrap(),
                    lon: lon_text.parse::<f64>().unwrap(),
                }
            );
        }

        /// Property: Out-of-range latitude never changes the coordinate
        #[test]
        fn prop_out_of_range_latitude_keeps_previous(
            lat in prop_oneof![-1.0e6f64..-90.000001, 90.000001f64..1.0e6],
            lon in -180.0f64..=180.0
        ) {
            let mut s = selector();
            let before = s.coordinate();
            prop_assert!(s.set_from_text(&lat.to_string(), &lon.to_string()).is_err());
            prop_assert_eq!(s.coordinate(), before);
        }

        /// Property: Out-of-range longitude never changes the coordinate
        #[test]
        fn prop_out_of_range_longitude_keeps_previous(
            lat in -90.0f64..=90.0,
            lon in prop_oneof![-1.0e6f64..-180.000001, 180.000001f64..1.0e6]
        ) {
            let mut s = selector();
            let before = s.coordinate();
            prop_assert!(s.set_from_text(&lat.to_string(), &lon.to_string()).is_err());
            prop_assert_eq!(s.coordinate(), before);
        }

        /// Property: Unparsable text never changes the coordinate
        #[test]
        fn prop_unparsable_text_keeps_previous(
            garbage in "[a-zA-Z ,;]{1,12}",
            lon in -180.0f64..=180.0
        ) {
            let mut s = selector();
            let before = s.coordinate();
            prop_assert!(s.set_from_text(&garbage, &lon.to_string()).is_err());
            prop_assert_eq!(s.coordinate(), before);
        }
    }
}
