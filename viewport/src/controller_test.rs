#![allow(clippy::float_cmp)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use super::*;
use crate::consts::{ZOOM_STEP_IN, ZOOM_STEP_OUT};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

struct FakeBounds(Rc<Cell<Option<ViewBounds>>>);

impl BoundsSource for FakeBounds {
    fn view_bounds(&self) -> Option<ViewBounds> {
        self.0.get()
    }
}

struct RecordingSink(Rc<RefCell<Vec<(String, Value)>>>);

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &str, payload: Value) {
        self.0.borrow_mut().push((event.to_owned(), payload));
    }
}

struct Harness {
    bounds: Rc<Cell<Option<ViewBounds>>>,
    events: Rc<RefCell<Vec<(String, Value)>>>,
    now_ms: Rc<Cell<f64>>,
    controller: ViewportController,
}

impl Harness {
    fn event_count(&self) -> usize {
        self.events.borrow().len()
    }

    fn last_payload(&self) -> Value {
        self.events.borrow().last().map(|(_, payload)| payload.clone()).unwrap_or(Value::Null)
    }

    fn payload_field(&self, key: &str) -> f64 {
        self.last_payload().get(key).and_then(Value::as_f64).unwrap_or(f64::NAN)
    }

    fn tick(&self, ms: f64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

fn harness(view: Option<ViewBounds>) -> Harness {
    let bounds = Rc::new(Cell::new(view));
    let events = Rc::new(RefCell::new(Vec::new()));
    let now_ms = Rc::new(Cell::new(0.0));
    let clock_time = Rc::clone(&now_ms);
    let controller = ViewportController::new(
        Box::new(FakeBounds(Rc::clone(&bounds))),
        Box::new(RecordingSink(Rc::clone(&events))),
        Box::new(move || clock_time.get()),
    );
    Harness { bounds, events, now_ms, controller }
}

fn standard_view() -> ViewBounds {
    ViewBounds::new(800.0, 600.0, 0.0, 0.0)
}

// --- zoom_toward ---

#[test]
fn zoom_toward_doubles_and_keeps_anchor_world_point() {
    let mut h = harness(Some(standard_view()));
    h.controller.set_extent(Some(CanvasExtent::new(1024.0, 1024.0)));

    let before = h.controller.screen_to_world(Point::new(400.0, 300.0));
    h.controller.zoom_toward(2.0, 400.0, 300.0);
    let after = h.controller.screen_to_world(Point::new(400.0, 300.0));

    assert_eq!(h.controller.camera().zoom, 2.0);
    assert!(approx_eq(before.x, after.x));
    assert!(approx_eq(before.y, after.y));
}

#[test]
fn zoom_toward_anchor_holds_with_offset_element_and_pan() {
    let mut h = harness(Some(ViewBounds::new(800.0, 600.0, 100.0, 50.0)));
    assert!(h.controller.set_viewport(40.0, -25.0, 1.5));
    h.tick(20.0);

    let anchor = Point::new(500.0, 350.0);
    let before = h.controller.screen_to_world(anchor);
    h.controller.zoom_toward(2.0, anchor.x, anchor.y);
    let after = h.controller.screen_to_world(anchor);

    assert!(approx_eq(before.x, after.x));
    assert!(approx_eq(before.y, after.y));
}

#[test]
fn zoom_toward_is_noop_at_zoom_ceiling() {
    let mut h = harness(Some(standard_view()));
    assert!(h.controller.set_viewport(0.0, 0.0, 10.0));
    let events_before = h.event_count();

    h.tick(100.0);
    h.controller.zoom_toward(1.5, 400.0, 300.0);

    assert_eq!(h.controller.camera().zoom, 10.0);
    assert_eq!(h.event_count(), events_before);
}

#[test]
fn zoom_toward_rejects_invalid_factor() {
    let mut h = harness(Some(standard_view()));
    for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        h.controller.zoom_toward(factor, 400.0, 300.0);
    }
    assert_eq!(h.controller.camera().zoom, 1.0);
    assert_eq!(h.event_count(), 0);
}

#[test]
fn zoom_toward_without_bounds_applies_zoom_and_keeps_position() {
    let mut h = harness(None);
    assert!(h.controller.set_viewport(50.0, 60.0, 1.0));
    h.tick(20.0);

    h.controller.zoom_toward(2.0, 400.0, 300.0);

    let cam = h.controller.camera();
    assert_eq!(cam.zoom, 2.0);
    assert_eq!(cam.x, 50.0);
    assert_eq!(cam.y, 60.0);
}

// --- zoom_centered ---

#[test]
fn zoom_centered_anchors_at_element_center() {
    let mut h = harness(Some(ViewBounds::new(800.0, 600.0, 100.0, 50.0)));
    let center = Point::new(500.0, 350.0);
    let before = h.controller.screen_to_world(center);

    h.controller.zoom_centered(2.0);
    let after = h.controller.screen_to_world(center);

    assert_eq!(h.controller.camera().zoom, 2.0);
    assert!(approx_eq(before.x, after.x));
    assert!(approx_eq(before.y, after.y));
}

#[test]
fn zoom_step_factors_compose() {
    let mut h = harness(Some(standard_view()));
    h.controller.zoom_centered(ZOOM_STEP_IN);
    h.tick(20.0);
    h.controller.zoom_centered(ZOOM_STEP_OUT);
    assert!(approx_eq(h.controller.camera().zoom, 1.2 * 0.8));
}

// --- pan ---

#[test]
fn pan_converts_screen_delta_to_world_delta() {
    let mut h = harness(Some(standard_view()));
    assert!(h.controller.set_viewport(0.0, 0.0, 2.0));
    h.tick(20.0);

    h.controller.pan(10.0, -6.0);

    let cam = h.controller.camera();
    assert!(approx_eq(cam.x, -5.0));
    assert!(approx_eq(cam.y, 3.0));
}

#[test]
fn pan_is_clamped_against_the_extent() {
    let mut h = harness(Some(ViewBounds::new(800.0, 800.0, 0.0, 0.0)));
    h.controller.set_extent(Some(CanvasExtent::new(1024.0, 1024.0)));
    h.tick(20.0);

    h.controller.pan(-1_000_000.0, 0.0);

    // Margin is min(100, 204.8) = 100, so x stops at 1024 - 100.
    assert!(approx_eq(h.controller.camera().x, 924.0));
}

// --- Notification throttling ---

#[test]
fn rapid_pans_deliver_a_single_notification() {
    let mut h = harness(Some(standard_view()));
    h.now_ms.set(100.0);
    h.controller.pan(10.0, 0.0);
    h.now_ms.set(105.0);
    h.controller.pan(5.0, 0.0);

    assert_eq!(h.event_count(), 1);
    // Both pans mutated state even though only one notification went out.
    assert!(approx_eq(h.controller.camera().x, -15.0));
}

#[test]
fn next_notification_after_window_carries_cumulative_state() {
    let mut h = harness(Some(standard_view()));
    h.now_ms.set(100.0);
    h.controller.pan(10.0, 0.0);
    h.now_ms.set(105.0);
    h.controller.pan(5.0, 0.0);
    h.now_ms.set(120.0);
    h.controller.pan(1.0, 0.0);

    assert_eq!(h.event_count(), 2);
    assert!(approx_eq(h.payload_field("x"), -16.0));
}

#[test]
fn notification_event_name_and_payload_shape() {
    let mut h = harness(Some(standard_view()));
    assert!(h.controller.set_viewport(12.0, 34.0, 2.0));

    let events = h.events.borrow();
    let (name, payload) = events.last().cloned().unwrap();
    assert_eq!(name, "viewport:changed");
    assert_eq!(payload, serde_json::json!({ "x": 12.0, "y": 34.0, "zoom": 2.0 }));
}

#[test]
fn legacy_callback_fires_alongside_events() {
    let mut h = harness(Some(standard_view()));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = Rc::clone(&seen);
    h.controller.set_change_callback(Some(Box::new(move |x, y, zoom| {
        seen_cb.borrow_mut().push((x, y, zoom));
    })));

    h.now_ms.set(100.0);
    h.controller.pan(10.0, 0.0);
    h.now_ms.set(105.0);
    h.controller.pan(5.0, 0.0);

    // The callback is throttled in lockstep with the event channel.
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0], (-10.0, 0.0, 1.0));
}

// --- set_viewport ---

#[test]
fn set_viewport_rejects_non_finite_input() {
    let mut h = harness(Some(standard_view()));
    assert!(h.controller.set_viewport(25.0, 50.0, 2.0));
    h.tick(20.0);
    let cam_before = h.controller.camera();
    let events_before = h.event_count();

    for (x, y, zoom) in [
        (f64::NAN, 0.0, 1.0),
        (0.0, f64::NAN, 1.0),
        (0.0, 0.0, f64::NAN),
        (f64::INFINITY, 0.0, 1.0),
        (0.0, f64::NEG_INFINITY, 1.0),
        (0.0, 0.0, f64::INFINITY),
    ] {
        assert!(!h.controller.set_viewport(x, y, zoom));
    }

    let cam = h.controller.camera();
    assert_eq!(cam.x, cam_before.x);
    assert_eq!(cam.y, cam_before.y);
    assert_eq!(cam.zoom, cam_before.zoom);
    assert_eq!(h.event_count(), events_before);
}

#[test]
fn set_viewport_clamps_zoom_into_range() {
    let mut h = harness(Some(standard_view()));
    assert!(h.controller.set_viewport(0.0, 0.0, 500.0));
    assert_eq!(h.controller.camera().zoom, 10.0);
}

#[test]
fn set_viewport_centers_when_viewport_larger_than_extent() {
    let mut h = harness(Some(ViewBounds::new(2000.0, 2000.0, 0.0, 0.0)));
    h.controller.set_extent(Some(CanvasExtent::new(1024.0, 1024.0)));
    h.tick(20.0);

    assert!(h.controller.set_viewport(0.0, 0.0, 1.0));

    let cam = h.controller.camera();
    assert!(approx_eq(cam.x, -488.0));
    assert!(approx_eq(cam.y, -488.0));
}

// --- Zoom range invariant ---

#[test]
fn zoom_stays_in_range_across_operation_sequences() {
    let mut h = harness(Some(standard_view()));
    h.controller.set_extent(Some(CanvasExtent::new(1024.0, 1024.0)));

    let check = |h: &Harness| {
        let cam = h.controller.camera();
        assert!(cam.zoom >= cam.min_zoom && cam.zoom <= cam.max_zoom, "zoom {} out of range", cam.zoom);
    };

    h.controller.zoom_toward(100.0, 400.0, 300.0);
    check(&h);
    h.controller.zoom_centered(0.0001);
    check(&h);
    h.controller.pan(50.0, -20.0);
    check(&h);
    assert!(h.controller.set_viewport(0.0, 0.0, 99.0));
    check(&h);
    h.controller.set_zoom_constraints(2.0, 8.0);
    check(&h);
    h.controller.zoom_centered(0.0001);
    check(&h);
    h.controller.set_zoom_constraints(0.5, 1.0);
    check(&h);
}

// --- set_zoom_constraints ---

#[test]
fn set_zoom_constraints_reclamps_and_notifies() {
    let mut h = harness(Some(standard_view()));
    let events_before = h.event_count();

    h.controller.set_zoom_constraints(2.0, 8.0);

    assert_eq!(h.controller.camera().zoom, 2.0);
    assert_eq!(h.event_count(), events_before + 1);
    assert!(approx_eq(h.payload_field("zoom"), 2.0));
}

#[test]
fn set_zoom_constraints_normalizes_swapped_range() {
    let mut h = harness(Some(standard_view()));
    h.controller.set_zoom_constraints(8.0, 2.0);
    let cam = h.controller.camera();
    assert_eq!(cam.min_zoom, 2.0);
    assert_eq!(cam.max_zoom, 8.0);
}

#[test]
fn set_zoom_constraints_honors_floor_and_ceiling() {
    let mut h = harness(Some(standard_view()));
    h.controller.set_zoom_constraints(0.0001, 500.0);
    let cam = h.controller.camera();
    assert_eq!(cam.min_zoom, 0.01);
    assert_eq!(cam.max_zoom, 100.0);
}

#[test]
fn set_zoom_constraints_rejects_non_finite_range() {
    let mut h = harness(Some(standard_view()));
    h.controller.set_zoom_constraints(f64::NAN, 8.0);
    let cam = h.controller.camera();
    assert_eq!(cam.min_zoom, 0.1);
    assert_eq!(cam.max_zoom, 10.0);
    assert_eq!(h.event_count(), 0);
}

// --- Fit / center / reset ---

#[test]
fn reset_to_fit_chooses_min_ratio_and_centers() {
    let mut h = harness(Some(ViewBounds::new(1000.0, 1000.0, 0.0, 0.0)));

    h.controller.reset_to_fit(CanvasExtent::new(2000.0, 1000.0));

    let cam = h.controller.camera();
    assert_eq!(cam.zoom, 0.5);
    let visible = h.controller.visible_bounds();
    assert!(approx_eq(visible.left, 0.0));
    assert!(approx_eq(visible.right, 2000.0));
    assert!(approx_eq(visible.top, -500.0));
    assert!(approx_eq(visible.bottom, 1500.0));
}

#[test]
fn reset_to_fit_clamps_fit_zoom_into_range() {
    let mut h = harness(Some(ViewBounds::new(100.0, 100.0, 0.0, 0.0)));
    // Fit would need zoom 0.01; the default floor is 0.1.
    h.controller.reset_to_fit(CanvasExtent::new(10_000.0, 10_000.0));
    assert_eq!(h.controller.camera().zoom, 0.1);
}

#[test]
fn reset_to_fit_without_bounds_adopts_extent_only() {
    let mut h = harness(None);
    h.controller.reset_to_fit(CanvasExtent::new(2000.0, 1000.0));
    assert_eq!(h.controller.extent(), Some(CanvasExtent::new(2000.0, 1000.0)));
    assert_eq!(h.controller.camera().zoom, 1.0);
    assert_eq!(h.event_count(), 0);
}

#[test]
fn center_view_is_logged_noop_without_extent() {
    let mut h = harness(Some(standard_view()));
    h.controller.center_view();
    assert_eq!(h.controller.camera().x, 0.0);
    assert_eq!(h.event_count(), 0);
}

#[test]
fn reset_view_recenters_when_extent_is_known() {
    let mut h = harness(Some(ViewBounds::new(2000.0, 2000.0, 0.0, 0.0)));
    h.controller.set_extent(Some(CanvasExtent::new(1024.0, 1024.0)));
    h.tick(20.0);
    assert!(h.controller.set_viewport(10.0, 10.0, 2.0));
    h.tick(20.0);

    h.controller.reset_view();

    let cam = h.controller.camera();
    assert_eq!(cam.zoom, 1.0);
    assert!(approx_eq(cam.x, -488.0));
    assert!(approx_eq(cam.y, -488.0));
}

#[test]
fn reset_zoom_preserves_position() {
    let mut h = harness(Some(standard_view()));
    assert!(h.controller.set_viewport(40.0, 50.0, 4.0));
    h.tick(20.0);

    h.controller.reset_zoom();

    let cam = h.controller.camera();
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.x, 40.0);
    assert_eq!(cam.y, 50.0);
}

// --- Degraded mode without element bounds ---

#[test]
fn conversions_fall_back_to_origin_without_bounds() {
    let h = harness(None);
    assert_eq!(h.controller.screen_to_world(Point::new(123.0, 45.0)), Point::new(0.0, 0.0));
    assert_eq!(h.controller.world_to_screen(Point::new(-9.0, 9.0)), Point::new(0.0, 0.0));
}

#[test]
fn visibility_reports_nothing_without_bounds() {
    let h = harness(None);
    assert!(!h.controller.is_visible(0.0, 0.0));
    assert_eq!(h.controller.visible_bounds(), VisibleBounds::default());
}

// --- Element bounds are read fresh each call ---

#[test]
fn resize_between_calls_is_picked_up() {
    let h = harness(Some(standard_view()));
    let before = h.controller.visible_bounds();
    assert!(approx_eq(before.right, 800.0));

    h.bounds.set(Some(ViewBounds::new(400.0, 300.0, 0.0, 0.0)));
    let after = h.controller.visible_bounds();
    assert!(approx_eq(after.right, 400.0));
}

// --- Visibility queries ---

#[test]
fn is_visible_tracks_pan_and_zoom() {
    let mut h = harness(Some(standard_view()));
    assert!(h.controller.is_visible(400.0, 300.0));
    assert!(!h.controller.is_visible(900.0, 300.0));

    assert!(h.controller.set_viewport(800.0, 0.0, 1.0));
    assert!(h.controller.is_visible(900.0, 300.0));
    assert!(!h.controller.is_visible(400.0, 300.0));
}

// --- set_extent ---

#[test]
fn set_extent_reclamps_and_notifies() {
    let mut h = harness(Some(ViewBounds::new(2000.0, 2000.0, 0.0, 0.0)));
    let events_before = h.event_count();

    h.controller.set_extent(Some(CanvasExtent::new(1024.0, 1024.0)));

    assert!(approx_eq(h.controller.camera().x, -488.0));
    assert_eq!(h.event_count(), events_before + 1);
}

#[test]
fn clearing_extent_restores_coarse_clamping_only() {
    let mut h = harness(Some(standard_view()));
    h.controller.set_extent(Some(CanvasExtent::new(1024.0, 1024.0)));
    h.tick(20.0);
    h.controller.set_extent(None);
    h.tick(20.0);

    assert!(h.controller.set_viewport(50_000.0, 0.0, 1.0));
    assert_eq!(h.controller.camera().x, 50_000.0);
}
