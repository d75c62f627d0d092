//! Viewport controller: operations over camera state, clamping, and
//! throttled change notification.
//!
//! ARCHITECTURE
//! ============
//! The controller is headless. Element geometry, event delivery, and the
//! clock are constructor-injected collaborators, so the same controller
//! drives the browser host and native tests alike. All operations are
//! synchronous in-memory transformations; none blocks, none throws for
//! business conditions. Invalid or impossible requests degrade to safe
//! defaults instead of crashing an interactive session.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use serde_json::json;

use crate::camera::{Camera, CanvasExtent, Point, ViewBounds, VisibleBounds};
use crate::clamp::clamp_position;
use crate::consts::{ZOOM_CEILING, ZOOM_FLOOR};
use crate::emit::{EmitThrottle, VIEWPORT_CHANGED, ViewportChanged};

/// Provider of the host element's on-screen rectangle.
///
/// Queried immediately before each use; values may change between calls
/// (window resize) and must not be cached by implementations or callers.
pub trait BoundsSource {
    fn view_bounds(&self) -> Option<ViewBounds>;
}

/// Fire-and-forget sink for named events.
pub trait EventSink {
    fn emit(&mut self, event: &str, payload: serde_json::Value);
}

/// Positional change callback `(x, y, zoom)`.
///
/// Compatibility channel for callers not yet consuming [`EventSink`]
/// events; invoked whenever an emission is delivered. Deprecated in favor
/// of the event interface.
pub type ChangeCallback = Box<dyn FnMut(f64, f64, f64)>;

/// Milliseconds clock driving the notification throttle.
pub type Clock = Box<dyn Fn() -> f64>;

/// Orchestrates pan/zoom state for one hosted canvas view.
pub struct ViewportController {
    camera: Camera,
    extent: Option<CanvasExtent>,
    bounds: Box<dyn BoundsSource>,
    sink: Box<dyn EventSink>,
    on_change: Option<ChangeCallback>,
    clock: Clock,
    throttle: EmitThrottle,
}

impl ViewportController {
    /// Create a controller at the default state `(0, 0, zoom 1)`.
    #[must_use]
    pub fn new(bounds: Box<dyn BoundsSource>, sink: Box<dyn EventSink>, clock: Clock) -> Self {
        Self {
            camera: Camera::default(),
            extent: None,
            bounds,
            sink,
            on_change: None,
            clock,
            throttle: EmitThrottle::default(),
        }
    }

    /// Install or clear the legacy positional change callback.
    pub fn set_change_callback(&mut self, callback: Option<ChangeCallback>) {
        self.on_change = callback;
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The canvas extent currently used for clamping, if any.
    #[must_use]
    pub fn extent(&self) -> Option<CanvasExtent> {
        self.extent
    }

    /// Replace the canvas extent (switching canvases) and re-clamp.
    pub fn set_extent(&mut self, extent: Option<CanvasExtent>) {
        self.extent = extent;
        self.clamp_and_notify();
    }

    // --- Coordinate conversion ---

    /// Convert a screen-space point to world coordinates.
    ///
    /// Returns the origin when no element is bound (degraded mode).
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        match self.bounds.view_bounds() {
            Some(view) => self.camera.screen_to_world(&view, screen),
            None => Point::new(0.0, 0.0),
        }
    }

    /// Convert a world-space point to screen coordinates.
    ///
    /// Returns the origin when no element is bound (degraded mode).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        match self.bounds.view_bounds() {
            Some(view) => self.camera.world_to_screen(&view, world),
            None => Point::new(0.0, 0.0),
        }
    }

    // --- Operations ---

    /// Pan by a screen-space delta (pointer movement in CSS pixels).
    pub fn pan(&mut self, delta_screen_x: f64, delta_screen_y: f64) {
        self.camera.x -= self.camera.screen_dist_to_world(delta_screen_x);
        self.camera.y -= self.camera.screen_dist_to_world(delta_screen_y);
        self.clamp_and_notify();
    }

    /// Zoom by `factor` while keeping the world point under the screen
    /// point `(center_x, center_y)` fixed.
    ///
    /// A no-op (no notification) when the clamped zoom equals the current
    /// zoom. Without element bounds the anchor is unknowable; the zoom is
    /// applied with position preserved, then clamped.
    pub fn zoom_toward(&mut self, factor: f64, center_x: f64, center_y: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::debug!("zoom_toward ignored: invalid factor {factor}");
            return;
        }
        let new_zoom = self.camera.clamped_zoom(self.camera.zoom * factor);
        if (new_zoom - self.camera.zoom).abs() < f64::EPSILON {
            return;
        }

        if let Some(view) = self.bounds.view_bounds() {
            let anchor = Point::new(center_x, center_y);
            let world = self.camera.screen_to_world(&view, anchor);
            self.camera.zoom = new_zoom;
            self.camera.x = world.x - (anchor.x - view.left) / new_zoom;
            self.camera.y = world.y - (anchor.y - view.top) / new_zoom;
        } else {
            self.camera.zoom = new_zoom;
        }
        self.clamp_and_notify();
    }

    /// Zoom by `factor` anchored at the geometric center of the element.
    ///
    /// Used by discrete zoom controls with the canonical step factors.
    pub fn zoom_centered(&mut self, factor: f64) {
        match self.bounds.view_bounds() {
            Some(view) => {
                let center = view.center();
                self.zoom_toward(factor, center.x, center.y);
            }
            None => self.zoom_toward(factor, 0.0, 0.0),
        }
    }

    /// Center the canvas extent within the element at the current zoom.
    pub fn center_view(&mut self) {
        let (Some(extent), Some(view)) = (self.extent, self.bounds.view_bounds()) else {
            log::debug!("center_view ignored: canvas extent or element bounds unavailable");
            return;
        };
        let (x, y) = self.centered_position(&view, &extent);
        self.camera.x = x;
        self.camera.y = y;
        self.clamp_and_notify();
    }

    /// Reset position to the origin and zoom to 1.0, then re-center if the
    /// extent is known.
    pub fn reset_view(&mut self) {
        self.camera.x = 0.0;
        self.camera.y = 0.0;
        self.camera.zoom = self.camera.clamped_zoom(1.0);
        if let (Some(extent), Some(view)) = (self.extent, self.bounds.view_bounds()) {
            let (x, y) = self.centered_position(&view, &extent);
            self.camera.x = x;
            self.camera.y = y;
        }
        self.clamp_and_notify();
    }

    /// Reset zoom to 1.0 only, preserving position.
    pub fn reset_zoom(&mut self) {
        self.camera.zoom = self.camera.clamped_zoom(1.0);
        self.clamp_and_notify();
    }

    /// Adopt `extent` and choose the largest zoom that fits it entirely on
    /// screen, then center.
    pub fn reset_to_fit(&mut self, extent: CanvasExtent) {
        self.extent = Some(extent);
        if extent.width <= 0.0 || extent.height <= 0.0 {
            log::debug!("reset_to_fit ignored: degenerate extent {}x{}", extent.width, extent.height);
            return;
        }
        let Some(view) = self.bounds.view_bounds() else {
            log::debug!("reset_to_fit ignored: element bounds unavailable");
            return;
        };
        let fit = (view.width / extent.width).min(view.height / extent.height);
        self.camera.zoom = self.camera.clamped_zoom(fit);
        let (x, y) = self.centered_position(&view, &extent);
        self.camera.x = x;
        self.camera.y = y;
        self.clamp_and_notify();
    }

    /// Set position and zoom directly.
    ///
    /// Non-finite input is rejected: no mutation, no notification, and the
    /// call reports `false`. Zoom is clamped into the configured range and
    /// the position is clamped as usual.
    pub fn set_viewport(&mut self, x: f64, y: f64, zoom: f64) -> bool {
        if !(x.is_finite() && y.is_finite() && zoom.is_finite()) {
            log::debug!("set_viewport ignored: non-finite input ({x}, {y}, {zoom})");
            return false;
        }
        self.camera.x = x;
        self.camera.y = y;
        self.camera.zoom = self.camera.clamped_zoom(zoom);
        self.clamp_and_notify();
        true
    }

    /// Update the zoom range and re-clamp the current zoom into it.
    ///
    /// The range is normalized so that min ≤ max and limited to the global
    /// floor/ceiling. Notifies like every other mutating operation.
    pub fn set_zoom_constraints(&mut self, min_zoom: f64, max_zoom: f64) {
        if !(min_zoom.is_finite() && max_zoom.is_finite()) {
            log::debug!("set_zoom_constraints ignored: non-finite range ({min_zoom}, {max_zoom})");
            return;
        }
        let (lo, hi) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.camera.min_zoom = lo.clamp(ZOOM_FLOOR, ZOOM_CEILING);
        self.camera.max_zoom = hi.clamp(ZOOM_FLOOR, ZOOM_CEILING);
        self.camera.zoom = self.camera.clamped_zoom(self.camera.zoom);
        self.clamp_and_notify();
    }

    // --- Queries ---

    /// Whether the given world point is currently on screen.
    ///
    /// `false` when no element is bound (zero visible area).
    #[must_use]
    pub fn is_visible(&self, world_x: f64, world_y: f64) -> bool {
        match self.bounds.view_bounds() {
            Some(view) => self.camera.visible_bounds(&view).contains(world_x, world_y),
            None => false,
        }
    }

    /// The world-space rectangle currently visible.
    ///
    /// All-zero when no element is bound (zero visible area).
    #[must_use]
    pub fn visible_bounds(&self) -> VisibleBounds {
        match self.bounds.view_bounds() {
            Some(view) => self.camera.visible_bounds(&view),
            None => VisibleBounds::default(),
        }
    }

    // --- Internals ---

    /// Position placing the extent centered within `view` at current zoom.
    fn centered_position(&self, view: &ViewBounds, extent: &CanvasExtent) -> (f64, f64) {
        (
            -(view.width / self.camera.zoom - extent.width) * 0.5,
            -(view.height / self.camera.zoom - extent.height) * 0.5,
        )
    }

    fn clamp_and_notify(&mut self) {
        let view = self.bounds.view_bounds();
        let (x, y) = clamp_position(
            self.camera.x,
            self.camera.y,
            self.camera.zoom,
            self.extent.as_ref(),
            view.as_ref(),
        );
        self.camera.x = x;
        self.camera.y = y;
        self.notify();
    }

    /// Attempt to deliver a change notification, subject to the throttle.
    fn notify(&mut self) {
        let now_ms = (self.clock)();
        if !self.throttle.allow(now_ms) {
            return;
        }
        let changed = ViewportChanged {
            x: self.camera.x,
            y: self.camera.y,
            zoom: self.camera.zoom,
        };
        self.sink.emit(
            VIEWPORT_CHANGED,
            json!({ "x": changed.x, "y": changed.y, "zoom": changed.zoom }),
        );
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(changed.x, changed.y, changed.zoom);
        }
    }
}
