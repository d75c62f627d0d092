//! Browser-side collaborators for the viewport controller.
//!
//! These helpers bridge the DOM and Leptos reactive world to the headless
//! `viewport` crate: element geometry via `getBoundingClientRect`, the
//! wall clock via `Date.now()`, and an event sink that publishes change
//! notifications into `ViewportViewState`. Most are
//! `#[cfg(feature = "hydrate")]` because they depend on `web_sys`.

#[cfg(test)]
#[path = "viewport_glue_test.rs"]
mod viewport_glue_test;

#[cfg(feature = "hydrate")]
use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use viewport::camera::{Point, ViewBounds};
#[cfg(feature = "hydrate")]
use viewport::controller::{BoundsSource, EventSink, ViewportController};
#[cfg(feature = "hydrate")]
use viewport::emit::{VIEWPORT_CHANGED, ViewportChanged};

#[cfg(feature = "hydrate")]
use crate::app::SocketSender;
#[cfg(feature = "hydrate")]
use crate::net::types::Envelope;
#[cfg(feature = "hydrate")]
use crate::state::viewport_view::ViewportViewState;

/// Wheel-to-zoom sensitivity: factor = exp(-delta_y * sensitivity).
const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Convert a wheel delta (positive = scroll down) to a zoom factor.
///
/// Scrolling up zooms in (factor > 1), scrolling down zooms out. A zero
/// delta maps to factor 1.0 (no change).
#[must_use]
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    (-delta_y * WHEEL_ZOOM_SENSITIVITY).exp()
}

/// Element-rect provider backed by `getBoundingClientRect`.
///
/// Reads the rect fresh on every query; a zero-sized rect (element not
/// laid out yet) reports as absent so the controller degrades cleanly.
#[cfg(feature = "hydrate")]
pub struct ElementBounds {
    host: NodeRef<leptos::html::Div>,
}

#[cfg(feature = "hydrate")]
impl ElementBounds {
    #[must_use]
    pub fn new(host: NodeRef<leptos::html::Div>) -> Self {
        Self { host }
    }
}

#[cfg(feature = "hydrate")]
impl BoundsSource for ElementBounds {
    fn view_bounds(&self) -> Option<ViewBounds> {
        let element = self.host.get_untracked()?;
        let rect = element.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        Some(ViewBounds::new(rect.width(), rect.height(), rect.x(), rect.y()))
    }
}

/// Event sink publishing viewport changes into the reactive view state and
/// sharing them with the server for presence overlays.
///
/// Emissions arrive pre-throttled by the controller, so forwarding each one
/// over the socket stays well under the presence rate the server expects.
#[cfg(feature = "hydrate")]
pub struct SignalSink {
    view: RwSignal<ViewportViewState>,
    sender: RwSignal<SocketSender>,
}

#[cfg(feature = "hydrate")]
impl SignalSink {
    #[must_use]
    pub fn new(view: RwSignal<ViewportViewState>, sender: RwSignal<SocketSender>) -> Self {
        Self { view, sender }
    }
}

#[cfg(feature = "hydrate")]
impl EventSink for SignalSink {
    fn emit(&mut self, event: &str, payload: serde_json::Value) {
        if event != VIEWPORT_CHANGED {
            return;
        }
        let change = match serde_json::from_value::<ViewportChanged>(payload.clone()) {
            Ok(change) => change,
            Err(err) => {
                leptos::logging::warn!("viewport payload parse failed: {err}");
                return;
            }
        };
        self.view.update(|v| v.apply(&change));

        let shared = Envelope { id: None, event: "viewport:moved".to_owned(), data: payload };
        if !self.sender.get_untracked().send(&shared) {
            log::debug!("viewport presence dropped: no active connection");
        }
    }
}

/// Build a controller wired to the DOM host element, the reactive view
/// state, and the outbound socket channel.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn build_controller(
    host: NodeRef<leptos::html::Div>,
    view: RwSignal<ViewportViewState>,
    sender: RwSignal<SocketSender>,
) -> ViewportController {
    ViewportController::new(
        Box::new(ElementBounds::new(host)),
        Box::new(SignalSink::new(view, sender)),
        Box::new(js_sys::Date::now),
    )
}

/// Pointer position in viewport (client) coordinates.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Wheel position in viewport (client) coordinates.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn wheel_point(ev: &leptos::ev::WheelEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}
