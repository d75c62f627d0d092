//! Viewport telemetry used by non-canvas UI surfaces.
//!
//! ARCHITECTURE
//! ============
//! `CanvasStage` owns the authoritative viewport controller and publishes
//! snapshots through this struct so other components (toolbar readouts,
//! overlays) can render without touching the controller.

#[cfg(test)]
#[path = "viewport_view_test.rs"]
mod viewport_view_test;

use viewport::emit::ViewportChanged;

/// Last published viewport state.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportViewState {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for ViewportViewState {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl ViewportViewState {
    /// Apply one change notification from the controller.
    pub fn apply(&mut self, change: &ViewportChanged) {
        self.x = change.x;
        self.y = change.y;
        self.zoom = change.zoom;
    }
}
