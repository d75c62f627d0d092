//! Shared numeric constants for the viewport crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Hard floor for any configurable minimum zoom.
pub const ZOOM_FLOOR: f64 = 0.01;

/// Hard ceiling for any configurable maximum zoom.
pub const ZOOM_CEILING: f64 = 100.0;

/// Minimum zoom for a freshly created camera.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Maximum zoom for a freshly created camera.
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;

/// Canonical factor for one discrete zoom-in step.
pub const ZOOM_STEP_IN: f64 = 1.2;

/// Canonical factor for one discrete zoom-out step.
pub const ZOOM_STEP_OUT: f64 = 0.8;

// ── Clamping ────────────────────────────────────────────────────

/// Symmetric guard against runaway positions, in world units.
pub const COARSE_POSITION_LIMIT: f64 = 100_000.0;

/// Fixed part of the minimum-overlap margin, in world units.
pub const OVERLAP_MARGIN: f64 = 100.0;

/// Fractional part of the minimum-overlap margin, relative to the extent.
pub const OVERLAP_MARGIN_FRACTION: f64 = 0.2;

// ── Notification ────────────────────────────────────────────────

/// Minimum interval between delivered change notifications (one 60 Hz frame).
pub const EMIT_MIN_INTERVAL_MS: f64 = 16.0;
