//! Position clamping that keeps the canvas at least partially visible.
//!
//! A coarse symmetric guard always applies. When both the canvas extent and
//! the element geometry are known, each axis is additionally constrained so
//! that at least a margin-wide sliver of canvas stays on screen. When the
//! viewport is larger than the extent, the extent is centered instead and
//! the axis has no remaining drag range.

#[cfg(test)]
#[path = "clamp_test.rs"]
mod clamp_test;

use crate::camera::{CanvasExtent, ViewBounds};
use crate::consts::{COARSE_POSITION_LIMIT, OVERLAP_MARGIN, OVERLAP_MARGIN_FRACTION};

/// Minimum-overlap margin for one axis, in world units.
fn overlap_margin(extent_size: f64) -> f64 {
    OVERLAP_MARGIN.min(OVERLAP_MARGIN_FRACTION * extent_size)
}

/// Clamp one axis of the viewport position.
///
/// `viewport_size` and `extent_size` are both in world units.
fn clamp_axis(pos: f64, viewport_size: f64, extent_size: f64) -> f64 {
    if viewport_size >= extent_size {
        // Zoomed out beyond the canvas: pin the extent centered in the view.
        -(viewport_size - extent_size) * 0.5
    } else {
        let margin = overlap_margin(extent_size);
        pos.clamp(-(viewport_size - margin), extent_size - margin)
    }
}

/// Clamp a viewport position so the canvas remains partially visible.
///
/// Without extent or element geometry only the coarse guard applies.
/// Idempotent for any extent inside the coarse guard.
#[must_use]
pub fn clamp_position(
    x: f64,
    y: f64,
    zoom: f64,
    extent: Option<&CanvasExtent>,
    view: Option<&ViewBounds>,
) -> (f64, f64) {
    let mut x = x.clamp(-COARSE_POSITION_LIMIT, COARSE_POSITION_LIMIT);
    let mut y = y.clamp(-COARSE_POSITION_LIMIT, COARSE_POSITION_LIMIT);

    if let (Some(extent), Some(view)) = (extent, view) {
        let viewport_w = view.width / zoom;
        let viewport_h = view.height / zoom;
        x = clamp_axis(x, viewport_w, extent.width);
        y = clamp_axis(y, viewport_h, extent.height);
    }

    (x, y)
}
