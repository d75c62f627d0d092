//! Change-notification payload and the rate limiter that throttles it.

#[cfg(test)]
#[path = "emit_test.rs"]
mod emit_test;

use serde::{Deserialize, Serialize};

use crate::consts::EMIT_MIN_INTERVAL_MS;

/// Event name used for viewport change notifications.
pub const VIEWPORT_CHANGED: &str = "viewport:changed";

/// Payload carried by a `viewport:changed` notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportChanged {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// Wall-clock rate limiter for change notifications.
///
/// An emission is delivered only when at least `interval_ms` has elapsed
/// since the last delivered one. Suppressed calls are coalesced silently:
/// the next delivered emission carries whatever state is current then, not
/// an average. Suppressions do not reset the window.
#[derive(Debug, Clone, Copy)]
pub struct EmitThrottle {
    interval_ms: f64,
    last_emit_ms: Option<f64>,
}

impl Default for EmitThrottle {
    fn default() -> Self {
        Self::new(EMIT_MIN_INTERVAL_MS)
    }
}

impl EmitThrottle {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_emit_ms: None }
    }

    /// Whether an emission at `now_ms` may be delivered; records it if so.
    pub fn allow(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_emit_ms
            && now_ms - last < self.interval_ms
        {
            return false;
        }
        self.last_emit_ms = Some(now_ms);
        true
    }
}
