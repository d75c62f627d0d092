//! Session state for the active canvas.
//!
//! SYSTEM CONTEXT
//! ==============
//! This model stores the local projection of one opened canvas: identity,
//! socket connection status, the drawable extent, and tile-count tallies
//! per user. The connection manager writes here; chrome components read.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;

use viewport::camera::CanvasExtent;

use crate::net::types::{CanvasWelcome, TilePlaced};

/// Session-level state: which canvas is open, connection status, and tallies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    /// ID of the currently open canvas (UUID string).
    pub canvas_id: Option<String>,
    /// Display name of the open canvas.
    pub canvas_name: Option<String>,
    /// Current WebSocket connection lifecycle state.
    pub connection_status: ConnectionStatus,
    /// Drawable extent of the open canvas, once known.
    pub extent: Option<CanvasExtent>,
    /// Total tiles placed on this canvas.
    pub total_tiles: i64,
    /// Tiles placed per user id.
    pub tile_counts: HashMap<String, i64>,
    /// Display names per user id, latest broadcast wins.
    pub user_names: HashMap<String, String>,
}

impl SessionState {
    /// Reset for a route change to `canvas_id`, dropping all prior canvas
    /// data. Connection status is left alone; the socket lifecycle owns it.
    pub fn reset_for_canvas(&mut self, canvas_id: Option<String>) {
        self.canvas_id = canvas_id;
        self.canvas_name = None;
        self.extent = None;
        self.total_tiles = 0;
        self.tile_counts.clear();
        self.user_names.clear();
    }

    /// Adopt the server's `canvas:welcome` snapshot.
    ///
    /// Fields the welcome omits keep their current values, so a partial
    /// welcome never erases data learned from the metadata endpoints.
    pub fn apply_welcome(&mut self, welcome: &CanvasWelcome) {
        if let Some(name) = &welcome.name {
            self.canvas_name = Some(name.clone());
        }
        if let Some(extent) = welcome.extent {
            self.extent = Some(extent);
        }
        if welcome.tile_count > 0 {
            self.total_tiles = welcome.tile_count;
        }
        if !welcome.user_tile_counts.is_empty() {
            self.tile_counts = welcome.user_tile_counts.clone();
        }
    }

    /// Tally one `tile:placed` broadcast.
    pub fn record_tile(&mut self, tile: &TilePlaced) {
        *self.tile_counts.entry(tile.user_id.clone()).or_insert(0) += 1;
        self.total_tiles += 1;
        if let Some(name) = &tile.user_name {
            self.user_names.insert(tile.user_id.clone(), name.clone());
        }
    }

    /// Tiles placed by one user, zero if unseen.
    #[must_use]
    pub fn tiles_by(&self, user_id: &str) -> i64 {
        self.tile_counts.get(user_id).copied().unwrap_or(0)
    }

    /// The `limit` highest tallies as `(display name, count)` pairs.
    ///
    /// Sorted descending, tie-broken by user id so the output is stable.
    /// Users without a known display name fall back to their id.
    #[must_use]
    pub fn top_placers(&self, limit: usize) -> Vec<(String, i64)> {
        let mut rows: Vec<(&String, &i64)> = self.tile_counts.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        rows.into_iter()
            .take(limit)
            .map(|(user_id, count)| {
                let name = self
                    .user_names
                    .get(user_id)
                    .cloned()
                    .unwrap_or_else(|| user_id.clone());
                (name, *count)
            })
            .collect()
    }
}

/// WebSocket connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Not connected; socket is closed or not yet opened.
    #[default]
    Disconnected,
    /// WebSocket handshake is in progress.
    Connecting,
    /// WebSocket is open and delivering envelopes.
    Connected,
}
