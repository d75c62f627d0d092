//! Canvas-list state for the dashboard view.
//!
//! DESIGN
//! ======
//! Separating list state from active-session state avoids accidental
//! coupling between navigation inventory and in-canvas realtime data.

#[cfg(test)]
#[path = "canvases_test.rs"]
mod canvases_test;

use crate::net::types::CanvasListItem;

/// Shared canvas list state backed by the metadata REST endpoints.
#[derive(Clone, Debug, Default)]
pub struct CanvasesState {
    pub items: Vec<CanvasListItem>,
    pub loading: bool,
    pub error: Option<String>,
}
