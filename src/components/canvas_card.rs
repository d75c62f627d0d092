//! Reusable card component for canvas list items on the dashboard.
//!
//! DESIGN
//! ======
//! Keeps canvas list presentation consistent while centralizing the
//! navigation affordance. Pixel previews are deliberately absent; this
//! client does not own the rendering pipeline.

#[cfg(test)]
#[path = "canvas_card_test.rs"]
mod canvas_card_test;

use leptos::prelude::*;

use crate::net::types::CanvasListItem;

/// Format a "1024 × 1024" dimensions label.
fn format_dimensions(width: f64, height: f64) -> String {
    format!("{width:.0} × {height:.0}")
}

/// Format a tile tally with the right plural.
fn format_tile_count(count: i64) -> String {
    if count == 1 {
        "1 tile".to_owned()
    } else {
        format!("{count} tiles")
    }
}

/// A clickable card representing a canvas.
#[component]
pub fn CanvasCard(item: CanvasListItem) -> impl IntoView {
    let href = format!("/canvas/{}", item.id);
    let dimensions = format_dimensions(item.width, item.height);
    let tiles = format_tile_count(item.tile_count);

    view! {
        <a class="canvas-card" href=href>
            <span class="canvas-card__name">{item.name}</span>
            <span class="canvas-card__id">{item.id}</span>
            <span class="canvas-card__meta">
                <span class="canvas-card__dimensions">{dimensions}</span>
                <span class="canvas-card__tiles">{tiles}</span>
            </span>
        </a>
    }
}
