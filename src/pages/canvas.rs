//! Canvas page — the interactive pixel-canvas workspace shell.
//!
//! ARCHITECTURE
//! ============
//! This component is the route-level coordinator between URL canvas
//! identity, the per-canvas socket lifecycle, and local `SessionState`
//! cache lifecycle. Metadata (extent) is fetched over REST first so the
//! viewport can fit even before the socket delivers its welcome.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::canvas_stage::CanvasStage;
use crate::state::session::{ConnectionStatus, SessionState};

#[cfg(feature = "hydrate")]
use crate::app::SocketSender;

/// Short status label for the connection indicator.
fn connection_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Disconnected => "offline",
        ConnectionStatus::Connecting => "connecting",
        ConnectionStatus::Connected => "live",
    }
}

/// Canvas page — composes the header chrome and the viewport stage. Reads
/// the canvas ID from the route parameter and resets the session on route
/// changes.
#[component]
pub fn CanvasPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    #[cfg(feature = "hydrate")]
    let sender = expect_context::<RwSignal<SocketSender>>();
    let params = use_params_map();

    let last_route_id = RwSignal::new(None::<String>);
    Effect::new(move || {
        let canvas_id = params.get().get("id");
        if last_route_id.get_untracked() == canvas_id {
            return;
        }
        last_route_id.set(canvas_id.clone());
        session.update(|s| s.reset_for_canvas(canvas_id.clone()));

        #[cfg(feature = "hydrate")]
        if let Some(canvas_id) = canvas_id {
            // Metadata first (name + extent), then the live socket.
            let meta_id = canvas_id.clone();
            leptos::task::spawn_local(async move {
                if let Some(item) = crate::net::api::fetch_canvas(&meta_id).await {
                    session.update(|s| {
                        if s.canvas_id.as_deref() == Some(item.id.as_str()) {
                            s.canvas_name = Some(item.name.clone());
                            s.extent = Some(item.extent());
                            s.total_tiles = item.tile_count;
                        }
                    });
                }
            });
            let tx = crate::net::socket::spawn_socket(canvas_id, session);
            sender.set(SocketSender::new(tx));
        }
    });

    view! {
        <div class="canvas-page">
            <header class="canvas-page__header toolbar">
                <a class="toolbar__back" href="/">
                    "Canvases"
                </a>
                <span class="toolbar__canvas-name">
                    {move || {
                        session.get().canvas_name.unwrap_or_else(|| "Untitled canvas".to_owned())
                    }}
                </span>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__placers">
                    {move || {
                        session
                            .get()
                            .top_placers(3)
                            .into_iter()
                            .map(|(name, count)| format!("{name} {count}"))
                            .collect::<Vec<_>>()
                            .join(" / ")
                    }}
                </span>
                <span class="toolbar__tiles">
                    {move || format!("{} tiles", session.get().total_tiles)}
                </span>
                <span
                    class="toolbar__status"
                    class:toolbar__status--live=move || {
                        session.get().connection_status == ConnectionStatus::Connected
                    }
                >
                    {move || connection_label(session.get().connection_status)}
                </span>
            </header>

            <CanvasStage/>
        </div>
    }
}
