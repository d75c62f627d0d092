//! WebSocket connection manager for the active canvas.
//!
//! One socket per opened canvas. The manager owns the connection lifecycle:
//! connect, dispatch incoming envelopes into session state, and reconnect
//! with exponential backoff (capped) when the connection drops. Outgoing
//! messages flow through an unbounded channel wrapped by
//! [`crate::app::SocketSender`].
//!
//! All WebSocket I/O is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment; the backoff math, URL construction, and
//! envelope dispatch are plain functions tested natively.
//!
//! ERROR HANDLING
//! ==============
//! Transport and parse failures are translated into logging plus state
//! updates so realtime UX recovers through the reconnect loop instead of
//! surfacing errors to components.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use crate::net::types::{Envelope, parse_canvas_welcome, parse_tile_placed};
use crate::state::session::SessionState;

#[cfg(feature = "hydrate")]
use crate::state::session::ConnectionStatus;

/// Delay before the first reconnect attempt.
pub const INITIAL_BACKOFF_MS: u32 = 1_000;

/// Ceiling for the reconnect delay.
pub const MAX_BACKOFF_MS: u32 = 10_000;

/// Next reconnect delay: double the current one, capped.
#[must_use]
pub fn next_backoff_ms(current_ms: u32) -> u32 {
    current_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// WebSocket URL for a canvas, matching the page's scheme.
#[must_use]
pub fn ws_url(page_is_https: bool, host: &str, canvas_id: &str) -> String {
    let ws_proto = if page_is_https { "wss" } else { "ws" };
    format!("{ws_proto}://{host}/api/canvases/{canvas_id}/ws")
}

/// Apply one incoming envelope to session state.
///
/// Unknown events are ignored; this client consumes a server-owned schema
/// and must tolerate events it does not understand.
pub fn dispatch_envelope(envelope: &Envelope, session: &mut SessionState) {
    match envelope.event.as_str() {
        "canvas:welcome" => session.apply_welcome(&parse_canvas_welcome(&envelope.data)),
        "tile:placed" => {
            if let Some(tile) = parse_tile_placed(&envelope.data) {
                session.record_tile(&tile);
            }
        }
        _ => {}
    }
}

/// Spawn the socket lifecycle for `canvas_id` as a local async task and
/// return the outbound message channel.
#[cfg(feature = "hydrate")]
pub fn spawn_socket(
    canvas_id: String,
    session: leptos::prelude::RwSignal<SessionState>,
) -> futures::channel::mpsc::UnboundedSender<String> {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<String>();

    leptos::task::spawn_local(socket_loop(canvas_id, session, rx));

    tx
}

/// Main connection loop with reconnect logic.
///
/// Ends when the session moves to a different canvas; the page spawns a
/// fresh socket for the new one.
#[cfg(feature = "hydrate")]
async fn socket_loop(
    canvas_id: String,
    session: leptos::prelude::RwSignal<SessionState>,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use leptos::prelude::{GetUntracked, Update};

    let rx = Rc::new(RefCell::new(rx));
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    loop {
        if session.get_untracked().canvas_id.as_deref() != Some(canvas_id.as_str()) {
            break;
        }

        session.update(|s| s.connection_status = ConnectionStatus::Connecting);

        let page_is_https = web_sys::window()
            .and_then(|w| w.location().protocol().ok())
            .is_some_and(|proto| proto == "https:");
        let host = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .unwrap_or_else(|| "localhost:3000".to_owned());
        let url = ws_url(page_is_https, &host, &canvas_id);

        match connect_and_run(&url, session, &rx).await {
            Ok(()) => {
                leptos::logging::log!("canvas socket disconnected cleanly");
            }
            Err(e) => {
                leptos::logging::warn!("canvas socket error: {e}");
            }
        }

        session.update(|s| s.connection_status = ConnectionStatus::Disconnected);

        // Exponential backoff before reconnect.
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = next_backoff_ms(backoff_ms);
    }
}

/// Connect to the WebSocket and process messages until disconnect.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    session: leptos::prelude::RwSignal<SessionState>,
    rx: &std::rc::Rc<std::cell::RefCell<futures::channel::mpsc::UnboundedReceiver<String>>>,
) -> Result<(), String> {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;
    use leptos::prelude::Update;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    session.update(|s| s.connection_status = ConnectionStatus::Connected);

    // Announce interest explicitly so the server replays its welcome on a
    // reconnected socket, not just on the first connection.
    let subscribe = Envelope::request("canvas:subscribe", serde_json::json!({}));
    match subscribe.encode() {
        Ok(text) => ws_write.send(Message::Text(text)).await.map_err(|e| e.to_string())?,
        Err(e) => leptos::logging::warn!("subscribe encode failed: {e}"),
    }

    // Forward outgoing messages from our channel to the WS.
    let mut rx_borrow = rx.borrow_mut();
    let send_task = async {
        while let Some(msg) = rx_borrow.next().await {
            if ws_write.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    };

    // Receive loop: decode and dispatch incoming envelopes.
    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match Envelope::decode(&text) {
                    Ok(envelope) => session.update(|s| dispatch_envelope(&envelope, s)),
                    Err(e) => leptos::logging::warn!("undecodable envelope: {e}"),
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("canvas socket recv error: {e}");
                    break;
                }
            }
        }
    };

    // Run send/recv loops; when either finishes, the connection is done.
    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}
