//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{canvas::CanvasPage, dashboard::DashboardPage};
use crate::state::canvases::CanvasesState;
use crate::state::session::SessionState;
use crate::state::viewport_view::ViewportViewState;

/// Shared handle for sending envelopes over the active canvas socket.
///
/// Empty until the connection manager installs a channel; sends before that
/// report failure instead of queueing.
#[derive(Clone, Default)]
pub struct SocketSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl SocketSender {
    /// Wrap the outbound channel of a freshly spawned socket.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn new(tx: futures::channel::mpsc::UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Send an envelope to the server.
    ///
    /// Returns `false` when no connection is active or the envelope cannot
    /// be encoded.
    pub fn send(&self, envelope: &crate::net::types::Envelope) -> bool {
        #[cfg(feature = "hydrate")]
        {
            let Some(tx) = self.tx.as_ref() else {
                return false;
            };
            match envelope.encode() {
                Ok(text) => tx.unbounded_send(text).is_ok(),
                Err(err) => {
                    leptos::logging::warn!("envelope encode failed: {err}");
                    false
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = envelope;
            false
        }
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Provide reactive state contexts for all child components.
    let canvases = RwSignal::new(CanvasesState::default());
    let session = RwSignal::new(SessionState::default());
    let viewport_view = RwSignal::new(ViewportViewState::default());
    let sender = RwSignal::new(SocketSender::default());

    provide_context(canvases);
    provide_context(session);
    provide_context(viewport_view);
    provide_context(sender);

    view! {
        <Stylesheet id="leptos" href="/pkg/pixelboard.css"/>
        <Title text="Pixelboard"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=(StaticSegment("canvas"), ParamSegment("id")) view=CanvasPage/>
            </Routes>
        </Router>
    }
}
