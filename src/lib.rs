//! # pixelboard
//!
//! Leptos + WASM frontend for the collaborative pixel-canvas application.
//!
//! This crate contains pages, components, application state, network types,
//! and the WebSocket connection manager. It integrates with the `viewport`
//! crate for pan/zoom coordinate math via the `CanvasStage` bridge component.
//! Browser-only code is gated behind the `hydrate` feature so everything
//! else compiles and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the app shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
