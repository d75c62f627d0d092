//! Application state shared through Leptos context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module owns one slice of client state. Components read/write these
//! through `RwSignal` contexts provided by the root `App` component.

pub mod canvases;
pub mod session;
pub mod viewport_view;
