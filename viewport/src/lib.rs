//! Headless pan/zoom viewport engine for the pixel canvas client.
//!
//! This crate owns viewport math only: camera state, screen↔world coordinate
//! conversion, position clamping that keeps the canvas partially visible at
//! any zoom, and a controller that orchestrates the three behind throttled
//! change notifications. It has no browser dependencies; the host injects
//! element geometry, an event sink, and a clock, so the whole engine runs
//! under native tests as well as in the browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | Camera state and coordinate conversions |
//! | [`clamp`] | Position clamping against the canvas extent |
//! | [`controller`] | Viewport operations and change notification |
//! | [`emit`] | Notification payload and rate limiter |
//! | [`consts`] | Shared numeric constants (zoom limits, margins, etc.) |

pub mod camera;
pub mod clamp;
pub mod consts;
pub mod controller;
pub mod emit;
