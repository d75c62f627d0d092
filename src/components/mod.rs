//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render canvas chrome and interaction surfaces while
//! reading/writing shared state from Leptos context providers.

pub mod canvas_card;
pub mod canvas_stage;
