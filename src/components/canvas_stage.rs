//! Bridge component between Leptos state and the viewport controller.
//!
//! ARCHITECTURE
//! ============
//! The `viewport` crate owns coordinate math while this host maps DOM
//! events into controller operations and publishes viewport telemetry for
//! chrome. Drag pans, wheel zooms toward the cursor, and the toolbar
//! drives the discrete zoom/reset/fit operations.

#[cfg(test)]
#[path = "canvas_stage_test.rs"]
mod canvas_stage_test;

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::state::viewport_view::ViewportViewState;

#[cfg(feature = "hydrate")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use viewport::consts::{ZOOM_STEP_IN, ZOOM_STEP_OUT};

#[cfg(feature = "hydrate")]
use crate::util::viewport_glue::{build_controller, pointer_point, wheel_point, wheel_zoom_factor};

/// Format the zoom readout ("100%").
fn format_zoom_label(zoom: f64) -> String {
    format!("{:.0}%", zoom * 100.0)
}

/// Format the extent readout ("1024 × 1024"), or a placeholder while the
/// canvas metadata is still loading.
fn format_extent_label(extent: Option<viewport::camera::CanvasExtent>) -> String {
    extent.map_or_else(
        || "loading...".to_owned(),
        |e| format!("{:.0} × {:.0}", e.width, e.height),
    )
}

/// The interactive viewport host for the open canvas.
#[component]
pub fn CanvasStage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let viewport_view = expect_context::<RwSignal<ViewportViewState>>();
    #[cfg(feature = "hydrate")]
    let sender = expect_context::<RwSignal<crate::app::SocketSender>>();
    let host_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    let controller = Rc::new(RefCell::new(build_controller(host_ref, viewport_view, sender)));
    #[cfg(feature = "hydrate")]
    let drag_from = Rc::new(Cell::new(None::<viewport::camera::Point>));

    // Fit the view whenever the session learns a new extent.
    #[cfg(feature = "hydrate")]
    {
        let controller = Rc::clone(&controller);
        Effect::new(move || {
            let Some(extent) = session.get().extent else {
                return;
            };
            let mut controller = controller.borrow_mut();
            if controller.extent() != Some(extent) {
                controller.reset_to_fit(extent);
            }
        });
    }

    #[cfg(feature = "hydrate")]
    let on_pointer_down = {
        let drag_from = Rc::clone(&drag_from);
        move |ev: leptos::ev::PointerEvent| {
            if ev.button() != 0 {
                return;
            }
            drag_from.set(Some(pointer_point(&ev)));
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let on_pointer_down = |_ev: leptos::ev::PointerEvent| {};

    #[cfg(feature = "hydrate")]
    let on_pointer_move = {
        let controller = Rc::clone(&controller);
        let drag_from = Rc::clone(&drag_from);
        move |ev: leptos::ev::PointerEvent| {
            let Some(last) = drag_from.get() else {
                return;
            };
            let current = pointer_point(&ev);
            drag_from.set(Some(current));
            controller.borrow_mut().pan(current.x - last.x, current.y - last.y);
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let on_pointer_move = |_ev: leptos::ev::PointerEvent| {};

    #[cfg(feature = "hydrate")]
    let on_pointer_up = {
        let drag_from = Rc::clone(&drag_from);
        move |_ev: leptos::ev::PointerEvent| drag_from.set(None)
    };
    #[cfg(not(feature = "hydrate"))]
    let on_pointer_up = |_ev: leptos::ev::PointerEvent| {};

    #[cfg(feature = "hydrate")]
    let on_pointer_leave = {
        let drag_from = Rc::clone(&drag_from);
        move |_ev: leptos::ev::PointerEvent| drag_from.set(None)
    };
    #[cfg(not(feature = "hydrate"))]
    let on_pointer_leave = |_ev: leptos::ev::PointerEvent| {};

    #[cfg(feature = "hydrate")]
    let on_wheel = {
        let controller = Rc::clone(&controller);
        move |ev: leptos::ev::WheelEvent| {
            ev.prevent_default();
            let at = wheel_point(&ev);
            controller.borrow_mut().zoom_toward(wheel_zoom_factor(ev.delta_y()), at.x, at.y);
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let on_wheel = |_ev: leptos::ev::WheelEvent| {};

    #[cfg(feature = "hydrate")]
    let on_zoom_in = {
        let controller = Rc::clone(&controller);
        move |_ev: leptos::ev::MouseEvent| controller.borrow_mut().zoom_centered(ZOOM_STEP_IN)
    };
    #[cfg(not(feature = "hydrate"))]
    let on_zoom_in = |_ev: leptos::ev::MouseEvent| {};

    #[cfg(feature = "hydrate")]
    let on_zoom_out = {
        let controller = Rc::clone(&controller);
        move |_ev: leptos::ev::MouseEvent| controller.borrow_mut().zoom_centered(ZOOM_STEP_OUT)
    };
    #[cfg(not(feature = "hydrate"))]
    let on_zoom_out = |_ev: leptos::ev::MouseEvent| {};

    #[cfg(feature = "hydrate")]
    let on_reset = {
        let controller = Rc::clone(&controller);
        move |_ev: leptos::ev::MouseEvent| controller.borrow_mut().reset_view()
    };
    #[cfg(not(feature = "hydrate"))]
    let on_reset = |_ev: leptos::ev::MouseEvent| {};

    #[cfg(feature = "hydrate")]
    let on_fit = {
        let controller = Rc::clone(&controller);
        move |_ev: leptos::ev::MouseEvent| {
            if let Some(extent) = session.get_untracked().extent {
                controller.borrow_mut().reset_to_fit(extent);
            }
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let on_fit = |_ev: leptos::ev::MouseEvent| {};

    view! {
        <div class="canvas-stage">
            <div class="canvas-stage__toolbar">
                <button class="btn canvas-stage__zoom-in" on:click=on_zoom_in title="Zoom in">
                    "+"
                </button>
                <button class="btn canvas-stage__zoom-out" on:click=on_zoom_out title="Zoom out">
                    "-"
                </button>
                <button class="btn canvas-stage__reset" on:click=on_reset title="Reset view">
                    "1:1"
                </button>
                <button class="btn canvas-stage__fit" on:click=on_fit title="Fit canvas">
                    "Fit"
                </button>
                <span class="canvas-stage__readout">
                    {move || format_zoom_label(viewport_view.get().zoom)}
                </span>
                <span class="canvas-stage__extent">
                    {move || format_extent_label(session.get().extent)}
                </span>
            </div>
            <div
                class="canvas-stage__host"
                node_ref=host_ref
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointerleave=on_pointer_leave
                on:wheel=on_wheel
            ></div>
        </div>
    }
}
