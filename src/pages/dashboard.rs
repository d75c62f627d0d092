//! Dashboard page listing canvases with open actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route. It fetches canvas inventory over REST once
//! on mount and renders a card per canvas linking into the workspace.

use leptos::prelude::*;

use crate::components::canvas_card::CanvasCard;
use crate::state::canvases::CanvasesState;

/// Dashboard page — shows the canvas list.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let canvases = expect_context::<RwSignal<CanvasesState>>();

    let requested_list = RwSignal::new(false);
    Effect::new(move || {
        if requested_list.get() {
            return;
        }
        requested_list.set(true);
        canvases.update(|s| s.loading = true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_canvas_list().await {
                Ok(items) => canvases.update(|s| {
                    s.items = items;
                    s.loading = false;
                    s.error = None;
                }),
                Err(err) => canvases.update(|s| {
                    s.loading = false;
                    s.error = Some(err);
                }),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        canvases.update(|s| s.loading = false);
    });

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__title">"Canvases"</span>
            </header>

            <div class="dashboard-page__grid">
                <Show when=move || canvases.get().error.is_some()>
                    <p class="dashboard-page__error">
                        {move || canvases.get().error.unwrap_or_default()}
                    </p>
                </Show>
                <Show
                    when=move || !canvases.get().loading
                    fallback=move || view! { <p>"Loading canvases..."</p> }
                >
                    <div class="dashboard-page__cards">
                        {move || {
                            canvases
                                .get()
                                .items
                                .into_iter()
                                .map(|item| view! { <CanvasCard item=item/> })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </div>
        </div>
    }
}
