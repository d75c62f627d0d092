//! REST API helpers for canvas metadata.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so metadata
//! fetch failures degrade to empty lists and placeholder labels without
//! crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::CanvasListItem;

#[cfg(any(test, feature = "hydrate"))]
fn canvas_endpoint(canvas_id: &str) -> String {
    format!("/api/canvases/{canvas_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn list_request_failed_message(status: u16) -> String {
    format!("canvas list request failed: {status}")
}

/// Fetch all canvases from `/api/canvases`.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the server responds
/// with a non-OK status. On the server this always fails.
pub async fn fetch_canvas_list() -> Result<Vec<CanvasListItem>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/canvases")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(list_request_failed_message(resp.status()));
        }
        #[derive(serde::Deserialize)]
        struct CanvasListResponse {
            canvases: Vec<CanvasListItem>,
        }
        let body: CanvasListResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.canvases)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Fetch a single canvas from `/api/canvases/{canvas_id}`.
/// Returns `None` if the canvas is unknown or on the server.
pub async fn fetch_canvas(canvas_id: &str) -> Option<CanvasListItem> {
    #[cfg(feature = "hydrate")]
    {
        let url = canvas_endpoint(canvas_id);
        let resp = gloo_net::http::Request::get(&url).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<CanvasListItem>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = canvas_id;
        None
    }
}
