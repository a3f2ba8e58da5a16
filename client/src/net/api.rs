//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! fetched from the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::LayerRecord;

/// Prefix the server mounts the API under.
pub const API_PREFIX: &str = "/fauno-api/v1";

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn layers_endpoint() -> String {
    format!("{API_PREFIX}/shapefiles/layers")
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn layers_failed_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!("layer request failed: {status} ({detail})"),
        _ => format!("layer request failed: {status}"),
    }
}

/// Fetch published layers from `GET /fauno-api/v1/shapefiles/layers`.
///
/// # Errors
///
/// Returns an error string if the request fails, the server answers with a
/// non-success status, or the body cannot be decoded.
pub async fn fetch_layers() -> Result<Vec<LayerRecord>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&layers_endpoint())
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let detail = resp
                .json::<super::types::ApiErrorBody>()
                .await
                .ok()
                .map(|b| b.detail);
            return Err(layers_failed_message(resp.status(), detail.as_deref()));
        }
        resp.json::<Vec<LayerRecord>>()
            .await
            .map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
