//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the shapefile API and stitches it with Leptos SSR
//! rendering under a single Axum router. The API lives under the configured
//! prefix (default `/fauno-api/v1`) while the Leptos app lives under `/fauno`.

pub mod shapefiles;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use client::routes::RouteTable;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::CorsSettings;
use crate::state::AppState;

/// API routes plus the root redirect and liveness probe.
pub fn api_routes(state: AppState) -> Router {
    let prefix = state.settings.api.prefix.trim_end_matches('/').to_owned();
    let upload_limit = DefaultBodyLimit::max(state.settings.upload.max_bytes);
    let cors = cors_layer(&state.settings.cors);

    let shapefile_routes = Router::new()
        .route("/upload", post(shapefiles::upload).layer(upload_limit))
        .route("/health", get(shapefiles::health))
        .route("/layers", get(shapefiles::list_layers));

    Router::new()
        .nest(&format!("{prefix}/shapefiles"), shapefile_routes)
        .route("/", get(redirect_root_to_app))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from settings. A `*` entry allows anything. With
/// credentials enabled a `*` entry mirrors the request's origin, method or
/// headers rather than answering with a literal wildcard.
pub(crate) fn cors_layer(cors: &CorsSettings) -> CorsLayer {
    let wildcard = |values: &[String]| values.iter().any(|v| v.trim() == "*");
    let credentials = cors.allow_credentials;

    let origin: AllowOrigin = match (wildcard(&cors.allow_origins), credentials) {
        (true, true) => AllowOrigin::mirror_request(),
        (true, false) => Any.into(),
        (false, _) => cors
            .allow_origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o.trim()).ok())
            .collect::<Vec<_>>()
            .into(),
    };
    let methods: AllowMethods = match (wildcard(&cors.allow_methods), credentials) {
        (true, true) => AllowMethods::mirror_request(),
        (true, false) => Any.into(),
        (false, _) => cors
            .allow_methods
            .iter()
            .filter_map(|m| Method::from_bytes(m.trim().to_ascii_uppercase().as_bytes()).ok())
            .collect::<Vec<_>>()
            .into(),
    };
    let headers: AllowHeaders = match (wildcard(&cors.allow_headers), credentials) {
        (true, true) => AllowHeaders::mirror_request(),
        (true, false) => Any.into(),
        (false, _) => cors
            .allow_headers
            .iter()
            .filter_map(|h| HeaderName::from_bytes(h.trim().as_bytes()).ok())
            .collect::<Vec<_>>()
            .into(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(credentials)
}

async fn redirect_root_to_app() -> Redirect {
    Redirect::temporary(client::routes::BASE_PATH)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Requests no route claimed. Client routes reached with the other
/// trailing-slash form are redirected to it; everything else is a 404.
async fn fallback(uri: Uri) -> Response {
    match trailing_slash_redirect(uri.path()) {
        Some(target) => {
            let target = match uri.query() {
                Some(q) => format!("{target}?{q}"),
                None => target,
            };
            Redirect::permanent(&target).into_response()
        }
        None => shapefiles::api_error(StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Alternate spelling of a known client route: trailing slash toggled.
pub(crate) fn trailing_slash_redirect(path: &str) -> Option<String> {
    RouteTable::fauno().resolve(path)?;
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_owned()),
        Some(_) => None,
        None => Some(format!("{path}/")),
    }
}

/// Leptos SSR frontend: API routes + Leptos SSR at `/fauno` + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    // Leptos SSR routes (under /fauno via client-side route definitions).
    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback(fallback)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
