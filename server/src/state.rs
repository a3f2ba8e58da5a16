//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the loaded settings plus the PostGIS store and GeoServer client as
//! trait objects, so handlers and services can be exercised with in-memory
//! doubles.

use std::sync::Arc;

use crate::config::Settings;
use crate::services::geoserver::GeoServerApi;
use crate::services::store::LayerStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<dyn LayerStore>,
    pub geoserver: Arc<dyn GeoServerApi>,
}

impl AppState {
    #[must_use]
    pub fn new(settings: Settings, store: Arc<dyn LayerStore>, geoserver: Arc<dyn GeoServerApi>) -> Self {
        Self { settings: Arc::new(settings), store, geoserver }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
