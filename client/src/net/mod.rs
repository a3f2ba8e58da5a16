//! Networking modules for the shapefile HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs REST calls from the browser and `types` defines the
//! shared wire schema.

pub mod api;
pub mod types;
