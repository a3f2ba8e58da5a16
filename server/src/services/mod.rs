//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the upload pipeline, PostGIS access and GeoServer REST
//! calls so route handlers can stay focused on multipart parsing and status
//! mapping.

pub mod archive;
pub mod geoserver;
pub mod naming;
pub mod shapefile;
pub mod sld;
pub mod store;
