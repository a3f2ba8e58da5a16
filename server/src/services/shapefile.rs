//! Shapefile upload pipeline: extract, import into PostGIS, publish on GeoServer.
//!
//! ARCHITECTURE
//! ============
//! `ShapefileService` composes a `LayerStore` and a `GeoServerApi`, both
//! taken from `AppState` as trait objects. Route handlers only translate
//! multipart fields into an `UploadRequest` and errors into HTTP responses.
//!
//! Publishing one workspace runs six steps in order: register style, upload
//! SLD, create feature type, set default style, verify the stored SLD, read
//! the layer status. INDE publishing repeats them in the INDE workspace.

use std::sync::Arc;

use client::net::types::LayerRecord;
use serde::Serialize;

use super::archive::{self, ArchiveError, ExtractedShapefile, UploadDir};
use super::geoserver::{GeoServerApi, GeoServerError};
use super::naming::{sanitize_layer_name, style_filename, style_name};
use super::sld::{basic_polygon_sld, sld_length_ok};
use super::store::{LayerStore, Shapefile, StoreError};
use crate::config::Settings;
use crate::state::AppState;

pub const PUBLISHED_STATUS: &str = "Published successfully on GeoServer";

#[derive(Debug, thiserror::Error)]
pub enum ShapefileError {
    #[error("Send a .zip file containing the shapefile.")]
    NotZip,
    #[error("{0}")]
    InvalidField(String),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    GeoServer(#[from] GeoServerError),
    #[error("table {0} missing after import")]
    ImportedTableMissing(String),
    #[error("INDE workspace/datastore not configured.")]
    IndeNotConfigured,
    #[error("upload task failed: {0}")]
    Task(String),
}

impl ShapefileError {
    /// Whether the failure happened while importing or publishing, as opposed
    /// to rejecting the upload itself.
    #[must_use]
    pub fn is_publish_failure(&self) -> bool {
        matches!(
            self,
            Self::Store(_) | Self::GeoServer(_) | Self::ImportedTableMissing(_) | Self::IndeNotConfigured
        )
    }
}

/// Parsed upload form.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub workspace: Option<String>,
    pub datastore: Option<String>,
    pub srid: i32,
    pub publish_on_inde: bool,
}

/// Result of publishing one layer in one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub layer: String,
    pub style: String,
    pub sld_filename: String,
    pub sld_ok: bool,
    pub sld_length: Option<u64>,
    pub http_status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishResult {
    pub main: PublishReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inde: Option<PublishReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub layer: String,
    pub workspace: String,
    pub datastore: String,
    pub database_table: String,
    pub status: String,
    pub geoserver: PublishResult,
}

/// Where a layer is published: workspace plus datastore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub workspace: String,
    pub datastore: String,
}

/// Interpret a form flag: `1`, `true`, `yes`, `on` (any case, trimmed).
#[must_use]
pub fn parse_truthy(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[must_use]
pub fn is_zip_file_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".zip")
}

pub struct ShapefileService {
    store: Arc<dyn LayerStore>,
    geoserver: Arc<dyn GeoServerApi>,
    settings: Arc<Settings>,
}

impl ShapefileService {
    #[must_use]
    pub fn new(store: Arc<dyn LayerStore>, geoserver: Arc<dyn GeoServerApi>, settings: Arc<Settings>) -> Self {
        Self { store, geoserver, settings }
    }

    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.store.clone(), state.geoserver.clone(), state.settings.clone())
    }

    fn schema(&self) -> &str {
        self.settings.layer_schema()
    }

    /// Layers registered in the configured schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_layers(&self) -> Result<Vec<LayerRecord>, ShapefileError> {
        Ok(self.store.list_layers(self.schema()).await?)
    }

    /// Run the full upload pipeline. The scratch directory is removed before
    /// this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error when the upload is rejected or importing/publishing fails.
    pub async fn upload(&self, req: UploadRequest) -> Result<UploadResult, ShapefileError> {
        if !is_zip_file_name(&req.file_name) {
            return Err(ShapefileError::NotZip);
        }

        let geo = &self.settings.geo_server;
        let target = PublishTarget {
            workspace: non_blank(req.workspace.as_deref()).unwrap_or(&geo.workspace).to_owned(),
            datastore: non_blank(req.datastore.as_deref()).unwrap_or(&geo.datastore).to_owned(),
        };

        let temp_root = self.settings.upload_temp_root();
        let file_name = req.file_name.clone();
        let bytes = req.bytes;
        let (upload_dir, extracted) =
            tokio::task::spawn_blocking(move || -> Result<(UploadDir, ExtractedShapefile), ArchiveError> {
                let dir = UploadDir::create(&temp_root)?;
                let extracted = archive::unpack_shapefile(dir.path(), &file_name, &bytes)?;
                Ok((dir, extracted))
            })
            .await
            .map_err(|e| ShapefileError::Task(e.to_string()))??;

        let layer = sanitize_layer_name(&extracted.stem);
        let shapefile = Shapefile { name: layer.clone(), path: extracted.shp_path.clone(), srid: req.srid };
        tracing::info!(
            %layer,
            workspace = %target.workspace,
            datastore = %target.datastore,
            srid = req.srid,
            has_sld = extracted.sld_xml.is_some(),
            "shapefile extracted"
        );

        let outcome = match self.import_to_postgis(&shapefile).await {
            Ok(()) => {
                self.publish_on_geoserver(&shapefile, &target, extracted.sld_xml.as_deref(), req.publish_on_inde)
                    .await
            }
            Err(e) => Err(e),
        };
        drop(upload_dir);

        let geoserver = outcome?;
        tracing::info!(%layer, inde = geoserver.inde.is_some(), "shapefile published");
        Ok(UploadResult {
            layer: layer.clone(),
            workspace: target.workspace,
            datastore: target.datastore,
            database_table: layer,
            status: PUBLISHED_STATUS.to_owned(),
            geoserver,
        })
    }

    /// Replace the layer's table: drop it if present, then import with `ogr2ogr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the drop, the import, or the post-import check fails.
    pub async fn import_to_postgis(&self, shp: &Shapefile) -> Result<(), ShapefileError> {
        let schema = self.schema();
        self.store.drop_table_if_exists(schema, &shp.name).await?;
        self.store.import_shapefile(shp, schema).await?;
        if !self.store.table_exists(schema, &shp.name).await? {
            return Err(ShapefileError::ImportedTableMissing(format!("{schema}.{}", shp.name)));
        }
        Ok(())
    }

    /// Publish the imported table on the main target and, when requested and
    /// enabled, on the INDE workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if any GeoServer step fails or INDE is requested but
    /// not configured.
    pub async fn publish_on_geoserver(
        &self,
        shp: &Shapefile,
        target: &PublishTarget,
        sld_xml: Option<&str>,
        publish_on_inde: bool,
    ) -> Result<PublishResult, ShapefileError> {
        let final_sld = sld_xml.map_or_else(|| basic_polygon_sld(&shp.name), str::to_owned);

        let main = self.publish_workspace(&shp.name, target, &final_sld).await?;

        let inde = if publish_on_inde && self.settings.inde.enabled {
            let inde_target = self.inde_target()?;
            Some(self.publish_workspace(&shp.name, &inde_target, &final_sld).await?)
        } else {
            if publish_on_inde {
                tracing::warn!(layer = %shp.name, "INDE publishing requested but disabled");
            }
            None
        };

        Ok(PublishResult { main, inde })
    }

    fn inde_target(&self) -> Result<PublishTarget, ShapefileError> {
        let inde = &self.settings.inde;
        match (non_blank(inde.workspace.as_deref()), non_blank(inde.datastore.as_deref())) {
            (Some(workspace), Some(datastore)) => {
                Ok(PublishTarget { workspace: workspace.to_owned(), datastore: datastore.to_owned() })
            }
            _ => Err(ShapefileError::IndeNotConfigured),
        }
    }

    async fn publish_workspace(
        &self,
        layer: &str,
        target: &PublishTarget,
        sld_xml: &str,
    ) -> Result<PublishReport, ShapefileError> {
        let ws = target.workspace.as_str();
        let style = style_name(layer);
        let filename = style_filename(layer);

        self.geoserver.create_style_registration(&style, ws, &filename).await?;
        self.geoserver.upload_style_sld(&style, ws, sld_xml).await?;
        self.geoserver.create_featuretype(ws, &target.datastore, layer).await?;
        self.geoserver.set_default_style(layer, ws, &style).await?;
        let sld_length = self.geoserver.style_sld_length(ws, &style).await?;
        let http_status = self.geoserver.layer_status(layer, ws).await?;

        tracing::debug!(%layer, workspace = %ws, ?sld_length, http_status, "workspace publish finished");
        Ok(PublishReport {
            layer: format!("{ws}:{layer}"),
            style,
            sld_filename: filename,
            sld_ok: sld_length_ok(sld_length),
            sld_length,
            http_status,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "shapefile_test.rs"]
mod tests;
