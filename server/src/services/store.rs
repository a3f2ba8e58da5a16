//! PostGIS access: table management, `ogr2ogr` imports and layer listing.
//!
//! DESIGN
//! ======
//! `LayerStore` is the seam the shapefile service depends on. `PgLayerStore`
//! backs it with the shared SQLx pool plus the GDAL `ogr2ogr` binary, which
//! must be on `PATH` at runtime.

use std::path::Path;

use client::net::types::LayerRecord;
use sqlx::{PgPool, Row};

use super::naming::quote_ident;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("failed to launch ogr2ogr: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("ogr2ogr failed: {0}")]
    Import(String),
}

/// Layer to import: sanitized name, source `.shp` and target SRID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shapefile {
    pub name: String,
    pub path: std::path::PathBuf,
    pub srid: i32,
}

#[async_trait::async_trait]
pub trait LayerStore: Send + Sync {
    async fn drop_table_if_exists(&self, schema: &str, table: &str) -> Result<(), StoreError>;
    async fn table_exists(&self, schema: &str, table: &str) -> Result<bool, StoreError>;
    async fn import_shapefile(&self, shp: &Shapefile, schema: &str) -> Result<(), StoreError>;
    async fn list_layers(&self, schema: &str) -> Result<Vec<LayerRecord>, StoreError>;
}

pub struct PgLayerStore {
    pool: PgPool,
    database_url: String,
}

impl PgLayerStore {
    #[must_use]
    pub fn new(pool: PgPool, database_url: String) -> Self {
        Self { pool, database_url }
    }
}

#[async_trait::async_trait]
impl LayerStore for PgLayerStore {
    async fn drop_table_if_exists(&self, schema: &str, table: &str) -> Result<(), StoreError> {
        let sql = drop_table_sql(schema, table);
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn table_exists(&self, schema: &str, table: &str) -> Result<bool, StoreError> {
        let row = sqlx::query(
            r"SELECT 1
              FROM information_schema.tables
              WHERE table_schema = $1 AND table_name = $2
              LIMIT 1",
        )
        .bind(schema)
        .bind(table)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    async fn import_shapefile(&self, shp: &Shapefile, schema: &str) -> Result<(), StoreError> {
        let args = ogr2ogr_args(&self.database_url, &shp.path, schema, &shp.name, shp.srid);
        tracing::info!(layer = %shp.name, %schema, srid = shp.srid, "running ogr2ogr import");
        let output = tokio::process::Command::new("ogr2ogr")
            .args(&args)
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            return Err(StoreError::Import(stderr));
        }
        Ok(())
    }

    async fn list_layers(&self, schema: &str) -> Result<Vec<LayerRecord>, StoreError> {
        let rows = sqlx::query(
            r"SELECT
                  f_table_schema::text AS f_table_schema,
                  f_table_name::text AS f_table_name,
                  f_geometry_column::text AS f_geometry_column,
                  coord_dimension,
                  srid,
                  type::text AS type
              FROM public.geometry_columns
              WHERE f_table_schema = $1
              ORDER BY f_table_name",
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(LayerRecord {
                    f_table_schema: row.try_get("f_table_schema")?,
                    f_table_name: row.try_get("f_table_name")?,
                    f_geometry_column: row.try_get("f_geometry_column")?,
                    coord_dimension: row.try_get("coord_dimension")?,
                    srid: row.try_get("srid")?,
                    geometry_type: row.try_get("type")?,
                })
            })
            .collect()
    }
}

pub(crate) fn drop_table_sql(schema: &str, table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}.{} CASCADE", quote_ident(schema), quote_ident(table))
}

/// Arguments for importing `shp` into `<schema>.<table>`, reprojected to `srid`.
pub(crate) fn ogr2ogr_args(database_url: &str, shp: &Path, schema: &str, table: &str, srid: i32) -> Vec<String> {
    vec![
        "-f".to_owned(),
        "PostgreSQL".to_owned(),
        database_url.to_owned(),
        shp.to_string_lossy().into_owned(),
        "-nln".to_owned(),
        format!("{schema}.{table}"),
        "-lco".to_owned(),
        "GEOMETRY_NAME=geom".to_owned(),
        "-lco".to_owned(),
        "FID=fid".to_owned(),
        "-nlt".to_owned(),
        "PROMOTE_TO_MULTI".to_owned(),
        "-overwrite".to_owned(),
        "-t_srs".to_owned(),
        format!("EPSG:{srid}"),
    ]
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
