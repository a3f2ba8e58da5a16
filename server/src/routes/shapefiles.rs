//! Shapefile API routes: health, layer listing and upload.
//!
//! Handlers translate the multipart form into an `UploadRequest` and service
//! errors into `{"detail": ...}` responses. Everything else lives in
//! `services::shapefile`.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use client::net::types::{ApiErrorBody, LayerRecord};

use crate::config::DEFAULT_SRID;
use crate::services::archive::ArchiveError;
use crate::services::shapefile::{ShapefileError, ShapefileService, UploadRequest, UploadResult, parse_truthy};
use crate::state::AppState;

pub type ApiError = (StatusCode, Json<ApiErrorBody>);

pub(crate) fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (status, Json(ApiErrorBody { detail: detail.into() }))
}

/// `GET <prefix>/shapefiles/health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET <prefix>/shapefiles/layers`: layers registered in the configured schema.
pub async fn list_layers(State(state): State<AppState>) -> Result<Json<Vec<LayerRecord>>, ApiError> {
    let layers = ShapefileService::from_state(&state)
        .list_layers()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "layer listing failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("failed to list layers: {e}"))
        })?;
    Ok(Json(layers))
}

/// `POST <prefix>/shapefiles/upload`: import a zipped shapefile and publish it.
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Json<UploadResult>, ApiError> {
    let req = read_upload_form(multipart).await?;
    tracing::info!(file = %req.file_name, bytes = req.bytes.len(), inde = req.publish_on_inde, "upload received");

    ShapefileService::from_state(&state)
        .upload(req)
        .await
        .map(Json)
        .map_err(shapefile_error_to_response)
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadRequest, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut workspace = None;
    let mut datastore = None;
    let mut srid = None;
    let mut publish_on_inde = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, bytes.to_vec()));
            }
            "workspace" => workspace = Some(field.text().await.map_err(multipart_error)?),
            "datastore" => datastore = Some(field.text().await.map_err(multipart_error)?),
            "srid" => srid = Some(field.text().await.map_err(multipart_error)?),
            "publishOnINDE" => publish_on_inde = Some(field.text().await.map_err(multipart_error)?),
            other => tracing::debug!(field = %other, "ignoring unknown upload field"),
        }
    }

    let Some((file_name, bytes)) = file else {
        return Err(shapefile_error_to_response(ShapefileError::InvalidField(
            "Missing 'file' field.".to_owned(),
        )));
    };
    let srid = parse_srid(srid.as_deref()).map_err(shapefile_error_to_response)?;

    Ok(UploadRequest {
        file_name,
        bytes,
        workspace,
        datastore,
        srid,
        publish_on_inde: parse_truthy(publish_on_inde.as_deref()),
    })
}

/// Parse the optional `srid` form field, defaulting when blank.
pub(crate) fn parse_srid(raw: Option<&str>) -> Result<i32, ShapefileError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_SRID),
        Some(v) => v
            .parse::<i32>()
            .map_err(|_| ShapefileError::InvalidField(format!("Invalid srid: {v}"))),
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    tracing::warn!(error = %err, "malformed multipart upload");
    api_error(err.status(), err.body_text())
}

pub(crate) fn shapefile_error_to_response(err: ShapefileError) -> ApiError {
    if err.is_publish_failure() {
        tracing::error!(error = %err, "shapefile publish failed");
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Publish failed: {err}"));
    }
    match err {
        ShapefileError::Archive(ArchiveError::Io(_)) | ShapefileError::Task(_) => {
            tracing::error!(error = %err, "upload processing failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        _ => {
            tracing::warn!(error = %err, "upload rejected");
            api_error(StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

#[cfg(test)]
#[path = "shapefiles_test.rs"]
mod tests;
