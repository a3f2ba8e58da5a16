//! GeoServer REST client.
//!
//! DESIGN
//! ======
//! `GeoServerApi` exposes the six publishing steps used by the shapefile
//! service. Creation steps are idempotent: an existing style or feature type
//! is skipped, and "already exists" answers (409, or 500 with that message)
//! count as success. Status interpretation lives in small pure functions so
//! it can be tested without a server.

use std::time::Duration;

use reqwest::StatusCode;

use crate::config::GeoServerSettings;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const XML: &str = "text/xml";
const SLD_CONTENT_TYPE: &str = "application/vnd.ogc.se+xml";

#[derive(Debug, thiserror::Error)]
pub enum GeoServerError {
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("workspace '{0}' does not exist on GeoServer")]
    MissingWorkspace(String),
    #[error("{method} {url} returned {status}: {body}")]
    Status { method: &'static str, url: String, status: u16, body: String },
}

#[async_trait::async_trait]
pub trait GeoServerApi: Send + Sync {
    /// Step 1: register style `name` backed by `filename` in `workspace`.
    async fn create_style_registration(&self, name: &str, workspace: &str, filename: &str)
    -> Result<(), GeoServerError>;
    /// Step 2: upload the SLD body for style `name`.
    async fn upload_style_sld(&self, name: &str, workspace: &str, sld_xml: &str) -> Result<(), GeoServerError>;
    /// Step 3: publish `layer` (a table in `datastore`) as a feature type.
    async fn create_featuretype(&self, workspace: &str, datastore: &str, layer: &str) -> Result<(), GeoServerError>;
    /// Step 4: make `style` the default style of `workspace:layer`.
    async fn set_default_style(&self, layer: &str, workspace: &str, style: &str) -> Result<(), GeoServerError>;
    /// Step 5: length of the stored SLD, `None` when it cannot be fetched.
    async fn style_sld_length(&self, workspace: &str, name: &str) -> Result<Option<u64>, GeoServerError>;
    /// Step 6: HTTP status of `workspace:layer`.
    async fn layer_status(&self, layer: &str, workspace: &str) -> Result<u16, GeoServerError>;
}

// =============================================================================
// URLS
// =============================================================================

pub(crate) fn workspace_url(base: &str, workspace: &str) -> String {
    format!("{base}/workspaces/{workspace}")
}

pub(crate) fn styles_url(base: &str, workspace: &str) -> String {
    format!("{base}/workspaces/{workspace}/styles")
}

pub(crate) fn style_url(base: &str, workspace: &str, name: &str, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{base}/workspaces/{workspace}/styles/{name}.{ext}"),
        None => format!("{base}/workspaces/{workspace}/styles/{name}"),
    }
}

pub(crate) fn featuretypes_url(base: &str, workspace: &str, datastore: &str) -> String {
    format!("{base}/workspaces/{workspace}/datastores/{datastore}/featuretypes")
}

pub(crate) fn layer_url(base: &str, workspace: &str, layer: &str) -> String {
    format!("{base}/layers/{workspace}:{layer}")
}

// =============================================================================
// PAYLOADS + STATUS RULES
// =============================================================================

pub(crate) fn style_registration_xml(name: &str, filename: &str) -> String {
    format!("<style><name>{name}</name><filename>{filename}</filename></style>")
}

pub(crate) fn featuretype_xml(layer: &str) -> String {
    format!("<featureType><name>{layer}</name></featureType>")
}

pub(crate) fn default_style_xml(style: &str, workspace: &str) -> String {
    format!(
        "<layer>\n  <defaultStyle>\n    <name>{style}</name>\n    <workspace>{workspace}</workspace>\n  </defaultStyle>\n</layer>"
    )
}

/// Outcome of a create call: created, conflict, or "already exists" as a 500.
pub(crate) fn create_accepted(status: u16, body: &str) -> bool {
    matches!(status, 200 | 201 | 409) || (status == 500 && body.to_ascii_lowercase().contains("already exists"))
}

pub(crate) fn update_accepted(status: u16) -> bool {
    matches!(status, 200 | 201)
}

/// Length of a downloaded SLD in characters.
pub(crate) fn sld_text_length(body: &str) -> Option<u64> {
    u64::try_from(body.chars().count()).ok()
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeoServerClient {
    http: reqwest::Client,
    base: String,
    user: String,
    password: String,
}

impl GeoServerClient {
    /// Build a client for the configured REST endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(settings: &GeoServerSettings) -> Result<Self, GeoServerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GeoServerError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base: settings.base_url.trim_end_matches('/').to_owned(),
            user: settings.user.clone(),
            password: settings.password.clone(),
        })
    }

    async fn send(&self, req: reqwest::RequestBuilder, url: &str) -> Result<(u16, String), GeoServerError> {
        let resp = req
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await
            .map_err(|e| GeoServerError::Request { url: url.to_owned(), message: e.to_string() })?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| GeoServerError::Request { url: url.to_owned(), message: e.to_string() })?;
        Ok((status, body))
    }

    async fn get(&self, url: &str) -> Result<(u16, String), GeoServerError> {
        self.send(self.http.get(url), url).await
    }

    async fn exists(&self, url: &str) -> Result<bool, GeoServerError> {
        let (status, _) = self.get(url).await?;
        Ok(status == StatusCode::OK.as_u16())
    }

    async fn send_xml(
        &self,
        method: &'static str,
        url: &str,
        content_type: &str,
        body: String,
    ) -> Result<(u16, String), GeoServerError> {
        let req = match method {
            "PUT" => self.http.put(url),
            _ => self.http.post(url),
        };
        let req = req
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::ACCEPT, "application/xml")
            .body(body);
        self.send(req, url).await
    }
}

fn status_error(method: &'static str, url: &str, status: u16, body: String) -> GeoServerError {
    GeoServerError::Status { method, url: url.to_owned(), status, body }
}

#[async_trait::async_trait]
impl GeoServerApi for GeoServerClient {
    async fn create_style_registration(
        &self,
        name: &str,
        workspace: &str,
        filename: &str,
    ) -> Result<(), GeoServerError> {
        if !self.exists(&workspace_url(&self.base, workspace)).await? {
            return Err(GeoServerError::MissingWorkspace(workspace.to_owned()));
        }
        if self.exists(&style_url(&self.base, workspace, name, Some("xml"))).await? {
            tracing::debug!(%workspace, style = %name, "style already registered");
            return Ok(());
        }

        let url = styles_url(&self.base, workspace);
        let (status, body) = self
            .send_xml("POST", &url, XML, style_registration_xml(name, filename))
            .await?;
        if create_accepted(status, &body) {
            return Ok(());
        }
        Err(status_error("POST", &url, status, body))
    }

    async fn upload_style_sld(&self, name: &str, workspace: &str, sld_xml: &str) -> Result<(), GeoServerError> {
        let url = style_url(&self.base, workspace, name, None);
        let (status, body) = self
            .send_xml("PUT", &url, SLD_CONTENT_TYPE, sld_xml.to_owned())
            .await?;
        if update_accepted(status) {
            return Ok(());
        }
        Err(status_error("PUT", &url, status, body))
    }

    async fn create_featuretype(&self, workspace: &str, datastore: &str, layer: &str) -> Result<(), GeoServerError> {
        let base_url = featuretypes_url(&self.base, workspace, datastore);
        if self.exists(&format!("{base_url}/{layer}.xml")).await? {
            tracing::debug!(%workspace, %layer, "feature type already published");
            return Ok(());
        }

        let (status, body) = self
            .send_xml("POST", &base_url, XML, featuretype_xml(layer))
            .await?;
        if create_accepted(status, &body) {
            return Ok(());
        }
        Err(status_error("POST", &base_url, status, body))
    }

    async fn set_default_style(&self, layer: &str, workspace: &str, style: &str) -> Result<(), GeoServerError> {
        let url = layer_url(&self.base, workspace, layer);
        let (status, body) = self
            .send_xml("PUT", &url, XML, default_style_xml(style, workspace))
            .await?;
        if update_accepted(status) {
            return Ok(());
        }
        Err(status_error("PUT", &url, status, body))
    }

    async fn style_sld_length(&self, workspace: &str, name: &str) -> Result<Option<u64>, GeoServerError> {
        let (status, body) = self
            .get(&style_url(&self.base, workspace, name, Some("sld")))
            .await?;
        if status != StatusCode::OK.as_u16() {
            return Ok(None);
        }
        Ok(sld_text_length(&body))
    }

    async fn layer_status(&self, layer: &str, workspace: &str) -> Result<u16, GeoServerError> {
        let (status, _) = self.get(&layer_url(&self.base, workspace, layer)).await?;
        Ok(status)
    }
}

#[cfg(test)]
#[path = "geoserver_test.rs"]
mod tests;
