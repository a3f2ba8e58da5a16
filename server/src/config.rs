//! Application settings loaded from JSON appsettings files.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `Settings` once at startup and shares it through `AppState`.
//! The file is chosen by `ENVIRONMENT` (`docker` selects
//! `appsettings.docker.json`, anything else `appsettings.dev.json`) unless
//! `FAUNO_CONFIG` names a path explicitly. `DATABASE_URL` overrides the
//! connection built from the `Database` section.

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const DEFAULT_SRID: i32 = 4674;
const DEFAULT_UPLOAD_MAX_BYTES: usize = 512 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    pub database: DatabaseSettings,
    pub geo_server: GeoServerSettings,
    #[serde(rename = "INDE", default)]
    pub inde: IndeSettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    /// Full connection URL from `DATABASE_URL`, taking precedence over `database`.
    #[serde(skip)]
    pub database_url_override: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoServerSettings {
    /// REST endpoint root, e.g. `http://localhost:8080/geoserver/rest`.
    pub base_url: String,
    pub workspace: String,
    pub datastore: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndeSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_inde_workspace")]
    pub workspace: Option<String>,
    #[serde(default = "default_inde_datastore")]
    pub datastore: Option<String>,
}

impl Default for IndeSettings {
    fn default() -> Self {
        Self { enabled: true, workspace: default_inde_workspace(), datastore: default_inde_datastore() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadSettings {
    #[serde(default)]
    pub temp_path: Option<PathBuf>,
    #[serde(default = "default_upload_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self { temp_path: None, max_bytes: DEFAULT_UPLOAD_MAX_BYTES }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiSettings {
    pub title: String,
    pub version: String,
    pub host: String,
    pub port: u16,
    pub prefix: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            title: "Fauno API".to_owned(),
            version: "1.0.0".to_owned(),
            host: "0.0.0.0".to_owned(),
            port: 9090,
            prefix: "/fauno-api/v1".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CorsSettings {
    pub allow_origins: Vec<String>,
    pub allow_credentials: bool,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        let any = || vec!["*".to_owned()];
        Self { allow_origins: any(), allow_credentials: true, allow_methods: any(), allow_headers: any() }
    }
}

fn default_true() -> bool {
    true
}

#[allow(clippy::unnecessary_wraps)]
fn default_inde_workspace() -> Option<String> {
    Some("inde".to_owned())
}

#[allow(clippy::unnecessary_wraps)]
fn default_inde_datastore() -> Option<String> {
    Some("inde_ds".to_owned())
}

fn default_upload_max_bytes() -> usize {
    DEFAULT_UPLOAD_MAX_BYTES
}

impl Settings {
    /// Load settings from the file selected by the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings JSON.
    pub fn load() -> Result<Self, ConfigError> {
        let path = resolve_config_path(
            std::env::var("FAUNO_CONFIG").ok().as_deref(),
            std::env::var("ENVIRONMENT").ok().as_deref(),
        );
        let mut settings = Self::from_file(&path)?;
        settings.database_url_override = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        Ok(settings)
    }

    /// Read and parse a settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        Self::from_json(&raw)
    }

    /// Parse settings from a JSON document and normalize them.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not match the settings schema.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = serde_json::from_str(raw)?;
        settings.geo_server.base_url = settings.geo_server.base_url.trim_end_matches('/').to_owned();
        settings.upload.temp_path = settings
            .upload
            .temp_path
            .take()
            .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty());
        Ok(settings)
    }

    /// Connection URL used for both the SQLx pool and `ogr2ogr`.
    #[must_use]
    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url_override {
            return url.clone();
        }
        let db = &self.database;
        format!("postgresql://{}:{}@{}:{}/{}", db.user, db.password, db.host, db.port, db.name)
    }

    /// PostGIS schema holding imported layers: the GeoServer workspace, or
    /// `public` when the workspace is blank.
    #[must_use]
    pub fn layer_schema(&self) -> &str {
        let ws = self.geo_server.workspace.trim();
        if ws.is_empty() { "public" } else { ws }
    }

    /// Root directory for per-upload scratch directories.
    #[must_use]
    pub fn upload_temp_root(&self) -> PathBuf {
        self.upload
            .temp_path
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .join("fauno")
    }

    /// `host:port` the HTTP listener binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Pick the settings file: explicit override first, then by environment name.
pub(crate) fn resolve_config_path(explicit: Option<&str>, environment: Option<&str>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path);
    }
    let env = environment.unwrap_or("dev").trim().to_ascii_lowercase();
    let file = if env == "docker" { "appsettings.docker.json" } else { "appsettings.dev.json" };
    Path::new(DEFAULT_CONFIG_DIR).join(file)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
