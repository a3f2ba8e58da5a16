use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::*;
use crate::state::test_helpers::{MemoryLayerStore, RecordingGeoServer, layer_record, test_settings, zip_bytes};

struct Fixture {
    temp: tempfile::TempDir,
    store: Arc<MemoryLayerStore>,
    geoserver: Arc<RecordingGeoServer>,
}

impl Fixture {
    fn new() -> Self {
        Self::with(MemoryLayerStore::default(), RecordingGeoServer::default())
    }

    fn with(store: MemoryLayerStore, geoserver: RecordingGeoServer) -> Self {
        Self { temp: tempfile::tempdir().unwrap(), store: Arc::new(store), geoserver: Arc::new(geoserver) }
    }

    fn service(&self) -> ShapefileService {
        self.service_with(|_| {})
    }

    fn service_with(&self, tweak: impl FnOnce(&mut Settings)) -> ShapefileService {
        let mut settings = test_settings(self.temp.path());
        tweak(&mut settings);
        ShapefileService::new(self.store.clone(), self.geoserver.clone(), Arc::new(settings))
    }

    fn upload_root(&self) -> PathBuf {
        self.temp.path().join("fauno")
    }
}

fn shapefile(name: &str) -> Shapefile {
    Shapefile { name: name.to_owned(), path: PathBuf::from(format!("/tmp/{name}.shp")), srid: 4674 }
}

fn main_target() -> PublishTarget {
    PublishTarget { workspace: "zcm".to_owned(), datastore: "zcm_ds".to_owned() }
}

fn upload_request(file_name: &str, bytes: Vec<u8>) -> UploadRequest {
    UploadRequest {
        file_name: file_name.to_owned(),
        bytes,
        workspace: None,
        datastore: None,
        srid: 4674,
        publish_on_inde: false,
    }
}

fn dir_is_empty(path: &Path) -> bool {
    std::fs::read_dir(path).map(|mut d| d.next().is_none()).unwrap_or(true)
}

// =============================================================================
// form helpers
// =============================================================================

#[test]
fn truthy_values() {
    for v in ["1", "true", "TRUE", " yes ", "On"] {
        assert!(parse_truthy(Some(v)), "expected truthy for {v:?}");
    }
}

#[test]
fn falsy_values() {
    for v in ["0", "false", "no", "off", "", "maybe"] {
        assert!(!parse_truthy(Some(v)), "expected falsy for {v:?}");
    }
    assert!(!parse_truthy(None));
}

#[test]
fn zip_detection_is_case_insensitive() {
    assert!(is_zip_file_name("rivers.zip"));
    assert!(is_zip_file_name("RIVERS.ZIP"));
    assert!(!is_zip_file_name("rivers.shp"));
    assert!(!is_zip_file_name("zip"));
}

#[test]
fn publish_failure_classification() {
    assert!(ShapefileError::IndeNotConfigured.is_publish_failure());
    assert!(ShapefileError::Store(StoreError::Import("x".to_owned())).is_publish_failure());
    assert!(!ShapefileError::NotZip.is_publish_failure());
    assert!(!ShapefileError::Archive(ArchiveError::MissingShp).is_publish_failure());
}

// =============================================================================
// import_to_postgis
// =============================================================================

#[tokio::test]
async fn import_drops_then_imports_then_verifies() {
    let fx = Fixture::new();
    fx.service().import_to_postgis(&shapefile("rivers")).await.unwrap();
    assert_eq!(fx.store.calls(), vec!["drop zcm.rivers", "import zcm.rivers srid=4674", "exists zcm.rivers"]);
}

#[tokio::test]
async fn import_failure_propagates_stderr() {
    let fx = Fixture::with(
        MemoryLayerStore { fail_import: Some("Unable to open datasource".to_owned()), ..Default::default() },
        RecordingGeoServer::default(),
    );
    let err = fx.service().import_to_postgis(&shapefile("rivers")).await.unwrap_err();
    assert_eq!(err.to_string(), "ogr2ogr failed: Unable to open datasource");
}

#[tokio::test]
async fn import_without_resulting_table_fails() {
    let fx = Fixture::with(
        MemoryLayerStore { skip_table_creation: true, ..Default::default() },
        RecordingGeoServer::default(),
    );
    let err = fx.service().import_to_postgis(&shapefile("rivers")).await.unwrap_err();
    assert!(matches!(err, ShapefileError::ImportedTableMissing(t) if t == "zcm.rivers"));
}

// =============================================================================
// publish_on_geoserver
// =============================================================================

#[tokio::test]
async fn publish_runs_six_steps_in_order() {
    let fx = Fixture::new();
    let result = fx
        .service()
        .publish_on_geoserver(&shapefile("rivers"), &main_target(), None, false)
        .await
        .unwrap();

    assert_eq!(
        fx.geoserver.calls(),
        vec![
            "register_style zcm rivers_style rivers.sld",
            "upload_sld zcm rivers_style",
            "featuretype zcm zcm_ds rivers",
            "default_style zcm rivers rivers_style",
            "sld_length zcm rivers_style",
            "layer_status zcm rivers",
        ]
    );
    assert_eq!(
        result.main,
        PublishReport {
            layer: "zcm:rivers".to_owned(),
            style: "rivers_style".to_owned(),
            sld_filename: "rivers.sld".to_owned(),
            sld_ok: true,
            sld_length: Some(900),
            http_status: 200,
        }
    );
    assert!(result.inde.is_none());
}

#[tokio::test]
async fn publish_uses_fallback_sld_when_none_uploaded() {
    let fx = Fixture::new();
    fx.service()
        .publish_on_geoserver(&shapefile("rivers"), &main_target(), None, false)
        .await
        .unwrap();
    let slds = fx.geoserver.uploaded_slds.lock().unwrap().clone();
    assert_eq!(slds, vec![basic_polygon_sld("rivers")]);
}

#[tokio::test]
async fn publish_uses_uploaded_sld() {
    let fx = Fixture::new();
    fx.service()
        .publish_on_geoserver(&shapefile("rivers"), &main_target(), Some("<custom/>"), false)
        .await
        .unwrap();
    let slds = fx.geoserver.uploaded_slds.lock().unwrap().clone();
    assert_eq!(slds, vec!["<custom/>"]);
}

#[tokio::test]
async fn publish_reports_short_sld_as_not_ok() {
    let fx = Fixture::with(
        MemoryLayerStore::default(),
        RecordingGeoServer { sld_length: Some(12), layer_status: 404, ..Default::default() },
    );
    let result = fx
        .service()
        .publish_on_geoserver(&shapefile("rivers"), &main_target(), None, false)
        .await
        .unwrap();
    assert!(!result.main.sld_ok);
    assert_eq!(result.main.sld_length, Some(12));
    assert_eq!(result.main.http_status, 404);
}

#[tokio::test]
async fn publish_on_inde_repeats_steps_in_inde_workspace() {
    let fx = Fixture::new();
    let result = fx
        .service()
        .publish_on_geoserver(&shapefile("rivers"), &main_target(), None, true)
        .await
        .unwrap();

    let calls = fx.geoserver.calls();
    assert_eq!(calls.len(), 12);
    assert_eq!(calls[6], "register_style inde rivers_style rivers.sld");
    assert_eq!(calls[8], "featuretype inde inde_ds rivers");
    let inde = result.inde.unwrap();
    assert_eq!(inde.layer, "inde:rivers");
    assert_eq!(inde.style, "rivers_style");
}

#[tokio::test]
async fn publish_on_inde_skipped_when_disabled() {
    let fx = Fixture::new();
    let result = fx
        .service_with(|s| s.inde.enabled = false)
        .publish_on_geoserver(&shapefile("rivers"), &main_target(), None, true)
        .await
        .unwrap();
    assert!(result.inde.is_none());
    assert_eq!(fx.geoserver.calls().len(), 6);
}

#[tokio::test]
async fn publish_on_inde_without_workspace_fails() {
    let fx = Fixture::new();
    let err = fx
        .service_with(|s| s.inde.workspace = None)
        .publish_on_geoserver(&shapefile("rivers"), &main_target(), None, true)
        .await
        .unwrap_err();
    assert!(matches!(err, ShapefileError::IndeNotConfigured));
}

#[tokio::test]
async fn publish_stops_at_missing_workspace() {
    let fx = Fixture::with(
        MemoryLayerStore::default(),
        RecordingGeoServer { missing_workspaces: vec!["zcm".to_owned()], ..Default::default() },
    );
    let err = fx
        .service()
        .publish_on_geoserver(&shapefile("rivers"), &main_target(), None, false)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "workspace 'zcm' does not exist on GeoServer");
    assert_eq!(fx.geoserver.calls().len(), 1);
}

// =============================================================================
// upload
// =============================================================================

#[tokio::test]
async fn upload_imports_and_publishes_sanitized_layer() {
    let fx = Fixture::new();
    let bytes = zip_bytes(&[("Área Urbana.shp", b"shp"), ("Área Urbana.dbf", b"dbf")]);
    let result = fx.service().upload(upload_request("urbana.zip", bytes)).await.unwrap();

    assert_eq!(result.layer, "rea_urbana");
    assert_eq!(result.database_table, "rea_urbana");
    assert_eq!(result.workspace, "zcm");
    assert_eq!(result.datastore, "zcm_ds");
    assert_eq!(result.status, PUBLISHED_STATUS);
    assert_eq!(result.geoserver.main.layer, "zcm:rea_urbana");
    assert!(fx.store.calls().contains(&"import zcm.rea_urbana srid=4674".to_owned()));
    assert!(dir_is_empty(&fx.upload_root()));
}

#[tokio::test]
async fn upload_honors_form_overrides() {
    let fx = Fixture::new();
    let mut req = upload_request("rivers.zip", zip_bytes(&[("rivers.shp", b"shp")]));
    req.workspace = Some("other_ws".to_owned());
    req.datastore = Some("  ".to_owned());
    req.srid = 31983;
    let result = fx.service().upload(req).await.unwrap();

    assert_eq!(result.workspace, "other_ws");
    assert_eq!(result.datastore, "zcm_ds");
    assert!(fx.store.calls().contains(&"import zcm.rivers srid=31983".to_owned()));
    assert!(fx.geoserver.calls().contains(&"featuretype other_ws zcm_ds rivers".to_owned()));
}

#[tokio::test]
async fn upload_passes_archive_sld_to_geoserver() {
    let fx = Fixture::new();
    let bytes = zip_bytes(&[("rivers.shp", b"shp"), ("RIVERS.sld", b"<sld from zip/>")]);
    fx.service().upload(upload_request("rivers.zip", bytes)).await.unwrap();
    let slds = fx.geoserver.uploaded_slds.lock().unwrap().clone();
    assert_eq!(slds, vec!["<sld from zip/>"]);
}

#[tokio::test]
async fn upload_rejects_non_zip_before_touching_disk() {
    let fx = Fixture::new();
    let err = fx
        .service()
        .upload(upload_request("rivers.shp", b"shp".to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(err, ShapefileError::NotZip));
    assert!(!fx.upload_root().exists());
    assert!(fx.store.calls().is_empty());
}

#[tokio::test]
async fn upload_without_shp_cleans_up() {
    let fx = Fixture::new();
    let err = fx
        .service()
        .upload(upload_request("docs.zip", zip_bytes(&[("readme.txt", b"hi")])))
        .await
        .unwrap_err();
    assert!(matches!(err, ShapefileError::Archive(ArchiveError::MissingShp)));
    assert_eq!(err.to_string(), "ZIP does not contain a .shp");
    assert!(dir_is_empty(&fx.upload_root()));
}

#[tokio::test]
async fn upload_publish_failure_cleans_up() {
    let fx = Fixture::with(
        MemoryLayerStore { fail_import: Some("boom".to_owned()), ..Default::default() },
        RecordingGeoServer::default(),
    );
    let err = fx
        .service()
        .upload(upload_request("rivers.zip", zip_bytes(&[("rivers.shp", b"shp")])))
        .await
        .unwrap_err();
    assert!(err.is_publish_failure());
    assert!(fx.geoserver.calls().is_empty());
    assert!(dir_is_empty(&fx.upload_root()));
}

// =============================================================================
// list_layers
// =============================================================================

#[tokio::test]
async fn list_layers_reads_configured_schema() {
    let fx = Fixture::with(
        MemoryLayerStore {
            layers: vec![layer_record("zcm", "rivers"), layer_record("public", "other")],
            ..Default::default()
        },
        RecordingGeoServer::default(),
    );
    let layers = fx.service().list_layers().await.unwrap();
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].f_table_name, "rivers");
    assert_eq!(fx.store.calls(), vec!["list zcm"]);
}

#[tokio::test]
async fn list_layers_uses_public_for_blank_workspace() {
    let fx = Fixture::new();
    fx.service_with(|s| s.geo_server.workspace = String::new())
        .list_layers()
        .await
        .unwrap();
    assert_eq!(fx.store.calls(), vec!["list public"]);
}
