use super::*;

#[test]
fn layers_endpoint_formats_expected_path() {
    assert_eq!(layers_endpoint(), "/fauno-api/v1/shapefiles/layers");
}

#[test]
fn layers_failed_message_formats_status() {
    assert_eq!(layers_failed_message(500, None), "layer request failed: 500");
}

#[test]
fn layers_failed_message_includes_detail() {
    assert_eq!(
        layers_failed_message(500, Some("failed to list layers: timeout")),
        "layer request failed: 500 (failed to list layers: timeout)"
    );
}

#[test]
fn layers_failed_message_skips_empty_detail() {
    assert_eq!(layers_failed_message(502, Some("")), "layer request failed: 502");
}
