use super::*;

fn layer(schema: &str, name: &str) -> LayerRecord {
    LayerRecord {
        f_table_schema: schema.to_owned(),
        f_table_name: name.to_owned(),
        f_geometry_column: "geom".to_owned(),
        coord_dimension: 2,
        srid: 4674,
        geometry_type: "MULTIPOLYGON".to_owned(),
    }
}

#[test]
fn layers_state_default_is_idle_and_empty() {
    let state = LayersState::default();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.is_empty());
}

#[test]
fn begin_fetch_sets_loading_and_clears_error() {
    let mut state = LayersState { error: Some("old".to_owned()), ..LayersState::default() };
    state.begin_fetch();
    assert!(state.loading);
    assert!(state.error.is_none());
    assert!(!state.is_empty());
}

#[test]
fn finish_fetch_sorts_layers() {
    let mut state = LayersState::default();
    state.begin_fetch();
    state.finish_fetch(Ok(vec![layer("zcm", "rivers"), layer("zcm", "parcels"), layer("inde", "roads")]));
    let names: Vec<_> = state.layers.iter().map(LayerRecord::qualified_name).collect();
    assert_eq!(names, vec!["inde:roads", "zcm:parcels", "zcm:rivers"]);
    assert!(!state.loading);
}

#[test]
fn finish_fetch_error_keeps_previous_layers() {
    let mut state = LayersState::default();
    state.finish_fetch(Ok(vec![layer("zcm", "rivers")]));
    state.begin_fetch();
    state.finish_fetch(Err("layer request failed: 500".to_owned()));
    assert_eq!(state.layers.len(), 1);
    assert_eq!(state.error.as_deref(), Some("layer request failed: 500"));
    assert!(!state.is_empty());
}
