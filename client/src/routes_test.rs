use super::*;

fn login_revision() -> RouteTable {
    RouteTable::builder()
        .public("/", RouteView::Auth)
        .public("/login", RouteView::Auth)
        .build()
        .unwrap()
}

// =============================================================
// Shipped table
// =============================================================

#[test]
fn root_resolves_to_auth() {
    let table = RouteTable::fauno();
    let entry = table.resolve("/fauno/").unwrap();
    assert_eq!(entry.view, RouteView::Auth);
    assert!(entry.guard.is_none());
}

#[test]
fn base_without_trailing_slash_resolves_to_auth() {
    let table = RouteTable::fauno();
    assert_eq!(table.resolve("/fauno").map(|e| e.view), Some(RouteView::Auth));
}

#[test]
fn protected_routes_resolve_with_guard() {
    let table = RouteTable::fauno();
    for (path, view) in [
        ("/fauno/layers", RouteView::Layers),
        ("/fauno/upload", RouteView::Uploader),
        ("/fauno/history", RouteView::History),
    ] {
        let entry = table.resolve(path).unwrap_or_else(|| panic!("{path} should resolve"));
        assert_eq!(entry.view, view);
        assert_eq!(entry.guard, Some(Guard::Protected));
    }
}

#[test]
fn login_is_absent_from_shipped_table() {
    assert!(RouteTable::fauno().resolve("/fauno/login").is_none());
}

#[test]
fn paths_without_base_never_match() {
    let table = RouteTable::fauno();
    assert!(table.resolve("/").is_none());
    assert!(table.resolve("/layers").is_none());
    assert!(table.resolve("/faunolayers").is_none());
}

#[test]
fn trailing_slash_and_query_are_ignored() {
    let table = RouteTable::fauno();
    assert_eq!(table.resolve("/fauno/layers/").map(|e| e.view), Some(RouteView::Layers));
    assert_eq!(table.resolve("/fauno/history?page=2").map(|e| e.view), Some(RouteView::History));
    assert_eq!(table.resolve("/fauno/upload#form").map(|e| e.view), Some(RouteView::Uploader));
}

#[test]
fn nested_unknown_path_does_not_match() {
    assert!(RouteTable::fauno().resolve("/fauno/layers/extra").is_none());
}

#[test]
fn protected_entries_keep_declaration_order() {
    let table = RouteTable::fauno();
    let paths: Vec<_> = table.protected_entries().map(|e| e.path).collect();
    assert_eq!(paths, vec!["/layers", "/upload", "/history"]);
}

#[test]
fn href_prefixes_base_path() {
    let table = RouteTable::fauno();
    let hrefs: Vec<_> = table.entries().iter().map(RouteEntry::href).collect();
    assert_eq!(hrefs, vec!["/fauno", "/fauno/layers", "/fauno/upload", "/fauno/history"]);
}

#[test]
fn root_href_is_bare_base_path() {
    let table = RouteTable::fauno();
    let root = table.resolve("/fauno/").unwrap();
    assert_eq!(root.href(), BASE_PATH);
}

#[test]
fn shipped_paths_are_unique() {
    let table = RouteTable::fauno();
    let mut paths: Vec<_> = table.entries().iter().map(|e| e.path).collect();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(paths.len(), table.entries().len());
}

// =============================================================
// Builder
// =============================================================

#[test]
fn login_revision_resolves_login_to_auth() {
    let table = login_revision();
    assert_eq!(table.resolve("/fauno/login").map(|e| e.view), Some(RouteView::Auth));
    assert_eq!(table.resolve("/fauno/").map(|e| e.view), Some(RouteView::Auth));
    assert!(table.resolve("/fauno/layers").is_none());
}

#[test]
fn builder_rejects_duplicate_path() {
    let err = RouteTable::builder()
        .public("/", RouteView::Auth)
        .protected("/", RouteView::Layers)
        .build()
        .unwrap_err();
    assert_eq!(err, RouteTableError::DuplicatePath("/"));
}

#[test]
fn builder_rejects_relative_path() {
    let err = RouteTable::builder()
        .protected("layers", RouteView::Layers)
        .build()
        .unwrap_err();
    assert_eq!(err, RouteTableError::RelativePath("layers"));
}

#[test]
fn builder_keeps_first_error() {
    let err = RouteTable::builder()
        .public("nope", RouteView::Auth)
        .public("/", RouteView::Auth)
        .public("/", RouteView::Auth)
        .build()
        .unwrap_err();
    assert_eq!(err, RouteTableError::RelativePath("nope"));
}

#[test]
fn builder_matches_shipped_table() {
    let built = RouteTable::builder()
        .public("/", RouteView::Auth)
        .protected("/layers", RouteView::Layers)
        .protected("/upload", RouteView::Uploader)
        .protected("/history", RouteView::History)
        .build()
        .unwrap();
    assert_eq!(built, RouteTable::fauno());
}

#[test]
fn view_labels() {
    assert_eq!(RouteView::Auth.label(), "Fauno");
    assert_eq!(RouteView::Uploader.label(), "Upload");
}
