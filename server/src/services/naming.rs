//! Layer and table naming rules.

/// Normalize a shapefile stem into a PostGIS table / GeoServer layer name.
///
/// Lowercased and trimmed, whitespace runs become `_`, anything outside
/// `[a-z0-9_]` becomes `_`, repeated underscores collapse and edge underscores
/// are stripped. Falls back to `layer` when nothing survives.
#[must_use]
pub fn sanitize_layer_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_underscore = false;
    for c in name.trim().to_lowercase().chars() {
        let mapped = if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '_' };
        if mapped == '_' {
            if last_underscore {
                continue;
            }
            last_underscore = true;
        } else {
            last_underscore = false;
        }
        out.push(mapped);
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() { "layer".to_owned() } else { trimmed.to_owned() }
}

/// Style registered for a layer.
#[must_use]
pub fn style_name(layer: &str) -> String {
    format!("{layer}_style")
}

/// File name GeoServer stores the layer's SLD under.
#[must_use]
pub fn style_filename(layer: &str) -> String {
    format!("{layer}.sld")
}

/// Double-quote an SQL identifier, escaping embedded quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
#[path = "naming_test.rs"]
mod tests;
