//! Styled Layer Descriptor helpers.

/// Minimum body length for a downloaded SLD to count as a real style.
pub const MIN_VALID_SLD_LENGTH: u64 = 50;

/// Fallback polygon style used when the upload carries no `.sld`.
#[must_use]
pub fn basic_polygon_sld(layer: &str) -> String {
    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<sld:StyledLayerDescriptor xmlns="http://www.opengis.net/sld"
  xmlns:sld="http://www.opengis.net/sld"
  xmlns:ogc="http://www.opengis.net/ogc"
  xmlns:xlink="http://www.w3.org/1999/xlink"
  xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
  version="1.0.0">
  <sld:NamedLayer>
    <sld:Name>{layer}_style</sld:Name>
    <sld:UserStyle>
      <sld:Title>{layer} default style</sld:Title>
      <sld:FeatureTypeStyle>
        <sld:Rule>
          <sld:PolygonSymbolizer>
            <sld:Fill>
              <sld:CssParameter name="fill">#66ccff</sld:CssParameter>
              <sld:CssParameter name="fill-opacity">0.5</sld:CssParameter>
            </sld:Fill>
            <sld:Stroke>
              <sld:CssParameter name="stroke">#003366</sld:CssParameter>
              <sld:CssParameter name="stroke-width">1</sld:CssParameter>
            </sld:Stroke>
          </sld:PolygonSymbolizer>
        </sld:Rule>
      </sld:FeatureTypeStyle>
    </sld:UserStyle>
  </sld:NamedLayer>
</sld:StyledLayerDescriptor>"##
    )
}

/// Whether a downloaded SLD length indicates the style body was stored.
#[must_use]
pub fn sld_length_ok(length: Option<u64>) -> bool {
    length.is_some_and(|len| len >= MIN_VALID_SLD_LENGTH)
}

#[cfg(test)]
#[path = "sld_test.rs"]
mod tests;
