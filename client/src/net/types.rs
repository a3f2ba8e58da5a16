//! Wire DTOs shared with the shapefile API.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// One row of `geometry_columns` as returned by `GET .../shapefiles/layers`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub f_table_schema: String,
    pub f_table_name: String,
    pub f_geometry_column: String,
    pub coord_dimension: i32,
    pub srid: i32,
    #[serde(rename = "type")]
    pub geometry_type: String,
}

impl LayerRecord {
    /// Qualified GeoServer-style name, e.g. `zcm:rivers`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.f_table_schema, self.f_table_name)
    }
}

/// Error body produced by the API (`{"detail": "..."}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}
