#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use crate::net::types::LayerRecord;

/// Layer listing state for the Layers page.
#[derive(Clone, Debug, Default)]
pub struct LayersState {
    pub layers: Vec<LayerRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl LayersState {
    /// Mark a fetch as in flight, keeping the previous list visible.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a fetch outcome. Layers are kept sorted by qualified name.
    pub fn finish_fetch(&mut self, result: Result<Vec<LayerRecord>, String>) {
        self.loading = false;
        match result {
            Ok(mut layers) => {
                layers.sort_by(|a, b| {
                    (&a.f_table_schema, &a.f_table_name).cmp(&(&b.f_table_schema, &b.f_table_name))
                });
                self.layers = layers;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.layers.is_empty()
    }
}
