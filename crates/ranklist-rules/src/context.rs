//! Context types for specification evaluation.

use std::collections::HashMap;

/// Per-row facts a row filter can look at.
///
/// Built once per ranklist row by the engine; user fields are flattened to
/// strings so that field-based rules need no knowledge of the document model.
#[derive(Debug, Clone, Default)]
pub struct RowContext {
    /// Whether the contestant is ranked officially
    pub official: bool,
    /// Whether the row has at least one submission
    pub submitted: bool,
    /// User fields by name (`id`, `name`, `organization`, ...)
    pub fields: HashMap<String, String>,
    /// Marker ids attached to the user
    pub markers: Vec<String>,
}

impl RowContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn official(mut self, official: bool) -> Self {
        self.official = official;
        self
    }

    pub fn submitted(mut self, submitted: bool) -> Self {
        self.submitted = submitted;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }
}
