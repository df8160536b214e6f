//! JSON configuration for dynamic rule building.
//!
//! Series filters are lowered to a `RuleConfig` tree and built through a
//! registry, so filters described in a ranklist document and filters built
//! in code share one evaluation path.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// JSON representation of a rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// A single specification by name
    Spec {
        name: String,
        #[serde(default)]
        params: HashMap<String, serde_json::Value>,
    },
    /// Every rule must hold
    And { rules: Vec<RuleConfig> },
}

impl RuleConfig {
    /// Create a new spec rule
    pub fn spec(name: impl Into<String>) -> Self {
        RuleConfig::Spec {
            name: name.into(),
            params: HashMap::new(),
        }
    }

    /// Create a new spec rule with parameters
    pub fn spec_with_params(
        name: impl Into<String>,
        params: HashMap<String, serde_json::Value>,
    ) -> Self {
        RuleConfig::Spec {
            name: name.into(),
            params,
        }
    }

    /// Regex match against a named user field
    pub fn user_field_matches(field: impl Into<String>, rule: impl Into<String>) -> Self {
        let params = [
            ("field".to_string(), serde_json::Value::String(field.into())),
            ("rule".to_string(), serde_json::Value::String(rule.into())),
        ]
        .into_iter()
        .collect();
        Self::spec_with_params("UserFieldMatches", params)
    }

    /// Membership in a marker
    pub fn has_marker(marker: impl Into<String>) -> Self {
        let params = [(
            "marker".to_string(),
            serde_json::Value::String(marker.into()),
        )]
        .into_iter()
        .collect();
        Self::spec_with_params("HasMarker", params)
    }

    /// Create an AND combination
    pub fn and(rules: Vec<RuleConfig>) -> Self {
        RuleConfig::And { rules }
    }
}
