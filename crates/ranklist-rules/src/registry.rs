//! SpecRegistry for dynamic rule building from JSON configuration.

use crate::config::RuleConfig;
use crate::context::RowContext;
use crate::rules::*;
use crate::specification::{AllOf, BoxedSpec};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Factory function type for creating specifications from parameters.
pub type SpecFactory<Ctx> =
    Arc<dyn Fn(&HashMap<String, Value>) -> Option<BoxedSpec<Ctx>> + Send + Sync>;

/// Registry for dynamically building specifications from configuration.
///
/// The registry maps specification names to factory functions that can
/// create instances with optional parameters.
pub struct SpecRegistry<Ctx: Send + Sync + 'static> {
    factories: HashMap<String, SpecFactory<Ctx>>,
}

impl<Ctx: Send + Sync + 'static> Default for SpecRegistry<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx: Send + Sync + 'static> SpecRegistry<Ctx> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a specification factory.
    ///
    /// The factory receives a HashMap of parameters and returns an optional
    /// Arc-wrapped specification. Return `None` if parameters are invalid.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&HashMap<String, Value>) -> Option<BoxedSpec<Ctx>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Check if a specification is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// List all registered specification names.
    pub fn list(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Create a specification by name with parameters.
    pub fn create(&self, name: &str, params: &HashMap<String, Value>) -> Option<BoxedSpec<Ctx>> {
        self.factories.get(name).and_then(|factory| factory(params))
    }

    /// Build a specification tree from a RuleConfig.
    ///
    /// Returns `None` if any referenced spec is not registered or
    /// if parameters are invalid.
    pub fn build(&self, config: &RuleConfig) -> Option<BoxedSpec<Ctx>> {
        match config {
            RuleConfig::Spec { name, params } => self.create(name, params),
            RuleConfig::And { rules } => {
                let specs = self.build_all(rules)?;
                Some(Arc::new(AllOf::new(specs)))
            }
        }
    }

    fn build_all(&self, rules: &[RuleConfig]) -> Option<Vec<BoxedSpec<Ctx>>> {
        if rules.is_empty() {
            return None;
        }
        rules.iter().map(|r| self.build(r)).collect()
    }

    /// Validate a RuleConfig without building it.
    ///
    /// Returns a list of errors if the config references unknown specs
    /// or has invalid structure.
    pub fn validate(&self, config: &RuleConfig) -> Vec<String> {
        let mut errors = Vec::new();
        self.validate_recursive(config, &mut errors);
        errors
    }

    fn validate_recursive(&self, config: &RuleConfig, errors: &mut Vec<String>) {
        match config {
            RuleConfig::Spec { name, params } => {
                if !self.contains(name) {
                    errors.push(format!("Unknown specification: {}", name));
                } else if self.create(name, params).is_none() {
                    errors.push(format!(
                        "Invalid parameters for specification '{}': {:?}",
                        name, params
                    ));
                }
            }
            RuleConfig::And { rules } => {
                if rules.is_empty() {
                    errors.push("Empty AND rule list".to_string());
                }
                for rule in rules {
                    self.validate_recursive(rule, errors);
                }
            }
        }
    }
}

/// Create a pre-configured registry for ranklist row filters.
pub fn row_context_registry() -> SpecRegistry<RowContext> {
    let mut registry = SpecRegistry::new();

    registry.register("IsOfficial", |_| Some(Arc::new(IsOfficial)));

    registry.register("HasSubmission", |_| Some(Arc::new(HasSubmission)));

    registry.register("UserFieldMatches", |params| {
        let field = params.get("field")?.as_str()?;
        let rule = params.get("rule")?.as_str()?;
        match UserFieldMatches::new(field, rule) {
            Ok(spec) => Some(Arc::new(spec)),
            Err(e) => {
                tracing::warn!("Invalid pattern {:?} for user field '{}': {}", rule, field, e);
                None
            }
        }
    });

    registry.register("HasMarker", |params| {
        let marker = params.get("marker")?.as_str()?;
        Some(Arc::new(HasMarker::new(marker)))
    });

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::Specification;

    #[test]
    fn test_row_registry_basic() {
        let registry = row_context_registry();

        assert!(registry.contains("IsOfficial"));
        assert!(registry.contains("UserFieldMatches"));
        assert!(!registry.contains("NonExistent"));

        let specs = registry.list();
        assert!(specs.contains(&"HasSubmission"));
        assert!(specs.contains(&"HasMarker"));
    }

    #[test]
    fn test_row_registry_create() {
        let registry = row_context_registry();

        // Parameterless spec
        assert!(registry.create("IsOfficial", &HashMap::new()).is_some());

        // Missing params
        assert!(registry.create("UserFieldMatches", &HashMap::new()).is_none());

        // Bad regex
        let mut bad = HashMap::new();
        bad.insert("field".to_string(), serde_json::json!("name"));
        bad.insert("rule".to_string(), serde_json::json!("[a-"));
        assert!(registry.create("UserFieldMatches", &bad).is_none());
    }

    #[test]
    fn test_build_and_evaluate() {
        let registry = row_context_registry();
        let config = RuleConfig::and(vec![
            RuleConfig::spec("IsOfficial"),
            RuleConfig::user_field_matches("organization", "University$"),
        ]);

        let spec = registry.build(&config).unwrap();
        let matching = RowContext::new()
            .official(true)
            .with_field("organization", "Moscow State University");
        let unofficial = matching.clone().official(false);

        assert!(spec.is_satisfied_by(&matching));
        assert!(!spec.is_satisfied_by(&unofficial));
    }

    #[test]
    fn test_validate_config() {
        let registry = row_context_registry();

        let config = RuleConfig::and(vec![RuleConfig::has_marker("girls")]);
        assert!(registry.validate(&config).is_empty());

        let bad_config = RuleConfig::and(vec![
            RuleConfig::spec("UnknownSpec"),
            RuleConfig::user_field_matches("name", "(oops"),
        ]);
        let errors = registry.validate(&bad_config);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Unknown specification"));
        assert!(errors[1].contains("Invalid parameters"));

        assert!(registry.build(&RuleConfig::and(Vec::new())).is_none());
        assert_eq!(registry.validate(&RuleConfig::and(Vec::new())).len(), 1);
    }
}
