//! Error types for the ranklist engine.

use serde::Serialize;
use thiserror::Error;

/// A single broken document invariant, addressed by its path inside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Path of the offending node, e.g. `rows[3].statuses[1].solutions`
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Main error type used across the ranklist crates.
#[derive(Error, Debug)]
pub enum RanklistError {
    /// Structural invariants broken; every violation found is listed
    #[error("Schema violation ({} issue(s)): {}", .0.len(), join_violations(.0))]
    SchemaViolations(Vec<Violation>),

    /// Unrecognized or contradictory configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A duration could not be converted
    #[error("Duration error: {0}")]
    Duration(String),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl RanklistError {
    /// Returns the error code string for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RanklistError::SchemaViolations(_) => "SCHEMA_VIOLATION",
            RanklistError::Configuration(_) => "CONFIGURATION_ERROR",
            RanklistError::Duration(_) => "DURATION_ERROR",
        }
    }

    /// Violations carried by a schema error, empty for other kinds
    pub fn violations(&self) -> &[Violation] {
        match self {
            RanklistError::SchemaViolations(v) => v,
            _ => &[],
        }
    }
}

/// Result type alias using RanklistError
pub type RanklistResult<T> = Result<T, RanklistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_violation_message_lists_every_path() {
        let err = RanklistError::SchemaViolations(vec![
            Violation::new("rows[0].statuses", "expected 2 statuses, found 1"),
            Violation::new("rows[2].user.id", "duplicate user id 7"),
        ]);

        let message = err.to_string();
        assert!(message.contains("2 issue(s)"));
        assert!(message.contains("rows[0].statuses"));
        assert!(message.contains("rows[2].user.id"));
        assert_eq!(err.error_code(), "SCHEMA_VIOLATION");
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RanklistError::Configuration("x".into()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert!(RanklistError::Duration("x".into()).violations().is_empty());
    }
}
