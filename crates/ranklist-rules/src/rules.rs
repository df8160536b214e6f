//! Row filter rules used by rank series.

use crate::context::RowContext;
use crate::specification::Specification;
use regex::Regex;

/// Row belongs to an official contestant.
pub struct IsOfficial;

impl Specification<RowContext> for IsOfficial {
    fn is_satisfied_by(&self, ctx: &RowContext) -> bool {
        ctx.official
    }
}

/// Row has at least one submission.
pub struct HasSubmission;

impl Specification<RowContext> for HasSubmission {
    fn is_satisfied_by(&self, ctx: &RowContext) -> bool {
        ctx.submitted
    }
}

/// A user field matches a regular expression.
///
/// Rows without the field never match.
pub struct UserFieldMatches {
    pub field: String,
    pub pattern: Regex,
}

impl UserFieldMatches {
    pub fn new(field: impl Into<String>, rule: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            field: field.into(),
            pattern: Regex::new(rule)?,
        })
    }
}

impl Specification<RowContext> for UserFieldMatches {
    fn is_satisfied_by(&self, ctx: &RowContext) -> bool {
        ctx.get_field(&self.field)
            .map(|value| self.pattern.is_match(value))
            .unwrap_or(false)
    }
}

/// User carries the given marker.
pub struct HasMarker {
    pub marker: String,
}

impl HasMarker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Specification<RowContext> for HasMarker {
    fn is_satisfied_by(&self, ctx: &RowContext) -> bool {
        ctx.has_marker(&self.marker)
    }
}
