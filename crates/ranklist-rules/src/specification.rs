//! Core Specification trait and the conjunction used by series filters.

use std::sync::Arc;

/// Core specification trait for composable predicates.
///
/// Evaluation is synchronous: ranklist computation is pure and never
/// waits on I/O.
pub trait Specification<Ctx>: Send + Sync {
    /// Check if the specification is satisfied by the given context.
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool;
}

/// A boxed specification for dynamic dispatch.
pub type BoxedSpec<Ctx> = Arc<dyn Specification<Ctx>>;

impl<Ctx> Specification<Ctx> for BoxedSpec<Ctx> {
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.as_ref().is_satisfied_by(ctx)
    }
}

/// All specifications in the collection must be satisfied.
///
/// An empty collection is satisfied by every context.
pub struct AllOf<Ctx> {
    specs: Vec<BoxedSpec<Ctx>>,
}

impl<Ctx> AllOf<Ctx> {
    pub fn new(specs: Vec<BoxedSpec<Ctx>>) -> Self {
        AllOf { specs }
    }
}

impl<Ctx> Specification<Ctx> for AllOf<Ctx> {
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.specs.iter().all(|spec| spec.is_satisfied_by(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RowContext;
    use crate::rules::{HasMarker, HasSubmission, IsOfficial};

    #[test]
    fn test_all_of() {
        let row = RowContext::new().official(true).with_marker("school");

        let all: AllOf<RowContext> =
            AllOf::new(vec![Arc::new(IsOfficial), Arc::new(HasMarker::new("school"))]);
        assert!(all.is_satisfied_by(&row));

        let with_submission: AllOf<RowContext> =
            AllOf::new(vec![Arc::new(IsOfficial), Arc::new(HasSubmission)]);
        assert!(!with_submission.is_satisfied_by(&row));

        let empty: AllOf<RowContext> = AllOf::new(Vec::new());
        assert!(empty.is_satisfied_by(&RowContext::new()));
    }

    #[test]
    fn test_boxed_spec_delegates() {
        let spec: BoxedSpec<RowContext> = Arc::new(HasMarker::new("girls"));
        assert!(spec.is_satisfied_by(&RowContext::new().with_marker("girls")));
        assert!(!spec.is_satisfied_by(&RowContext::new()));
    }
}
