//! Specification Pattern implementation for ranklist row filters.
//!
//! Series rules restrict which rows take part in a ranking (official rows
//! only, rows with a matching organization, rows carrying a marker). Each
//! of those restrictions is a small predicate over a [`RowContext`]. A
//! series filter holds when all of its predicates hold.
//!
//! # Example
//!
//! ```
//! use ranklist_rules::prelude::*;
//!
//! let registry = row_context_registry();
//! let filter = registry
//!     .build(&RuleConfig::and(vec![
//!         RuleConfig::spec("IsOfficial"),
//!         RuleConfig::has_marker("girls"),
//!     ]))
//!     .unwrap();
//! let row = RowContext::new().official(true).with_marker("girls");
//! assert!(filter.is_satisfied_by(&row));
//! ```
//!
//! Rules are described as JSON ([`config::RuleConfig`]) and built at runtime
//! through a [`registry::SpecRegistry`].

pub mod config;
pub mod context;
pub mod registry;
pub mod rules;
pub mod specification;

/// Prelude module - import everything you need with `use ranklist_rules::prelude::*`
pub mod prelude {
    pub use crate::config::RuleConfig;
    pub use crate::context::RowContext;
    pub use crate::registry::{row_context_registry, SpecRegistry};
    pub use crate::rules::*;
    pub use crate::specification::{AllOf, BoxedSpec, Specification};
}
