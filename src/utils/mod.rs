//! Utility functions

pub mod text;
pub mod time;
pub mod validation;

pub use text::resolve_text;
pub use time::{normalize, parse_datetime, round_quotient};
