//! Common types, errors, and utilities shared by the ranklist crates.

pub mod error;
pub mod types;

pub use error::{RanklistError, RanklistResult, Violation};
pub use types::*;
