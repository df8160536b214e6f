//! Engine-wide constants
//!
//! Defaults applied when a document leaves configuration out, plus the
//! environment variable names read by [`crate::config`].

use ranklist_common::{RoundingMode, SolutionResult, TimeDuration, TimeUnit};

// =============================================================================
// SORTER DEFAULTS
// =============================================================================

/// Sorter algorithm identifiers
pub mod algorithms {
    pub const ICPC: &str = "ICPC";
    pub const SCORE: &str = "score";
}

/// Default ICPC penalty per rejected attempt, in minutes
pub const DEFAULT_PENALTY_MINUTES: f64 = 20.0;

/// Default ICPC penalty per rejected attempt
pub fn default_penalty() -> TimeDuration {
    TimeDuration::new(DEFAULT_PENALTY_MINUTES, TimeUnit::Minutes)
}

/// Results that never add penalty time; `None` is "no result"
pub fn default_no_penalty_results() -> Vec<Option<SolutionResult>> {
    vec![
        Some(SolutionResult::FirstBlood),
        Some(SolutionResult::Accepted),
        Some(SolutionResult::Frozen),
        Some(SolutionResult::NoOutput),
        Some(SolutionResult::CompilationError),
        Some(SolutionResult::UnknownError),
        None,
    ]
}

/// Rounding applied to per-solution times when a time precision is set
pub const DEFAULT_TIME_ROUNDING: RoundingMode = RoundingMode::Floor;

/// Rounding applied to totals when a ranking time precision is set
pub const DEFAULT_RANKING_TIME_ROUNDING: RoundingMode = RoundingMode::Floor;

// =============================================================================
// SERIES DEFAULTS
// =============================================================================

/// Series rule presets
pub mod presets {
    pub const NORMAL: &str = "Normal";
    pub const UNIQ_BY_USER_FIELD: &str = "UniqByUserField";
    pub const ICPC: &str = "ICPC";
}

/// Rounding applied to ratio-based segment sizes
pub const DEFAULT_RATIO_ROUNDING: RoundingMode = RoundingMode::Ceil;

// =============================================================================
// CONTEST DEFAULTS
// =============================================================================

/// Frozen duration when the contest does not declare one
pub fn default_frozen_duration() -> TimeDuration {
    TimeDuration::zero(TimeUnit::Seconds)
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Environment variable names
pub mod env_vars {
    pub const PARALLEL_SERIES: &str = "RANKLIST_PARALLEL_SERIES";
    pub const PREFERRED_LANGUAGE: &str = "RANKLIST_PREFERRED_LANGUAGE";
    pub const APPLY_FREEZE: &str = "RANKLIST_APPLY_FREEZE";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Default log filter for the binary
pub const DEFAULT_LOG_FILTER: &str = "ranklist_engine=info";

/// Default language tag for localized text
pub const DEFAULT_PREFERRED_LANGUAGE: &str = "en";
