//! Ranklist Engine - scoring and ranking for contest standings
//!
//! This library takes a ranklist document (contest, problems, rows of
//! per-problem solutions, rank series and a sorter selection) and computes
//! every derived field: problem statuses, row scores, the row order and the
//! rank and segment of each row in each series.
//!
//! # Features
//!
//! - ICPC scoring with configurable penalty and time precision
//! - Pass-through of authored scores (`score`) and of unknown sorters
//! - Normal, UniqByUserField and ICPC medal series with ratio/count segments
//! - Real-time cutoff and scoreboard freeze
//! - Exact duration arithmetic across `ms`, `s`, `min`, `h` and `d`
//!
//! # Architecture
//!
//! - **Models**: wire types of the document plus resolved configuration
//! - **Services**: validation, scoring, segmenting and ranking
//! - **Utils**: duration normalization, text resolution, primitive checks

pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::{EngineConfig, RunOptions, CONFIG};
pub use ranklist_common::{RanklistError, RanklistResult, Violation};
pub use services::{RanklistOutcome, RanklistService};
