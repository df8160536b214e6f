//! Engine services

pub mod ranking_service;
pub mod ranklist_service;
pub mod scoring_service;
pub mod segment_service;
pub mod validation_service;

pub use ranking_service::RankingService;
pub use ranklist_service::{RanklistOutcome, RanklistService, SeriesFailure};
pub use scoring_service::{ScoringService, SortKey};
pub use segment_service::SegmentService;
pub use validation_service::ValidationService;
