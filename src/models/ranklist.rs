//! Ranklist document and row models

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use ranklist_common::TimeDuration;

use super::{Contest, Marker, Problem, RankProblemStatus, RankSeries, Sorter, User};

/// Root of a ranklist document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RanklistDocument {
    pub contest: Contest,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub series: Vec<RankSeries>,
    #[serde(default)]
    pub rows: Vec<RanklistRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorter: Option<Sorter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    /// Wall clock of a real-time ranklist (RFC 3339)
    #[serde(rename = "_now", default, skip_serializing_if = "Option::is_none")]
    pub now: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One contestant's line in the ranklist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RanklistRow {
    /// One entry per series, in series order
    #[serde(default)]
    pub ranks: Vec<RankValue>,
    pub user: User,
    #[serde(default)]
    pub score: RankScore,
    #[serde(default)]
    pub statuses: Vec<RankProblemStatus>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Aggregate score of a row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankScore {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeDuration>,
}

/// Rank of a row within one series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankValue {
    /// 1-based rank, `None` when the row is excluded
    pub rank: Option<u32>,
    /// Outer `None` means "compute it"; an authored value, even `null`,
    /// always wins over the computed one
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub segment_index: Option<Option<u32>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u32>::deserialize(deserializer).map(Some)
}

impl RankValue {
    pub fn new(rank: Option<u32>, segment_index: Option<u32>) -> Self {
        Self {
            rank,
            segment_index: Some(segment_index),
        }
    }

    /// Value given to rows a series leaves out
    pub fn excluded() -> Self {
        Self::new(None, None)
    }

    /// Segment index set by the author, if any
    pub fn authored_segment(&self) -> Option<Option<u32>> {
        self.segment_index
    }

    pub fn segment(&self) -> Option<u32> {
        self.segment_index.flatten()
    }
}
