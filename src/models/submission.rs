//! Solution and per-problem status models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ranklist_common::{SolutionResult, TimeDuration};

/// One judged submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    #[serde(default)]
    pub result: Option<SolutionResult>,
    /// Time since contest start
    pub time: TimeDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Solution {
    pub fn new(result: impl Into<SolutionResult>, time: TimeDuration) -> Self {
        Self {
            result: Some(result.into()),
            time,
            score: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.result.as_ref().is_some_and(SolutionResult::is_accepted)
    }
}

/// Latest known outcome for one (user, problem) pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankProblemStatus {
    #[serde(default)]
    pub result: Option<SolutionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tries: Option<u32>,
    /// Full history; when present it is the source of truth for the summary fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solutions: Option<Vec<Solution>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RankProblemStatus {
    pub fn is_accepted(&self) -> bool {
        self.result.as_ref().is_some_and(SolutionResult::is_accepted)
    }

    pub fn has_solutions(&self) -> bool {
        self.solutions.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// A status counts as a submission if it has history or an authored result
    pub fn is_submitted(&self) -> bool {
        self.has_solutions() || self.result.is_some()
    }
}
