//! Contest model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ranklist_common::{RanklistResult, Text, TimeDuration};

use crate::constants::default_frozen_duration;
use crate::utils::time::{elapsed_since, sub_durations};

/// Contest metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub title: Text,
    /// RFC 3339 start time
    pub start_at: String,
    pub duration: TimeDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen_duration: Option<TimeDuration>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Contest {
    /// Frozen duration, `[0, s]` when not declared
    pub fn frozen_duration(&self) -> TimeDuration {
        self.frozen_duration
            .clone()
            .unwrap_or_else(default_frozen_duration)
    }

    /// Offset from contest start at which the ranklist freezes, if it ever does
    pub fn freeze_start(&self) -> RanklistResult<Option<TimeDuration>> {
        let frozen = self.frozen_duration();
        if frozen.value() <= 0.0 {
            return Ok(None);
        }
        sub_durations(&self.duration, &frozen).map(Some)
    }

    /// Time elapsed between contest start and `now` (RFC 3339), clamped at zero
    pub fn elapsed_at(&self, now: &str) -> RanklistResult<TimeDuration> {
        elapsed_since(&self.start_at, now)
    }
}
