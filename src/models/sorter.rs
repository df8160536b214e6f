//! Sorter models

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ranklist_common::{
    RanklistError, RanklistResult, RoundingMode, SolutionResult, TimeDuration, TimeUnit,
};

use crate::constants::{
    algorithms, default_no_penalty_results, default_penalty, DEFAULT_RANKING_TIME_ROUNDING,
    DEFAULT_TIME_ROUNDING,
};
use crate::utils::validation::validate_duration;

/// Wire form of the sorter selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sorter {
    pub algorithm: String,
    #[serde(default)]
    pub config: Value,
}

/// Sorter with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub enum SorterAlgorithm {
    Icpc(IcpcSorterConfig),
    Score(ScoreSorterConfig),
    /// Unrecognized algorithm; rows pass through untouched
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IcpcSorterConfig {
    /// Added per counted attempt before the accepted one
    pub penalty: TimeDuration,
    pub no_penalty_results: Vec<Option<SolutionResult>>,
    /// Unit every solution time is normalized to before summing
    pub time_precision: Option<TimeUnit>,
    pub time_rounding: RoundingMode,
    pub ranking: RankingPrecision,
}

impl IcpcSorterConfig {
    /// Whether an attempt with this result adds penalty time.
    ///
    /// Results outside the known set count like an unknown error and are free.
    pub fn is_penalized(&self, result: Option<&SolutionResult>) -> bool {
        if matches!(result, Some(SolutionResult::Custom(_))) {
            return false;
        }
        !self
            .no_penalty_results
            .iter()
            .any(|r| r.as_ref() == result)
    }
}

impl Default for IcpcSorterConfig {
    fn default() -> Self {
        Self {
            penalty: default_penalty(),
            no_penalty_results: default_no_penalty_results(),
            time_precision: None,
            time_rounding: DEFAULT_TIME_ROUNDING,
            ranking: RankingPrecision::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSorterConfig {
    pub ranking: RankingPrecision,
}

/// Precision used only when comparing total times
#[derive(Debug, Clone, PartialEq)]
pub struct RankingPrecision {
    pub unit: Option<TimeUnit>,
    pub rounding: RoundingMode,
}

impl Default for RankingPrecision {
    fn default() -> Self {
        Self {
            unit: None,
            rounding: DEFAULT_RANKING_TIME_ROUNDING,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIcpcConfig {
    penalty: Option<TimeDuration>,
    no_penalty_results: Option<Vec<Option<SolutionResult>>>,
    time_precision: Option<TimeUnit>,
    time_rounding: Option<RoundingMode>,
    ranking_time_precision: Option<TimeUnit>,
    ranking_time_rounding: Option<RoundingMode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoreConfig {
    ranking_time_precision: Option<TimeUnit>,
    ranking_time_rounding: Option<RoundingMode>,
}

impl Sorter {
    /// Resolve the algorithm and fill in every default
    pub fn resolve(&self) -> RanklistResult<SorterAlgorithm> {
        match self.algorithm.as_str() {
            algorithms::ICPC => {
                let raw: RawIcpcConfig = self.config()?;
                let config = IcpcSorterConfig {
                    penalty: raw.penalty.unwrap_or_else(default_penalty),
                    no_penalty_results: raw
                        .no_penalty_results
                        .unwrap_or_else(default_no_penalty_results),
                    time_precision: checked_unit(raw.time_precision, "timePrecision")?,
                    time_rounding: checked_rounding(
                        raw.time_rounding.unwrap_or(DEFAULT_TIME_ROUNDING),
                        "timeRounding",
                    )?,
                    ranking: RankingPrecision::resolve(
                        raw.ranking_time_precision,
                        raw.ranking_time_rounding,
                    )?,
                };
                if let Err(msg) = validate_duration(&config.penalty) {
                    return Err(RanklistError::Configuration(format!(
                        "Invalid penalty {}: {}",
                        config.penalty, msg
                    )));
                }
                Ok(SorterAlgorithm::Icpc(config))
            }
            algorithms::SCORE => {
                let raw: RawScoreConfig = self.config()?;
                Ok(SorterAlgorithm::Score(ScoreSorterConfig {
                    ranking: RankingPrecision::resolve(
                        raw.ranking_time_precision,
                        raw.ranking_time_rounding,
                    )?,
                }))
            }
            other => Ok(SorterAlgorithm::Unknown(other.to_string())),
        }
    }

    fn config<T: DeserializeOwned + Default>(&self) -> RanklistResult<T> {
        if self.config.is_null() {
            return Ok(T::default());
        }
        serde_json::from_value(self.config.clone()).map_err(|e| {
            RanklistError::Configuration(format!(
                "Invalid config for sorter '{}': {}",
                self.algorithm, e
            ))
        })
    }
}

impl RankingPrecision {
    fn resolve(unit: Option<TimeUnit>, rounding: Option<RoundingMode>) -> RanklistResult<Self> {
        Ok(Self {
            unit: checked_unit(unit, "rankingTimePrecision")?,
            rounding: checked_rounding(
                rounding.unwrap_or(DEFAULT_RANKING_TIME_ROUNDING),
                "rankingTimeRounding",
            )?,
        })
    }
}

fn checked_unit(unit: Option<TimeUnit>, name: &str) -> RanklistResult<Option<TimeUnit>> {
    match unit {
        Some(TimeUnit::Unrecognized(u)) => Err(RanklistError::Configuration(format!(
            "Unrecognized {} '{}'",
            name, u
        ))),
        other => Ok(other),
    }
}

fn checked_rounding(rounding: RoundingMode, name: &str) -> RanklistResult<RoundingMode> {
    match rounding {
        RoundingMode::Unrecognized(mode) => Err(RanklistError::Configuration(format!(
            "Unrecognized {} '{}'",
            name, mode
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorter(raw: Value) -> Sorter {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_icpc_defaults() {
        let algorithm = sorter(json!({ "algorithm": "ICPC", "config": {} }))
            .resolve()
            .unwrap();
        assert_eq!(algorithm, SorterAlgorithm::Icpc(IcpcSorterConfig::default()));

        let SorterAlgorithm::Icpc(config) = algorithm else {
            unreachable!()
        };
        assert_eq!(config.penalty, TimeDuration::new(20.0, TimeUnit::Minutes));
        assert!(!config.is_penalized(None));
        assert!(!config.is_penalized(Some(&SolutionResult::CompilationError)));
        assert!(config.is_penalized(Some(&SolutionResult::WrongAnswer)));
        assert!(config.is_penalized(Some(&SolutionResult::Rejected)));
        assert!(!config.is_penalized(Some(&SolutionResult::Custom("Partial".to_string()))));
    }

    #[test]
    fn test_icpc_custom_config() {
        let algorithm = sorter(json!({
            "algorithm": "ICPC",
            "config": {
                "penalty": [5, "min"],
                "noPenaltyResults": ["AC", "CE"],
                "timePrecision": "min",
                "rankingTimePrecision": "s",
                "rankingTimeRounding": "ceil"
            }
        }))
        .resolve()
        .unwrap();

        let SorterAlgorithm::Icpc(config) = algorithm else {
            panic!("expected ICPC");
        };
        assert_eq!(config.penalty, TimeDuration::new(5.0, TimeUnit::Minutes));
        assert!(config.is_penalized(None));
        assert_eq!(config.time_precision, Some(TimeUnit::Minutes));
        assert_eq!(config.time_rounding, RoundingMode::Floor);
        assert_eq!(config.ranking.unit, Some(TimeUnit::Seconds));
        assert_eq!(config.ranking.rounding, RoundingMode::Ceil);
    }

    #[test]
    fn test_score_and_unknown() {
        let score = sorter(json!({ "algorithm": "score" })).resolve().unwrap();
        assert_eq!(score, SorterAlgorithm::Score(ScoreSorterConfig::default()));

        let custom = sorter(json!({ "algorithm": "elo", "config": { "k": 32 } }))
            .resolve()
            .unwrap();
        assert_eq!(custom, SorterAlgorithm::Unknown("elo".to_string()));
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let err = sorter(json!({ "algorithm": "ICPC", "config": { "timeRounding": "nearest" } }))
            .resolve()
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");

        let err = sorter(json!({ "algorithm": "ICPC", "config": { "penalty": "20min" } }))
            .resolve()
            .unwrap_err();
        assert!(err.to_string().contains("ICPC"));
    }

    #[test]
    fn test_penalty_must_be_a_valid_duration() {
        for penalty in [json!([-20, "min"]), json!([20, "weeks"])] {
            let err = sorter(json!({ "algorithm": "ICPC", "config": { "penalty": penalty } }))
                .resolve()
                .unwrap_err();
            assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
            assert!(err.to_string().contains("Invalid penalty"));
        }

        let free = sorter(json!({ "algorithm": "ICPC", "config": { "penalty": [0, "min"] } }))
            .resolve()
            .unwrap();
        assert!(matches!(free, SorterAlgorithm::Icpc(c) if c.penalty.value() == 0.0));
    }
}
