//! Rank series models
//!
//! [`RankSeries`] is the wire form. Its `rule` is resolved into a
//! [`SeriesRule`] once per run, with every default filled in, so the ranking
//! code never looks at optional configuration again.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

use ranklist_common::{RanklistError, RanklistResult, RoundingMode, Text};

use crate::constants::{presets, DEFAULT_RATIO_ROUNDING};

/// A ranking dimension, e.g. overall rank or a regional rank
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
    #[serde(default)]
    pub segments: Vec<RankSeriesSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RankSeriesRule>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A tier inside a series, e.g. gold medal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankSeriesSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
    /// Legacy fixed size of this segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Wire form of a series rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankSeriesRule {
    pub preset: String,
    #[serde(default)]
    pub options: Value,
}

/// A series rule with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesRule {
    Normal(NormalOptions),
    UniqByUserField(UniqByUserFieldOptions),
    Icpc(IcpcOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalOptions {
    #[serde(default)]
    pub include_official_only: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqByUserFieldOptions {
    /// User field whose first occurrence is kept
    pub field: String,
    #[serde(default)]
    pub include_official_only: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpcOptions {
    #[serde(default)]
    pub ratio: Option<RatioOptions>,
    #[serde(default)]
    pub count: Option<CountOptions>,
    #[serde(default)]
    pub filter: Option<IcpcFilter>,
    #[serde(default = "default_true")]
    pub include_official_only: bool,
    /// Break ties by current order before segmenting
    #[serde(default)]
    pub no_tied: bool,
}

impl Default for IcpcOptions {
    fn default() -> Self {
        Self {
            ratio: None,
            count: None,
            filter: None,
            include_official_only: true,
            no_tied: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioOptions {
    /// Fraction of the denominator given to each segment
    pub value: Vec<f64>,
    #[serde(default = "default_ratio_rounding")]
    pub rounding: RoundingMode,
    #[serde(default)]
    pub denominator: Denominator,
}

/// Which rows a ratio is taken of
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denominator {
    #[default]
    All,
    /// Rows with at least one submission
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountOptions {
    pub value: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpcFilter {
    #[serde(default)]
    pub by_user_fields: Vec<UserFieldFilter>,
    #[serde(default)]
    pub by_marker: Option<String>,
}

/// Keep rows whose user `field` matches the regex `rule`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserFieldFilter {
    pub field: String,
    pub rule: String,
}

fn default_true() -> bool {
    true
}

fn default_ratio_rounding() -> RoundingMode {
    DEFAULT_RATIO_ROUNDING
}

impl RankSeries {
    /// Resolve this series' rule.
    ///
    /// A series without a rule ranks every row normally. If all of its
    /// segments carry a `count`, those counts segment the ranking.
    pub fn resolve_rule(&self) -> RanklistResult<SeriesRule> {
        let rule = match &self.rule {
            Some(rule) => rule.resolve()?,
            None => self.legacy_rule(),
        };
        self.check_rule(&rule)?;
        Ok(rule)
    }

    fn legacy_rule(&self) -> SeriesRule {
        let counts: Option<Vec<u32>> = self.segments.iter().map(|s| s.count).collect();
        match counts {
            Some(value) if !value.is_empty() => SeriesRule::Icpc(IcpcOptions {
                count: Some(CountOptions { value }),
                include_official_only: false,
                ..IcpcOptions::default()
            }),
            _ => SeriesRule::Normal(NormalOptions::default()),
        }
    }

    fn check_rule(&self, rule: &SeriesRule) -> RanklistResult<()> {
        let segments = self.segments.len();
        match rule {
            SeriesRule::Normal(_) => Ok(()),
            SeriesRule::UniqByUserField(options) if options.field.is_empty() => Err(
                RanklistError::Configuration("UniqByUserField requires a field".to_string()),
            ),
            SeriesRule::UniqByUserField(_) => Ok(()),
            SeriesRule::Icpc(options) => {
                if let Some(ratio) = &options.ratio {
                    if let RoundingMode::Unrecognized(mode) = &ratio.rounding {
                        return Err(RanklistError::Configuration(format!(
                            "Unrecognized ratio rounding '{}'",
                            mode
                        )));
                    }
                    if ratio.value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(RanklistError::Configuration(
                            "Ratio values must be non-negative numbers".to_string(),
                        ));
                    }
                    if ratio.value.iter().sum::<f64>() > 1.0 + f64::EPSILON {
                        return Err(RanklistError::Configuration(
                            "Ratio values add up to more than 1".to_string(),
                        ));
                    }
                    if ratio.value.len() > segments {
                        return Err(RanklistError::Configuration(format!(
                            "{} ratios given for {} segment(s)",
                            ratio.value.len(),
                            segments
                        )));
                    }
                }
                if let Some(count) = &options.count {
                    if count.value.len() > segments {
                        return Err(RanklistError::Configuration(format!(
                            "{} counts given for {} segment(s)",
                            count.value.len(),
                            segments
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

impl RankSeriesRule {
    /// Apply defaults to the raw options of a known preset
    pub fn resolve(&self) -> RanklistResult<SeriesRule> {
        match self.preset.as_str() {
            presets::NORMAL => self.options().map(SeriesRule::Normal),
            presets::UNIQ_BY_USER_FIELD => self.options().map(SeriesRule::UniqByUserField),
            presets::ICPC => self.options().map(SeriesRule::Icpc),
            other => Err(RanklistError::Configuration(format!(
                "Unknown series preset '{}'",
                other
            ))),
        }
    }

    fn options<T: DeserializeOwned>(&self) -> RanklistResult<T> {
        let raw = match &self.options {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        };
        serde_json::from_value(raw).map_err(|e| {
            RanklistError::Configuration(format!(
                "Invalid options for preset '{}': {}",
                self.preset, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(raw: Value) -> RankSeries {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_icpc_defaults() {
        let s = series(json!({
            "segments": [{ "title": "Gold" }, { "title": "Silver" }, { "title": "Bronze" }],
            "rule": {
                "preset": "ICPC",
                "options": { "ratio": { "value": [0.1, 0.2, 0.3] } }
            }
        }));

        let SeriesRule::Icpc(options) = s.resolve_rule().unwrap() else {
            panic!("expected ICPC rule");
        };
        assert!(options.include_official_only);
        assert!(!options.no_tied);
        let ratio = options.ratio.unwrap();
        assert_eq!(ratio.rounding, RoundingMode::Ceil);
        assert_eq!(ratio.denominator, Denominator::All);
    }

    #[test]
    fn test_normal_without_options() {
        let s = series(json!({ "rule": { "preset": "Normal" } }));
        assert_eq!(
            s.resolve_rule().unwrap(),
            SeriesRule::Normal(NormalOptions::default())
        );
    }

    #[test]
    fn test_uniq_requires_field() {
        let s = series(json!({
            "rule": { "preset": "UniqByUserField", "options": { "field": "organization" } }
        }));
        assert!(matches!(s.resolve_rule().unwrap(), SeriesRule::UniqByUserField(o) if o.field == "organization"));

        let missing = series(json!({ "rule": { "preset": "UniqByUserField" } }));
        assert_eq!(missing.resolve_rule().unwrap_err().error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_legacy_counts() {
        let s = series(json!({
            "segments": [{ "count": 4 }, { "count": 4 }, { "count": 4 }]
        }));
        let SeriesRule::Icpc(options) = s.resolve_rule().unwrap() else {
            panic!("expected count segmentation");
        };
        assert_eq!(options.count.unwrap().value, vec![4, 4, 4]);
        assert!(!options.include_official_only);

        let partial = series(json!({ "segments": [{ "count": 4 }, {}] }));
        assert!(matches!(partial.resolve_rule().unwrap(), SeriesRule::Normal(_)));
    }

    #[test]
    fn test_configuration_errors() {
        let unknown = series(json!({ "rule": { "preset": "Elo" } }));
        assert!(unknown.resolve_rule().unwrap_err().to_string().contains("Elo"));

        let bad_rounding = series(json!({
            "segments": [{}],
            "rule": { "preset": "ICPC", "options": { "ratio": { "value": [0.1], "rounding": "up" } } }
        }));
        assert_eq!(bad_rounding.resolve_rule().unwrap_err().error_code(), "CONFIGURATION_ERROR");

        let too_many = series(json!({
            "segments": [{}],
            "rule": { "preset": "ICPC", "options": { "count": { "value": [1, 2] } } }
        }));
        assert!(too_many.resolve_rule().is_err());

        let overfull = series(json!({
            "segments": [{}, {}],
            "rule": { "preset": "ICPC", "options": { "ratio": { "value": [0.6, 0.6] } } }
        }));
        assert!(overfull.resolve_rule().is_err());
    }
}
