//! Common vocabulary used across the ranklist crates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time unit of a duration
///
/// Units outside the fixed ladder are kept as `Unrecognized` so that the
/// validator can report them with a path instead of failing the decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Unrecognized(String),
}

impl TimeUnit {
    /// Wire name of the unit
    pub fn as_str(&self) -> &str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Unrecognized(s) => s,
        }
    }

    /// Number of milliseconds in one unit, `None` when unrecognized
    pub fn millis(&self) -> Option<u64> {
        match self {
            TimeUnit::Milliseconds => Some(1),
            TimeUnit::Seconds => Some(1_000),
            TimeUnit::Minutes => Some(60_000),
            TimeUnit::Hours => Some(3_600_000),
            TimeUnit::Days => Some(86_400_000),
            TimeUnit::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.millis().is_some()
    }

    /// The finer of two units; unrecognized units lose to recognized ones
    pub fn finest(self, other: TimeUnit) -> TimeUnit {
        match (self.millis(), other.millis()) {
            (Some(a), Some(b)) if b < a => other,
            (None, Some(_)) => other,
            _ => self,
        }
    }
}

impl From<String> for TimeUnit {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ms" => TimeUnit::Milliseconds,
            "s" => TimeUnit::Seconds,
            "min" => TimeUnit::Minutes,
            "h" => TimeUnit::Hours,
            "d" => TimeUnit::Days,
            _ => TimeUnit::Unrecognized(s),
        }
    }
}

impl From<&str> for TimeUnit {
    fn from(s: &str) -> Self {
        TimeUnit::from(s.to_string())
    }
}

impl From<TimeUnit> for String {
    fn from(unit: TimeUnit) -> Self {
        unit.as_str().to_string()
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A duration encoded as `[value, unit]`, e.g. `[20, "min"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDuration(pub f64, pub TimeUnit);

impl TimeDuration {
    pub fn new(value: f64, unit: impl Into<TimeUnit>) -> Self {
        TimeDuration(value, unit.into())
    }

    pub fn zero(unit: TimeUnit) -> Self {
        TimeDuration(0.0, unit)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn unit(&self) -> &TimeUnit {
        &self.1
    }
}

impl std::fmt::Display for TimeDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// Rounding policy applied when a duration is converted to a coarser unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoundingMode {
    Floor,
    Ceil,
    /// Round half up
    Round,
    Unrecognized(String),
}

impl RoundingMode {
    pub fn as_str(&self) -> &str {
        match self {
            RoundingMode::Floor => "floor",
            RoundingMode::Ceil => "ceil",
            RoundingMode::Round => "round",
            RoundingMode::Unrecognized(s) => s,
        }
    }
}

impl From<String> for RoundingMode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "floor" => RoundingMode::Floor,
            "ceil" => RoundingMode::Ceil,
            "round" => RoundingMode::Round,
            _ => RoundingMode::Unrecognized(s),
        }
    }
}

impl From<RoundingMode> for String {
    fn from(mode: RoundingMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a judged solution
///
/// An absent result (no submission yet) is modelled as `Option::None`
/// at the use site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SolutionResult {
    /// First to solve the problem
    FirstBlood,
    Accepted,
    Rejected,
    /// Result hidden by the ranklist freeze
    Frozen,
    WrongAnswer,
    PresentationError,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    OutputLimitExceeded,
    RuntimeError,
    NoOutput,
    CompilationError,
    UnknownError,
    Custom(String),
}

impl SolutionResult {
    /// Get short code for result
    pub fn code(&self) -> &str {
        match self {
            SolutionResult::FirstBlood => "FB",
            SolutionResult::Accepted => "AC",
            SolutionResult::Rejected => "RJ",
            SolutionResult::Frozen => "?",
            SolutionResult::WrongAnswer => "WA",
            SolutionResult::PresentationError => "PE",
            SolutionResult::TimeLimitExceeded => "TLE",
            SolutionResult::MemoryLimitExceeded => "MLE",
            SolutionResult::OutputLimitExceeded => "OLE",
            SolutionResult::RuntimeError => "RTE",
            SolutionResult::NoOutput => "NOUT",
            SolutionResult::CompilationError => "CE",
            SolutionResult::UnknownError => "UKE",
            SolutionResult::Custom(s) => s,
        }
    }

    /// Check if result counts as solving the problem
    pub fn is_accepted(&self) -> bool {
        matches!(self, SolutionResult::FirstBlood | SolutionResult::Accepted)
    }
}

impl From<String> for SolutionResult {
    fn from(s: String) -> Self {
        match s.as_str() {
            "FB" => SolutionResult::FirstBlood,
            "AC" => SolutionResult::Accepted,
            "RJ" => SolutionResult::Rejected,
            "?" => SolutionResult::Frozen,
            "WA" => SolutionResult::WrongAnswer,
            "PE" => SolutionResult::PresentationError,
            "TLE" => SolutionResult::TimeLimitExceeded,
            "MLE" => SolutionResult::MemoryLimitExceeded,
            "OLE" => SolutionResult::OutputLimitExceeded,
            "RTE" => SolutionResult::RuntimeError,
            "NOUT" => SolutionResult::NoOutput,
            "CE" => SolutionResult::CompilationError,
            "UKE" => SolutionResult::UnknownError,
            _ => SolutionResult::Custom(s),
        }
    }
}

impl From<&str> for SolutionResult {
    fn from(s: &str) -> Self {
        SolutionResult::from(s.to_string())
    }
}

impl From<SolutionResult> for String {
    fn from(result: SolutionResult) -> Self {
        result.code().to_string()
    }
}

impl std::fmt::Display for SolutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Display text, either plain or keyed by language tag with a mandatory fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Text {
    Plain(String),
    Localized {
        fallback: String,
        #[serde(flatten)]
        translations: BTreeMap<String, String>,
    },
}

impl Text {
    /// Text used when no language preference applies
    pub fn fallback(&self) -> &str {
        match self {
            Text::Plain(s) => s,
            Text::Localized { fallback, .. } => fallback,
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Text::Plain(String::new())
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::Plain(s.to_string())
    }
}

/// Contestant identifier, either numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    String(String),
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_duration_wire_form() {
        let d: TimeDuration = serde_json::from_str(r#"[20, "min"]"#).unwrap();
        assert_eq!(d, TimeDuration::new(20.0, TimeUnit::Minutes));

        let odd: TimeDuration = serde_json::from_str(r#"[3, "week"]"#).unwrap();
        assert_eq!(odd.unit(), &TimeUnit::Unrecognized("week".to_string()));
        assert!(!odd.unit().is_recognized());
    }

    #[test]
    fn test_finest_unit() {
        assert_eq!(TimeUnit::Minutes.finest(TimeUnit::Seconds), TimeUnit::Seconds);
        assert_eq!(TimeUnit::Milliseconds.finest(TimeUnit::Days), TimeUnit::Milliseconds);
        assert_eq!(
            TimeUnit::Unrecognized("x".into()).finest(TimeUnit::Hours),
            TimeUnit::Hours
        );
    }

    #[test]
    fn test_solution_result_codes() {
        let results: Vec<Option<SolutionResult>> =
            serde_json::from_str(r#"["FB", "?", "NOUT", null, "Partial"]"#).unwrap();
        assert_eq!(results[0], Some(SolutionResult::FirstBlood));
        assert_eq!(results[1], Some(SolutionResult::Frozen));
        assert_eq!(results[2], Some(SolutionResult::NoOutput));
        assert_eq!(results[3], None);
        assert_eq!(results[4], Some(SolutionResult::Custom("Partial".to_string())));

        assert!(SolutionResult::FirstBlood.is_accepted());
        assert!(!SolutionResult::Frozen.is_accepted());
        assert_eq!(
            serde_json::to_string(&SolutionResult::TimeLimitExceeded).unwrap(),
            r#""TLE""#
        );
    }

    #[test]
    fn test_text_forms() {
        let plain: Text = serde_json::from_str(r#""Team A""#).unwrap();
        assert_eq!(plain.fallback(), "Team A");

        let localized: Text =
            serde_json::from_str(r#"{"fallback": "Team A", "zh-CN": "A 队"}"#).unwrap();
        match &localized {
            Text::Localized { fallback, translations } => {
                assert_eq!(fallback, "Team A");
                assert_eq!(translations.get("zh-CN").map(String::as_str), Some("A 队"));
            }
            Text::Plain(_) => panic!("expected localized text"),
        }
    }

    #[test]
    fn test_user_id_forms() {
        let ids: Vec<UserId> = serde_json::from_str(r#"[7, "team-7"]"#).unwrap();
        assert_eq!(ids[0], UserId::Number(7));
        assert_eq!(ids[1].to_string(), "team-7");
        assert_ne!(UserId::Number(7), UserId::String("7".into()));
    }
}
