//! Time utilities
//!
//! Durations are converted through milliseconds using exact decimal
//! arithmetic, and only rounded once when landing in the target unit.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use ranklist_common::{RanklistError, RanklistResult, RoundingMode, TimeDuration, TimeUnit};

/// Parse a datetime string in RFC 3339 format
pub fn parse_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

fn unit_millis(unit: &TimeUnit) -> RanklistResult<Decimal> {
    unit.millis()
        .map(Decimal::from)
        .ok_or_else(|| RanklistError::Duration(format!("Unrecognized time unit '{}'", unit)))
}

fn exact(value: f64) -> RanklistResult<Decimal> {
    Decimal::try_from(value)
        .map_err(|_| RanklistError::Duration(format!("Value {} is not representable", value)))
}

/// Exact number of milliseconds in a duration
pub fn to_millis(duration: &TimeDuration) -> RanklistResult<Decimal> {
    Ok(exact(duration.value())? * unit_millis(duration.unit())?)
}

/// Convert a duration into `target`, rounding with `rounding`.
///
/// Without a target unit the value passes through unconverted.
pub fn normalize(
    duration: &TimeDuration,
    target: Option<&TimeUnit>,
    rounding: &RoundingMode,
) -> RanklistResult<Decimal> {
    match target {
        None => exact(duration.value()),
        Some(unit) => round_quotient(to_millis(duration)?, unit_millis(unit)?, rounding),
    }
}

/// Like [`normalize`] but keeps the result as a duration in the target unit
pub fn normalize_duration(
    duration: &TimeDuration,
    target: Option<&TimeUnit>,
    rounding: &RoundingMode,
) -> RanklistResult<TimeDuration> {
    let value = normalize(duration, target, rounding)?;
    let unit = target.unwrap_or(duration.unit()).clone();
    Ok(TimeDuration::new(to_f64(value), unit))
}

/// `numerator / denominator` rounded to an integer
pub fn round_quotient(
    numerator: Decimal,
    denominator: Decimal,
    rounding: &RoundingMode,
) -> RanklistResult<Decimal> {
    if denominator <= Decimal::ZERO {
        return Err(RanklistError::Duration(format!(
            "Cannot divide by non-positive {}",
            denominator
        )));
    }

    let rem = numerator % denominator;
    let base = (numerator - rem) / denominator;

    match rounding {
        RoundingMode::Floor if rem < Decimal::ZERO => Ok(base - Decimal::ONE),
        RoundingMode::Floor => Ok(base),
        RoundingMode::Ceil if rem > Decimal::ZERO => Ok(base + Decimal::ONE),
        RoundingMode::Ceil => Ok(base),
        // half up: floor((2n + d) / 2d)
        RoundingMode::Round => round_quotient(
            numerator * Decimal::TWO + denominator,
            denominator * Decimal::TWO,
            &RoundingMode::Floor,
        ),
        RoundingMode::Unrecognized(mode) => Err(RanklistError::Configuration(format!(
            "Unrecognized rounding mode '{}'",
            mode
        ))),
    }
}

/// Express an exact millisecond count in `unit`
pub fn from_millis(millis: Decimal, unit: &TimeUnit) -> RanklistResult<TimeDuration> {
    let value = millis / unit_millis(unit)?;
    Ok(TimeDuration::new(to_f64(value.normalize()), unit.clone()))
}

/// `a - b`, expressed in the finer of the two units
pub fn sub_durations(a: &TimeDuration, b: &TimeDuration) -> RanklistResult<TimeDuration> {
    let unit = a.unit().clone().finest(b.unit().clone());
    from_millis(to_millis(a)? - to_millis(b)?, &unit)
}

/// Time elapsed from `start_at` to `now`, clamped at zero
pub fn elapsed_since(start_at: &str, now: &str) -> RanklistResult<TimeDuration> {
    let start = parse_datetime(start_at)
        .ok_or_else(|| RanklistError::Duration(format!("Invalid datetime '{}'", start_at)))?;
    let now = parse_datetime(now)
        .ok_or_else(|| RanklistError::Duration(format!("Invalid datetime '{}'", now)))?;

    let millis = (now - start).num_milliseconds().max(0);
    Ok(TimeDuration::new(millis as f64, TimeUnit::Milliseconds))
}

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
