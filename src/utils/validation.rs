//! Input validation utilities

use ranklist_common::TimeDuration;

use super::time::parse_datetime;

/// Validate a duration value and unit
pub fn validate_duration(duration: &TimeDuration) -> Result<(), &'static str> {
    if !duration.value().is_finite() {
        return Err("Duration value must be a finite number");
    }
    if duration.value() < 0.0 {
        return Err("Duration value must not be negative");
    }
    if !duration.unit().is_recognized() {
        return Err("Duration unit must be one of ms, s, min, h, d");
    }
    Ok(())
}

/// Validate an RFC 3339 timestamp
pub fn validate_datetime(s: &str) -> Result<(), &'static str> {
    if parse_datetime(s).is_none() {
        return Err("Invalid RFC 3339 datetime");
    }
    Ok(())
}

/// Validate that a segment index points into a series' segment list
pub fn validate_segment_index(index: u32, segment_count: usize) -> Result<(), &'static str> {
    if index as usize >= segment_count {
        return Err("Segment index is out of range for this series");
    }
    Ok(())
}

/// Validate a per-row ranks list against the number of series
pub fn validate_ranks_len(len: usize, series_count: usize) -> Result<(), &'static str> {
    if len != 0 && len != series_count {
        return Err("Ranks must be empty or carry one entry per series");
    }
    Ok(())
}

/// Validate that solution times (already in milliseconds) never go backwards
pub fn validate_solution_order<T: PartialOrd>(times: &[T]) -> Result<(), &'static str> {
    if times.windows(2).any(|w| w[1] < w[0]) {
        return Err("Solution times must be non-decreasing");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranklist_common::TimeUnit;

    #[test]
    fn test_validate_duration() {
        assert!(validate_duration(&TimeDuration::new(20.0, TimeUnit::Minutes)).is_ok());
        assert!(validate_duration(&TimeDuration::new(-1.0, TimeUnit::Seconds)).is_err());
        assert!(validate_duration(&TimeDuration::new(f64::NAN, TimeUnit::Seconds)).is_err());
        assert!(validate_duration(&TimeDuration::new(1.0, TimeUnit::from("fortnight"))).is_err());
    }

    #[test]
    fn test_validate_datetime() {
        assert!(validate_datetime("2019-11-16T09:00:00+08:00").is_ok());
        assert!(validate_datetime("yesterday").is_err());
    }

    #[test]
    fn test_validate_segment_index() {
        assert!(validate_segment_index(2, 3).is_ok());
        assert!(validate_segment_index(3, 3).is_err());
    }

    #[test]
    fn test_validate_ranks_len() {
        assert!(validate_ranks_len(0, 2).is_ok());
        assert!(validate_ranks_len(2, 2).is_ok());
        assert!(validate_ranks_len(1, 2).is_err());
    }

    #[test]
    fn test_validate_solution_order() {
        assert!(validate_solution_order(&[1, 5, 5, 9]).is_ok());
        assert!(validate_solution_order::<u64>(&[]).is_ok());
        assert!(validate_solution_order(&[3, 2]).is_err());
    }
}
