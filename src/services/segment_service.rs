//! Segment resolution
//!
//! Turns segment sizes into a segment index per ranked position. Count and
//! ratio segmentation only differ in how the sizes are computed.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use ranklist_common::{RanklistError, RanklistResult};

use crate::models::{CountOptions, RatioOptions};
use crate::utils::time::round_quotient;

/// Segment resolver
pub struct SegmentService;

impl SegmentService {
    /// Segment index for each 1-based position.
    ///
    /// Segments take consecutive position ranges of the given sizes; a
    /// position past the last boundary belongs to no segment.
    pub fn resolve_segments(positions: &[u32], sizes: &[u32]) -> Vec<Option<u32>> {
        let boundaries: Vec<u64> = sizes
            .iter()
            .scan(0u64, |acc, &size| {
                *acc += u64::from(size);
                Some(*acc)
            })
            .collect();

        positions
            .iter()
            .map(|&position| {
                boundaries
                    .iter()
                    .position(|&end| u64::from(position) <= end)
                    .map(|index| index as u32)
            })
            .collect()
    }

    pub fn count_sizes(count: &CountOptions) -> Vec<u32> {
        count.value.clone()
    }

    /// `ratio × denominator` per segment, rounded as configured
    pub fn ratio_sizes(ratio: &RatioOptions, denominator: usize) -> RanklistResult<Vec<u32>> {
        let total = Decimal::from(denominator as u64);
        ratio
            .value
            .iter()
            .map(|&value| {
                let fraction = Decimal::try_from(value).map_err(|_| {
                    RanklistError::Configuration(format!("Invalid ratio {}", value))
                })?;
                let size = round_quotient(fraction * total, Decimal::ONE, &ratio.rounding)?;
                size.to_u32().ok_or_else(|| {
                    RanklistError::Configuration(format!("Segment size {} out of range", size))
                })
            })
            .collect()
    }

    /// Combine two segmentations: a position keeps a segment only when both agree
    pub fn agree(a: &[Option<u32>], b: &[Option<u32>]) -> Vec<Option<u32>> {
        a.iter()
            .zip(b)
            .map(|(x, y)| if x == y { *x } else { None })
            .collect()
    }
}
