//! Rank series calculation
//!
//! Ranks the globally sorted rows once per series and assigns segments.

use std::collections::HashSet;
use std::sync::LazyLock;

use ranklist_common::{RanklistError, RanklistResult};
use ranklist_rules::prelude::*;

use crate::models::{
    Denominator, IcpcOptions, NormalOptions, RankSeries, RankValue, RanklistRow, SeriesRule,
    UniqByUserFieldOptions,
};
use crate::services::scoring_service::SortKey;
use crate::services::segment_service::SegmentService;

static REGISTRY: LazyLock<SpecRegistry<RowContext>> = LazyLock::new(row_context_registry);

/// Rank series calculator
pub struct RankingService;

impl RankingService {
    /// One [`RankValue`] per row for the series at `series_index`.
    ///
    /// `rows` must already be in ranking order with `keys` aligned to them.
    pub fn compute_ranks(
        rows: &[RanklistRow],
        keys: &[SortKey],
        series: &RankSeries,
        series_index: usize,
    ) -> RanklistResult<Vec<RankValue>> {
        let rule = series.resolve_rule()?;
        let mut values = match &rule {
            SeriesRule::Normal(options) => Self::rank_normal(rows, keys, options),
            SeriesRule::UniqByUserField(options) => Self::rank_uniq(rows, keys, options),
            SeriesRule::Icpc(options) => Self::rank_icpc(rows, keys, options)?,
        };

        for (row, value) in rows.iter().zip(values.iter_mut()) {
            if value.rank.is_none() {
                continue;
            }
            if let Some(authored) = row
                .ranks
                .get(series_index)
                .and_then(RankValue::authored_segment)
            {
                value.segment_index = Some(authored);
            }
        }

        Ok(values)
    }

    /// Competition ranking over the included rows: ties share a rank and
    /// the next distinct row ranks at its 1-based position.
    pub fn competition_ranks(keys: &[SortKey], included: &[bool]) -> Vec<Option<u32>> {
        let mut ranks = vec![None; keys.len()];
        let mut position = 0u32;
        let mut previous: Option<(usize, u32)> = None;

        for (i, key) in keys.iter().enumerate() {
            if !included[i] {
                continue;
            }
            position += 1;
            let rank = match previous {
                Some((p, rank)) if keys[p].ties_with(key) => rank,
                _ => position,
            };
            ranks[i] = Some(rank);
            previous = Some((i, rank));
        }
        ranks
    }

    /// Strictly increasing positions over the included rows
    pub fn dense_positions(included: &[bool]) -> Vec<Option<u32>> {
        let mut position = 0u32;
        included
            .iter()
            .map(|&inc| {
                inc.then(|| {
                    position += 1;
                    position
                })
            })
            .collect()
    }

    fn rank_normal(
        rows: &[RanklistRow],
        keys: &[SortKey],
        options: &NormalOptions,
    ) -> Vec<RankValue> {
        let included: Vec<bool> = rows
            .iter()
            .map(|row| !options.include_official_only || row.user.is_official())
            .collect();
        Self::without_segments(Self::competition_ranks(keys, &included))
    }

    fn rank_uniq(
        rows: &[RanklistRow],
        keys: &[SortKey],
        options: &UniqByUserFieldOptions,
    ) -> Vec<RankValue> {
        let mut seen = HashSet::new();
        let included: Vec<bool> = rows
            .iter()
            .map(|row| {
                if options.include_official_only && !row.user.is_official() {
                    return false;
                }
                match row.user.field(&options.field) {
                    Some(value) => seen.insert(value),
                    None => false,
                }
            })
            .collect();
        Self::without_segments(Self::competition_ranks(keys, &included))
    }

    fn rank_icpc(
        rows: &[RanklistRow],
        keys: &[SortKey],
        options: &IcpcOptions,
    ) -> RanklistResult<Vec<RankValue>> {
        let filter = Self::build_filter(options)?;
        let contexts: Vec<RowContext> = rows
            .iter()
            .map(|row| Self::row_context(row, options))
            .collect();
        let included: Vec<bool> = contexts
            .iter()
            .map(|ctx| filter.as_ref().is_none_or(|spec| spec.is_satisfied_by(ctx)))
            .collect();

        let ranks = if options.no_tied {
            Self::dense_positions(&included)
        } else {
            Self::competition_ranks(keys, &included)
        };

        let denominator = match options.ratio.as_ref().map(|r| r.denominator) {
            Some(Denominator::Submitted) => included
                .iter()
                .zip(&contexts)
                .filter(|(inc, ctx)| **inc && HasSubmission.is_satisfied_by(*ctx))
                .count(),
            _ => included.iter().filter(|inc| **inc).count(),
        };

        // a tie group is placed by the rank it starts at
        let positions: Vec<u32> = ranks.iter().flatten().copied().collect();
        let by_count = options
            .count
            .as_ref()
            .map(|count| {
                SegmentService::resolve_segments(&positions, &SegmentService::count_sizes(count))
            });
        let by_ratio = options
            .ratio
            .as_ref()
            .map(|ratio| {
                SegmentService::ratio_sizes(ratio, denominator)
                    .map(|sizes| SegmentService::resolve_segments(&positions, &sizes))
            })
            .transpose()?;

        let segments = match (by_count, by_ratio) {
            (Some(a), Some(b)) => SegmentService::agree(&a, &b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => vec![None; positions.len()],
        };

        let mut segments = segments.into_iter();
        Ok(ranks
            .into_iter()
            .map(|rank| match rank {
                Some(rank) => RankValue::new(Some(rank), segments.next().flatten()),
                None => RankValue::excluded(),
            })
            .collect())
    }

    /// Lower the series filter to a rule tree and build it
    fn build_filter(options: &IcpcOptions) -> RanklistResult<Option<BoxedSpec<RowContext>>> {
        let mut rules = Vec::new();
        if options.include_official_only {
            rules.push(RuleConfig::spec("IsOfficial"));
        }
        if let Some(filter) = &options.filter {
            for field in &filter.by_user_fields {
                rules.push(RuleConfig::user_field_matches(&field.field, &field.rule));
            }
            if let Some(marker) = &filter.by_marker {
                rules.push(RuleConfig::has_marker(marker));
            }
        }

        if rules.is_empty() {
            return Ok(None);
        }

        let config = RuleConfig::and(rules);
        let errors = REGISTRY.validate(&config);
        if !errors.is_empty() {
            return Err(RanklistError::Configuration(errors.join("; ")));
        }
        REGISTRY
            .build(&config)
            .map(Some)
            .ok_or_else(|| RanklistError::Configuration("Unusable series filter".to_string()))
    }

    fn row_context(row: &RanklistRow, options: &IcpcOptions) -> RowContext {
        let mut ctx = RowContext::new()
            .official(row.user.is_official())
            .submitted(row.statuses.iter().any(|s| s.is_submitted()));

        let fields = options
            .filter
            .iter()
            .flat_map(|filter| filter.by_user_fields.iter());
        for filter in fields {
            if let Some(value) = row.user.field(&filter.field) {
                ctx = ctx.with_field(filter.field.clone(), value);
            }
        }
        for marker in &row.user.markers {
            ctx = ctx.with_marker(marker.clone());
        }
        ctx
    }

    fn without_segments(ranks: Vec<Option<u32>>) -> Vec<RankValue> {
        ranks
            .into_iter()
            .map(|rank| match rank {
                Some(rank) => RankValue::new(Some(rank), None),
                None => RankValue::excluded(),
            })
            .collect()
    }
}
