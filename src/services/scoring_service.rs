//! Scoring service
//!
//! Computes each row's score and canonical problem statuses, and produces
//! the global row order every series is ranked from.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use ranklist_common::{RanklistResult, SolutionResult, TimeDuration, TimeUnit};

use crate::models::{
    IcpcSorterConfig, Problem, ProblemStatistics, RankProblemStatus, RankScore, RanklistRow,
    RankingPrecision, Solution,
};
use crate::utils::time::{from_millis, normalize, to_f64, to_millis};

/// Comparable summary of a row's score
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub value: f64,
    /// Total time in the ranking precision unit, or exact milliseconds
    pub time: Decimal,
}

impl SortKey {
    /// Higher value first, then less time
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        other
            .value
            .partial_cmp(&self.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.time.cmp(&other.time))
    }

    pub fn ties_with(&self, other: &Self) -> bool {
        self.cmp_rank(other) == Ordering::Equal
    }
}

/// Outcome of scoring one (row, problem) pair
struct ProblemOutcome {
    status: RankProblemStatus,
    /// Accepted time plus penalty, when solved
    cost_millis: Option<Decimal>,
    /// Unit the accepted time is reported in
    unit: Option<TimeUnit>,
}

/// Scoring service
pub struct ScoringService;

impl ScoringService {
    /// Drop solutions after `cutoff` and hide those at or after `freeze_start`.
    ///
    /// Works on a copy; statuses without a solution history are left as authored.
    pub fn preprocess(
        rows: &[RanklistRow],
        cutoff: Option<&TimeDuration>,
        freeze_start: Option<&TimeDuration>,
    ) -> RanklistResult<Vec<RanklistRow>> {
        let cutoff = cutoff.map(to_millis).transpose()?;
        let freeze_start = freeze_start.map(to_millis).transpose()?;

        let mut rows = rows.to_vec();
        if cutoff.is_none() && freeze_start.is_none() {
            return Ok(rows);
        }

        let mut dropped = 0usize;
        let mut frozen = 0usize;
        for status in rows.iter_mut().flat_map(|row| row.statuses.iter_mut()) {
            let Some(solutions) = status.solutions.as_mut() else {
                continue;
            };

            let mut kept = Vec::with_capacity(solutions.len());
            for mut solution in solutions.drain(..) {
                let at = to_millis(&solution.time)?;
                if cutoff.is_some_and(|c| at > c) {
                    dropped += 1;
                    continue;
                }
                if freeze_start.is_some_and(|f| at >= f) {
                    solution.result = Some(SolutionResult::Frozen);
                    frozen += 1;
                }
                kept.push(solution);
            }
            *solutions = kept;
        }

        tracing::debug!(dropped, frozen, "Preprocessed solutions");
        Ok(rows)
    }

    /// Score every row under ICPC rules and refresh problem statistics
    pub fn score_icpc(
        rows: &mut [RanklistRow],
        problems: &mut [Problem],
        config: &IcpcSorterConfig,
    ) -> RanklistResult<()> {
        let penalty = to_millis(&config.penalty)?;

        for row in rows.iter_mut() {
            let mut value = 0.0;
            let mut total = Decimal::ZERO;
            let mut unit = config
                .time_precision
                .clone()
                .unwrap_or_else(|| config.penalty.unit().clone());

            for status in row.statuses.iter_mut() {
                let outcome = match &status.solutions {
                    Some(solutions) => Self::from_solutions(status, solutions, config, penalty)?,
                    None => Self::from_authored(status, config, penalty)?,
                };

                if let Some(cost) = outcome.cost_millis {
                    value += 1.0;
                    total += cost;
                    if config.time_precision.is_none() {
                        if let Some(u) = outcome.unit {
                            unit = unit.finest(u);
                        }
                    }
                }
                *status = outcome.status;
            }

            row.score = RankScore {
                value,
                time: Some(from_millis(total, &unit)?),
            };
        }

        Self::mark_first_blood(rows)?;
        Self::refresh_statistics(rows, problems);
        Ok(())
    }

    /// Solution history is the source of truth
    fn from_solutions(
        status: &RankProblemStatus,
        solutions: &[Solution],
        config: &IcpcSorterConfig,
        penalty: Decimal,
    ) -> RanklistResult<ProblemOutcome> {
        let mut canonical = RankProblemStatus {
            result: None,
            score: status.score,
            time: None,
            tries: None,
            solutions: Some(solutions.to_vec()),
            extra: status.extra.clone(),
        };

        let Some(last) = solutions.last() else {
            return Ok(ProblemOutcome {
                status: canonical,
                cost_millis: None,
                unit: None,
            });
        };

        match solutions.iter().position(Solution::is_accepted) {
            Some(accepted) => {
                let (at, reported) = Self::reported_time(&solutions[accepted].time, config)?;
                let penalized = solutions[..accepted]
                    .iter()
                    .filter(|s| config.is_penalized(s.result.as_ref()))
                    .count();

                canonical.result = Some(SolutionResult::Accepted);
                canonical.tries = Some(accepted as u32 + 1);
                let unit = reported.unit().clone();
                canonical.time = Some(reported);

                Ok(ProblemOutcome {
                    status: canonical,
                    cost_millis: Some(at + penalty * Decimal::from(penalized as u64)),
                    unit: Some(unit),
                })
            }
            None => {
                let pending = solutions
                    .iter()
                    .any(|s| s.result == Some(SolutionResult::Frozen));
                canonical.result = Some(if pending {
                    SolutionResult::Frozen
                } else {
                    SolutionResult::Rejected
                });
                canonical.tries = Some(solutions.len() as u32);
                canonical.time = Some(Self::reported_time(&last.time, config)?.1);

                Ok(ProblemOutcome {
                    status: canonical,
                    cost_millis: None,
                    unit: None,
                })
            }
        }
    }

    /// Static documents: trust the authored summary
    fn from_authored(
        status: &RankProblemStatus,
        config: &IcpcSorterConfig,
        penalty: Decimal,
    ) -> RanklistResult<ProblemOutcome> {
        let Some(time) = status.time.as_ref().filter(|_| status.is_accepted()) else {
            return Ok(ProblemOutcome {
                status: status.clone(),
                cost_millis: None,
                unit: None,
            });
        };

        let (at, _) = Self::reported_time(time, config)?;
        let penalized = status.tries.unwrap_or(1).saturating_sub(1);
        Ok(ProblemOutcome {
            status: status.clone(),
            cost_millis: Some(at + penalty * Decimal::from(penalized)),
            unit: Some(time.unit().clone()),
        })
    }

    /// A time at the configured precision, with its exact milliseconds
    fn reported_time(
        time: &TimeDuration,
        config: &IcpcSorterConfig,
    ) -> RanklistResult<(Decimal, TimeDuration)> {
        match &config.time_precision {
            Some(unit) => {
                let value = normalize(time, Some(unit), &config.time_rounding)?;
                let reported = TimeDuration::new(to_f64(value), unit.clone());
                Ok((to_millis(&reported)?, reported))
            }
            None => Ok((to_millis(time)?, time.clone())),
        }
    }

    /// Earliest accepted official solve of each problem becomes `FB`
    fn mark_first_blood(rows: &mut [RanklistRow]) -> RanklistResult<()> {
        let problem_count = rows.iter().map(|r| r.statuses.len()).max().unwrap_or(0);

        for j in 0..problem_count {
            let mut earliest: Option<Decimal> = None;
            let mut holders = Vec::new();

            for (i, row) in rows.iter().enumerate() {
                if !row.user.is_official() {
                    continue;
                }
                let Some(status) = row.statuses.get(j) else {
                    continue;
                };
                if status.solutions.is_none() || !status.is_accepted() {
                    continue;
                }
                let Some(time) = &status.time else {
                    continue;
                };

                let at = to_millis(time)?;
                match earliest {
                    Some(best) if at > best => {}
                    Some(best) if at == best => holders.push(i),
                    _ => {
                        earliest = Some(at);
                        holders = vec![i];
                    }
                }
            }

            for i in holders {
                rows[i].statuses[j].result = Some(SolutionResult::FirstBlood);
            }
        }
        Ok(())
    }

    /// Recount accepted/submitted solutions for problems that carry history
    fn refresh_statistics(rows: &[RanklistRow], problems: &mut [Problem]) {
        for (j, problem) in problems.iter_mut().enumerate() {
            let mut stats = ProblemStatistics::default();
            let mut tracked = false;

            for solutions in rows
                .iter()
                .filter_map(|row| row.statuses.get(j))
                .filter_map(|status| status.solutions.as_ref())
            {
                tracked = true;
                stats.submitted += solutions.len() as u32;
                stats.accepted += solutions.iter().filter(|s| s.is_accepted()).count() as u32;
            }

            if tracked {
                tracing::trace!(problem = %problem.label(j), ?stats, "Refreshed statistics");
                problem.statistics = Some(stats);
            }
        }
    }

    /// Sort key of a row under the given ranking precision
    pub fn sort_key(row: &RanklistRow, ranking: &RankingPrecision) -> RanklistResult<SortKey> {
        let time = match (&row.score.time, &ranking.unit) {
            (None, _) => Decimal::ZERO,
            (Some(time), Some(unit)) => normalize(time, Some(unit), &ranking.rounding)?,
            (Some(time), None) => to_millis(time)?,
        };
        Ok(SortKey {
            value: row.score.value,
            time,
        })
    }

    /// Stable sort of rows by score; returns the rows with their keys
    pub fn sort_rows(
        rows: Vec<RanklistRow>,
        ranking: &RankingPrecision,
    ) -> RanklistResult<(Vec<RanklistRow>, Vec<SortKey>)> {
        let mut keyed = rows
            .into_iter()
            .map(|row| Self::sort_key(&row, ranking).map(|key| (row, key)))
            .collect::<RanklistResult<Vec<_>>>()?;

        keyed.sort_by(|a, b| a.1.cmp_rank(&b.1));
        Ok(keyed.into_iter().unzip())
    }
}
