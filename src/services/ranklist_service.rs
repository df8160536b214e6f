//! Ranklist service
//!
//! Runs the whole pipeline over one document: validation, sorter
//! resolution, cutoff and freeze, scoring, ordering and every rank series.

use rayon::prelude::*;

use ranklist_common::{RanklistError, RanklistResult, TimeDuration};

use crate::config::{EngineConfig, RunOptions};
use crate::models::{RankValue, RanklistDocument, RanklistRow, RankingPrecision, SorterAlgorithm};
use crate::services::{RankingService, ScoringService, ValidationService};
use crate::services::scoring_service::SortKey;
use crate::utils::text::resolve_text;

/// Result of a run
#[derive(Debug)]
pub struct RanklistOutcome {
    pub document: RanklistDocument,
    /// Series that could not be computed; their authored ranks were kept
    pub series_failures: Vec<SeriesFailure>,
}

/// A series whose rule could not be applied
#[derive(Debug)]
pub struct SeriesFailure {
    pub series_index: usize,
    pub error: RanklistError,
}

impl std::fmt::Display for SeriesFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "series[{}]: {}", self.series_index, self.error)
    }
}

/// Ranklist engine entry point
pub struct RanklistService;

impl RanklistService {
    /// Compute scores, order and ranks for a document.
    ///
    /// The input is not modified. Schema violations and sorter configuration
    /// errors abort the run; a broken series only fails itself.
    pub fn process(
        doc: &RanklistDocument,
        options: &RunOptions,
        config: &EngineConfig,
    ) -> RanklistResult<RanklistOutcome> {
        let title = resolve_text(&doc.contest.title, &config.preferred_language);
        tracing::info!(
            contest = %title,
            rows = doc.rows.len(),
            series = doc.series.len(),
            "Processing ranklist"
        );

        ValidationService::validate(doc)?;

        let algorithm = doc.sorter.as_ref().map(|s| s.resolve()).transpose()?;
        let mut document = doc.clone();

        let ranking = match algorithm {
            None => {
                tracing::info!("No sorter given, passing rows through");
                return Ok(Self::unchanged(document));
            }
            Some(SorterAlgorithm::Unknown(name)) => {
                tracing::warn!(algorithm = %name, "Unknown sorter, passing rows through");
                return Ok(Self::unchanged(document));
            }
            Some(SorterAlgorithm::Icpc(icpc)) => {
                let cutoff = Self::cutoff(doc, options)?;
                let freeze_start = if options.apply_freeze {
                    doc.contest.freeze_start()?
                } else {
                    None
                };
                document.rows =
                    ScoringService::preprocess(&doc.rows, cutoff.as_ref(), freeze_start.as_ref())?;
                ScoringService::score_icpc(&mut document.rows, &mut document.problems, &icpc)?;
                icpc.ranking
            }
            Some(SorterAlgorithm::Score(score)) => score.ranking,
        };

        let failures = Self::rank(&mut document, &ranking, config.parallel_series)?;
        tracing::info!(failed_series = failures.len(), "Ranklist computed");

        Ok(RanklistOutcome {
            document,
            series_failures: failures,
        })
    }

    /// Same as [`process`](Self::process) with the run options derived from `config`
    pub fn process_with_config(
        doc: &RanklistDocument,
        config: &EngineConfig,
    ) -> RanklistResult<RanklistOutcome> {
        Self::process(doc, &config.run_options(), config)
    }

    fn unchanged(document: RanklistDocument) -> RanklistOutcome {
        RanklistOutcome {
            document,
            series_failures: Vec::new(),
        }
    }

    /// Explicit cutoff, else the time elapsed at `_now`
    fn cutoff(doc: &RanklistDocument, options: &RunOptions) -> RanklistResult<Option<TimeDuration>> {
        if let Some(cutoff) = &options.cutoff {
            return Ok(Some(cutoff.clone()));
        }
        doc.now
            .as_deref()
            .map(|now| doc.contest.elapsed_at(now))
            .transpose()
    }

    /// Sort rows and fill in every series' ranks
    fn rank(
        document: &mut RanklistDocument,
        ranking: &RankingPrecision,
        parallel: bool,
    ) -> RanklistResult<Vec<SeriesFailure>> {
        let rows = std::mem::take(&mut document.rows);
        let (mut rows, keys) = ScoringService::sort_rows(rows, ranking)?;

        let results: Vec<RanklistResult<Vec<RankValue>>> = if parallel {
            document
                .series
                .par_iter()
                .enumerate()
                .map(|(i, series)| RankingService::compute_ranks(&rows, &keys, series, i))
                .collect()
        } else {
            document
                .series
                .iter()
                .enumerate()
                .map(|(i, series)| RankingService::compute_ranks(&rows, &keys, series, i))
                .collect()
        };

        let series_count = document.series.len();
        for row in rows.iter_mut() {
            row.ranks.resize(series_count, RankValue::default());
        }

        let mut failures = Vec::new();
        for (series_index, result) in results.into_iter().enumerate() {
            match result {
                Ok(values) => Self::write_series(&mut rows, series_index, values),
                Err(error) => {
                    tracing::warn!(series = series_index, error = %error, "Series skipped");
                    failures.push(SeriesFailure {
                        series_index,
                        error,
                    });
                }
            }
        }

        Self::log_order(&rows, &keys);
        document.rows = rows;
        Ok(failures)
    }

    fn write_series(rows: &mut [RanklistRow], series_index: usize, values: Vec<RankValue>) {
        for (row, value) in rows.iter_mut().zip(values) {
            row.ranks[series_index] = value;
        }
    }

    fn log_order(rows: &[RanklistRow], keys: &[SortKey]) {
        if let (Some(first), Some(key)) = (rows.first(), keys.first()) {
            tracing::debug!(
                leader = %first.user.name.fallback(),
                value = key.value,
                time = %key.time,
                "Rows ordered"
            );
        }
    }
}
