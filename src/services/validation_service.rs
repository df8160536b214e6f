//! Document validation service
//!
//! Collects every broken invariant of a document before any computation
//! runs. The document is never modified.

use std::collections::{HashMap, HashSet};

use ranklist_common::{RanklistError, RanklistResult, TimeDuration, UserId, Violation};

use crate::constants::algorithms;
use crate::models::{RankProblemStatus, RanklistDocument, RanklistRow};
use crate::utils::time::to_millis;
use crate::utils::validation::{
    validate_datetime, validate_duration, validate_ranks_len, validate_segment_index,
    validate_solution_order,
};

/// Validation service for ranklist documents
pub struct ValidationService;

impl ValidationService {
    /// Validate a document, reporting every violation at once
    pub fn validate(doc: &RanklistDocument) -> RanklistResult<()> {
        let violations = Self::collect(doc);
        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = violations.len(), "Document failed validation");
            Err(RanklistError::SchemaViolations(violations))
        }
    }

    /// All violations found in a document, in document order
    pub fn collect(doc: &RanklistDocument) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Err(msg) = validate_datetime(&doc.contest.start_at) {
            violations.push(Violation::new("contest.startAt", msg));
        }
        check_duration(&mut violations, "contest.duration", &doc.contest.duration);
        if let Some(frozen) = &doc.contest.frozen_duration {
            check_duration(&mut violations, "contest.frozenDuration", frozen);
        }
        if let Some(now) = &doc.now {
            if let Err(msg) = validate_datetime(now) {
                violations.push(Violation::new("_now", msg));
            }
        }
        if let Some(penalty) = Self::icpc_penalty(doc) {
            check_duration(&mut violations, "sorter.config.penalty", &penalty);
        }

        let mut marker_ids = HashSet::new();
        for (i, marker) in doc.markers.iter().enumerate() {
            if !marker_ids.insert(marker.id.as_str()) {
                violations.push(Violation::new(
                    format!("markers[{}].id", i),
                    format!("duplicate marker id '{}'", marker.id),
                ));
            }
        }

        let mut seen_ids: HashMap<&UserId, usize> = HashMap::new();
        for (i, row) in doc.rows.iter().enumerate() {
            let path = format!("rows[{}]", i);

            if let Some(id) = &row.user.id {
                match seen_ids.get(id) {
                    Some(first) => violations.push(Violation::new(
                        format!("{}.user.id", path),
                        format!("duplicate user id {} (first used by rows[{}])", id, first),
                    )),
                    None => {
                        seen_ids.insert(id, i);
                    }
                }
            }

            for (k, marker) in row.user.markers.iter().enumerate() {
                if !marker_ids.contains(marker.as_str()) {
                    violations.push(Violation::new(
                        format!("{}.user.markers[{}]", path, k),
                        format!("undeclared marker '{}'", marker),
                    ));
                }
            }

            Self::check_row(&mut violations, doc, row, &path);
        }

        violations
    }

    /// The ICPC penalty, when one is configured and readable as a duration
    fn icpc_penalty(doc: &RanklistDocument) -> Option<TimeDuration> {
        let sorter = doc.sorter.as_ref().filter(|s| s.algorithm == algorithms::ICPC)?;
        let penalty = sorter.config.get("penalty")?;
        serde_json::from_value(penalty.clone()).ok()
    }

    fn check_row(
        violations: &mut Vec<Violation>,
        doc: &RanklistDocument,
        row: &RanklistRow,
        path: &str,
    ) {
        if row.statuses.len() != doc.problems.len() {
            violations.push(Violation::new(
                format!("{}.statuses", path),
                format!(
                    "expected {} status(es), one per problem, found {}",
                    doc.problems.len(),
                    row.statuses.len()
                ),
            ));
        }

        if let Err(msg) = validate_ranks_len(row.ranks.len(), doc.series.len()) {
            violations.push(Violation::new(format!("{}.ranks", path), msg));
        }
        for (s, (rank, series)) in row.ranks.iter().zip(&doc.series).enumerate() {
            if let Some(Some(index)) = rank.authored_segment() {
                if let Err(msg) = validate_segment_index(index, series.segments.len()) {
                    violations.push(Violation::new(
                        format!("{}.ranks[{}].segmentIndex", path, s),
                        msg,
                    ));
                }
            }
        }

        if let Some(time) = &row.score.time {
            check_duration(violations, &format!("{}.score.time", path), time);
        }

        for (j, status) in row.statuses.iter().enumerate() {
            Self::check_status(violations, status, &format!("{}.statuses[{}]", path, j));
        }
    }

    fn check_status(violations: &mut Vec<Violation>, status: &RankProblemStatus, path: &str) {
        if let Some(time) = &status.time {
            check_duration(violations, &format!("{}.time", path), time);
        }

        let Some(solutions) = &status.solutions else {
            return;
        };

        let mut times = Vec::with_capacity(solutions.len());
        for (k, solution) in solutions.iter().enumerate() {
            let solution_path = format!("{}.solutions[{}].time", path, k);
            if check_duration(violations, &solution_path, &solution.time) {
                if let Ok(ms) = to_millis(&solution.time) {
                    times.push(ms);
                }
            }
        }

        // order only makes sense once every time is readable
        if times.len() == solutions.len() {
            if let Err(msg) = validate_solution_order(&times) {
                violations.push(Violation::new(format!("{}.solutions", path), msg));
            }
        }
    }
}

/// Push a violation for a bad duration; true when the duration is fine
fn check_duration(violations: &mut Vec<Violation>, path: &str, duration: &TimeDuration) -> bool {
    match validate_duration(duration) {
        Ok(()) => true,
        Err(msg) => {
            violations.push(Violation::new(path, format!("{} (got {})", msg, duration)));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn document(rows: Value) -> RanklistDocument {
        serde_json::from_value(json!({
            "contest": {
                "title": "Validation Cup",
                "startAt": "2020-01-01T09:00:00Z",
                "duration": [5, "h"]
            },
            "problems": [{ "alias": "A" }, { "alias": "B" }],
            "series": [{ "segments": [{ "title": "Gold" }] }],
            "rows": rows,
            "markers": [{ "id": "girls", "label": "Girls' team" }]
        }))
        .unwrap()
    }

    fn status(result: &str) -> Value {
        json!({ "result": result, "time": [10, "min"], "tries": 1 })
    }

    #[test]
    fn test_valid_document() {
        let doc = document(json!([
            { "user": { "id": 1, "name": "A", "markers": ["girls"] }, "statuses": [status("AC"), status("WA")] },
            { "user": { "id": 2, "name": "B" }, "statuses": [status("AC"), status("AC")] }
        ]));
        assert!(ValidationService::validate(&doc).is_ok());
    }

    #[test]
    fn test_status_count_mismatch() {
        let doc = document(json!([
            { "user": { "name": "A" }, "statuses": [status("AC")] }
        ]));
        let err = ValidationService::validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].path, "rows[0].statuses");
    }

    #[test]
    fn test_collects_every_violation() {
        let doc = document(json!([
            {
                "user": { "id": "t1", "name": "A", "markers": ["boys"] },
                "ranks": [{ "rank": 1, "segmentIndex": 3 }],
                "statuses": [
                    { "result": "AC", "time": [-1, "min"] },
                    {
                        "result": "AC",
                        "solutions": [
                            { "result": "WA", "time": [30, "min"] },
                            { "result": "AC", "time": [10, "min"] }
                        ]
                    }
                ]
            },
            {
                "user": { "id": "t1", "name": "B" },
                "ranks": [{ "rank": 2 }, { "rank": 2 }],
                "statuses": [status("AC"), { "result": null, "time": [1, "week"] }]
            }
        ]));

        let violations = ValidationService::collect(&doc);
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "rows[0].user.markers[0]",
                "rows[0].ranks[0].segmentIndex",
                "rows[0].statuses[0].time",
                "rows[0].statuses[1].solutions",
                "rows[1].user.id",
                "rows[1].ranks",
                "rows[1].statuses[1].time",
            ]
        );
        assert!(violations[4].message.contains("rows[0]"));
    }

    #[test]
    fn test_contest_fields() {
        let mut doc = document(json!([]));
        doc.contest.start_at = "soon".to_string();
        doc.contest.duration = TimeDuration::new(5.0, "hours");
        doc.now = Some("later".to_string());

        let paths: Vec<String> = ValidationService::collect(&doc)
            .into_iter()
            .map(|v| v.path)
            .collect();
        assert_eq!(paths, vec!["contest.startAt", "contest.duration", "_now"]);
    }

    #[test]
    fn test_icpc_penalty_is_checked() {
        let mut doc = document(json!([]));
        doc.sorter = Some(
            serde_json::from_value(json!({
                "algorithm": "ICPC",
                "config": { "penalty": [-20, "min"] }
            }))
            .unwrap(),
        );
        let violations = ValidationService::collect(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "sorter.config.penalty");
        assert!(violations[0].message.contains("negative"));

        doc.sorter = Some(
            serde_json::from_value(json!({
                "algorithm": "ICPC",
                "config": { "penalty": [10, "min"] }
            }))
            .unwrap(),
        );
        assert!(ValidationService::collect(&doc).is_empty());
    }
}
