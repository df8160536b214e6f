//! Problem model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ranklist_common::Text;

/// Problem column of the ranklist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ProblemStatistics>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Accepted/submitted tallies for one problem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemStatistics {
    pub accepted: u32,
    pub submitted: u32,
}

impl Problem {
    /// Short label: alias if set, otherwise the column letter
    pub fn label(&self, index: usize) -> String {
        self.alias.clone().unwrap_or_else(|| column_letter(index))
    }
}

/// Spreadsheet-style column letter: 0 -> A, 25 -> Z, 26 -> AA
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_label() {
        let aliased = Problem {
            alias: Some("1001".to_string()),
            ..Default::default()
        };
        assert_eq!(aliased.label(0), "1001");
        assert_eq!(Problem::default().label(0), "A");
        assert_eq!(Problem::default().label(25), "Z");
        assert_eq!(Problem::default().label(26), "AA");
    }
}
