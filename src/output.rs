//! Rendering of the extracted score for humans and for automation.

use crate::gate::GateOutcome;
use crate::score::Score;
use chrono::{DateTime, Utc};
use serde::Serialize;

const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const NC: &str = "\x1b[0m";

/// One score check, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct ScoreRecord {
    pub score: Score,
    pub min_score: Option<f64>,
    pub passed: Option<bool>,
    /// Where the report came from.
    pub source: String,
    pub checked_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(score: Score, outcome: &GateOutcome, source: String) -> Self {
        let min_score = match outcome {
            GateOutcome::Unchecked => None,
            GateOutcome::Pass { min, .. } | GateOutcome::Fail { min, .. } => Some(*min),
        };
        Self {
            score,
            min_score,
            passed: outcome.passed(),
            source,
            checked_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Colored one-line gate summary for stderr, or `None` when nothing was checked.
pub fn gate_banner(outcome: &GateOutcome) -> Option<String> {
    match outcome {
        GateOutcome::Unchecked => None,
        GateOutcome::Pass { score, min } => Some(format!(
            "{GREEN}=== SCORE GATE PASSED: {score:.2} >= {min:.2} ==={NC}"
        )),
        GateOutcome::Fail { score, min } => Some(format!(
            "{RED}=== SCORE GATE FAILED: {score:.2} < {min:.2} ==={NC}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::LintReport;
    use crate::score::extract_score;

    fn sample_score() -> Score {
        let report = LintReport::new(vec![
            "Your code has been rated at 9.57/10 (previous run: 9.57/10, +0.00)".to_string(),
            String::new(),
        ]);
        extract_score(&report).unwrap()
    }

    #[test]
    fn test_record_json_fields() {
        let outcome = GateOutcome::Pass {
            score: 9.57,
            min: 9.0,
        };
        let record = ScoreRecord::new(sample_score(), &outcome, "standard input".to_string());
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["score"], "9.57");
        assert_eq!(value["min_score"], 9.0);
        assert_eq!(value["passed"], true);
        assert_eq!(value["source"], "standard input");
        assert!(value["checked_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_record_json_unchecked_has_nulls() {
        let record = ScoreRecord::new(sample_score(), &GateOutcome::Unchecked, "x".to_string());
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert!(value["min_score"].is_null());
        assert!(value["passed"].is_null());
    }

    #[test]
    fn test_gate_banner() {
        assert!(gate_banner(&GateOutcome::Unchecked).is_none());

        let pass = gate_banner(&GateOutcome::Pass {
            score: 9.57,
            min: 9.0,
        })
        .unwrap();
        assert!(pass.contains("PASSED"));
        assert!(pass.contains("9.57 >= 9.00"));

        let fail = gate_banner(&GateOutcome::Fail {
            score: 7.5,
            min: 9.0,
        })
        .unwrap();
        assert!(fail.contains("FAILED"));
        assert!(fail.contains("7.50 < 9.00"));
    }
}
