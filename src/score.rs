//! Score extraction from a lint report.
//!
//! The rating sits on the second-to-last line of a pylint report:
//!
//! ```text
//! Your code has been rated at 9.57/10 (previous run: 9.57/10, +0.00)
//! ```
//!
//! The score is the text between the last space before the first `/` and
//! that `/`. This is tied to pylint's report layout; nothing here searches
//! for the line.

use crate::lint::{LintError, LintReport, Linter};
use serde::Serialize;

/// Extracted score, kept as the exact text the linter printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Score(String);

impl Score {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the score, for threshold comparisons.
    pub fn value(&self) -> Result<f64, ScoreError> {
        self.0.parse::<f64>().map_err(|_| ScoreError::NotNumeric {
            score: self.0.clone(),
        })
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from score extraction.
#[derive(Debug)]
pub enum ScoreError {
    /// The linter could not produce a report.
    Lint(LintError),
    /// Report is too short to have a score line.
    TooFewLines { lines: usize },
    /// Score line has no `/`.
    MissingSlash { line: String },
    /// No space precedes the first `/` in the score line.
    MissingSpace { line: String },
    /// Score text is not a decimal number.
    NotNumeric { score: String },
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::Lint(e) => write!(f, "{e}"),
            ScoreError::TooFewLines { lines } => {
                write!(
                    f,
                    "lint report has {lines} line(s), need at least 2 to locate the score line"
                )
            }
            ScoreError::MissingSlash { line } => {
                write!(f, "score line has no '/': {line:?}")
            }
            ScoreError::MissingSpace { line } => {
                write!(f, "score line has no space before '/': {line:?}")
            }
            ScoreError::NotNumeric { score } => {
                write!(f, "score {score:?} is not a number")
            }
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Lint(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LintError> for ScoreError {
    fn from(e: LintError) -> Self {
        ScoreError::Lint(e)
    }
}

/// Run the linter and extract the score from its report.
pub fn get_score(linter: &dyn Linter) -> Result<Score, ScoreError> {
    let report = linter.lint_all()?;
    extract_score(&report)
}

/// Extract the score from the second-to-last line of `report`.
pub fn extract_score(report: &LintReport) -> Result<Score, ScoreError> {
    let lines = report.lines();
    if lines.len() < 2 {
        return Err(ScoreError::TooFewLines { lines: lines.len() });
    }
    let line = &lines[lines.len() - 2];
    tracing::debug!(score_line = %line, "parsing score line");
    parse_score_line(line)
}

fn parse_score_line(line: &str) -> Result<Score, ScoreError> {
    let (before_slash, _) = line.split_once('/').ok_or_else(|| ScoreError::MissingSlash {
        line: line.to_string(),
    })?;
    let (_, score) = before_slash
        .rsplit_once(' ')
        .ok_or_else(|| ScoreError::MissingSpace {
            line: line.to_string(),
        })?;
    Ok(Score(score.to_string()))
}
