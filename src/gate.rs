//! Minimum-score quality gate.

use crate::score::{Score, ScoreError};

/// Result of comparing a score against the configured minimum.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// No minimum configured.
    Unchecked,
    Pass { score: f64, min: f64 },
    Fail { score: f64, min: f64 },
}

impl GateOutcome {
    /// `None` when the gate was not checked.
    pub fn passed(&self) -> Option<bool> {
        match self {
            GateOutcome::Unchecked => None,
            GateOutcome::Pass { .. } => Some(true),
            GateOutcome::Fail { .. } => Some(false),
        }
    }
}

/// Compare `score` against `min_score`. The score is only parsed as a number
/// when a minimum is set.
pub fn evaluate(score: &Score, min_score: Option<f64>) -> Result<GateOutcome, ScoreError> {
    let Some(min) = min_score else {
        return Ok(GateOutcome::Unchecked);
    };
    let value = score.value()?;
    if value >= min {
        tracing::debug!(score = value, min, "score gate passed");
        Ok(GateOutcome::Pass { score: value, min })
    } else {
        tracing::warn!(score = value, min, "score below minimum");
        Ok(GateOutcome::Fail { score: value, min })
    }
}
