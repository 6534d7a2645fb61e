//! Phase B: the single dataset-wide reduction.
//!
//! RULE: computed exactly once per run, after every row's Phase A,
//! and passed by value into Phase C. Never recomputed per row.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRange {
    pub min: f64,
    pub max: f64,
}

impl RiskRange {
    /// Min/max of the raw risk scores. None for an empty dataset.
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Option<Self> {
        scores.into_iter().fold(None, |acc, s| match acc {
            None => Some(Self { min: s, max: s }),
            Some(r) => Some(Self {
                min: r.min.min(s),
                max: r.max.max(s),
            }),
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when normalization would divide by zero.
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }

    /// Rescale a raw score into [0, 1]. Degenerate ranges map every
    /// score to `degenerate_score`.
    pub fn normalize(&self, raw: f64, degenerate_score: f64) -> f64 {
        if self.is_degenerate() {
            degenerate_score
        } else {
            (raw - self.min) / self.span()
        }
    }
}
