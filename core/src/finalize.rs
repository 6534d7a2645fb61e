//! Phase C: per-row finalization against the dataset risk range.

use crate::{
    config::MetricsConfig,
    risk_range::RiskRange,
    types::{FinalMetrics, LocalMetrics},
};

pub fn finalize(local: &LocalMetrics, range: RiskRange, config: &MetricsConfig) -> FinalMetrics {
    let risk_score = range.normalize(local.risk_score_raw, config.degenerate_risk_score);
    FinalMetrics {
        risk_score,
        survival_probability: survival_probability(risk_score, config),
        collapse_within_12_months: local.runway_months < config.collapse_horizon_months,
        bankruptcy_month: (local.burn_rate > 0.0).then_some(local.runway_months),
    }
}

/// Logistic curve, strictly decreasing in `risk_score` for steepness > 0.
pub fn survival_probability(risk_score: f64, config: &MetricsConfig) -> f64 {
    1.0 / (1.0 + (config.logistic_steepness * (risk_score - config.logistic_midpoint)).exp())
}
