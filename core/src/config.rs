use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest logistic exponent magnitude for which `1 / (1 + e^-x)` still
/// rounds strictly below 1.0 in f64.
pub const MAX_LOGISTIC_EXPONENT: f64 = 36.0;

/// Weights of the four sub-indices in the raw risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub burn_sensitivity: f64,
    pub debt_to_cash: f64,
    pub growth_volatility: f64,
    pub market_dependency: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            burn_sensitivity: 0.35,
            debt_to_cash: 0.30,
            growth_volatility: 0.20,
            market_dependency: 0.15,
        }
    }
}

impl RiskWeights {
    pub fn sum(&self) -> f64 {
        self.burn_sensitivity + self.debt_to_cash + self.growth_volatility + self.market_dependency
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Annual cost of one new hire. Monthly salary is this / 12.
    pub annual_salary_assumption: f64,
    pub risk_weights: RiskWeights,
    /// Slope of the survival curve. Must be > 0.
    pub logistic_steepness: f64,
    /// Normalized risk at which survival probability is 0.5. Within [0, 1].
    pub logistic_midpoint: f64,
    /// Runway reported when burn rate is non-positive.
    pub runway_cap_months: f64,
    /// Runway below which a row is flagged as collapsing.
    pub collapse_horizon_months: f64,
    /// Normalized risk assigned to every row when all raw scores are equal.
    pub degenerate_risk_score: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            annual_salary_assumption: 60_000.0,
            risk_weights: RiskWeights::default(),
            logistic_steepness: 5.0,
            logistic_midpoint: 0.5,
            runway_cap_months: 60.0,
            collapse_horizon_months: 12.0,
            degenerate_risk_score: 0.5,
        }
    }
}

impl MetricsConfig {
    /// Load from a JSON file. Absent fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: MetricsConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded metrics config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn monthly_salary(&self) -> f64 {
        self.annual_salary_assumption / 12.0
    }

    pub fn validate(&self) -> PipelineResult<()> {
        non_negative("annual_salary_assumption", self.annual_salary_assumption)?;

        let w = &self.risk_weights;
        non_negative("risk_weights.burn_sensitivity", w.burn_sensitivity)?;
        non_negative("risk_weights.debt_to_cash", w.debt_to_cash)?;
        non_negative("risk_weights.growth_volatility", w.growth_volatility)?;
        non_negative("risk_weights.market_dependency", w.market_dependency)?;
        if (w.sum() - 1.0).abs() > 1e-9 {
            log::warn!("Risk weights sum to {:.4}, not 1.0", w.sum());
        }

        positive("logistic_steepness", self.logistic_steepness)?;
        unit_interval("logistic_midpoint", self.logistic_midpoint)?;
        // Normalized risk lies in [0, 1], so the exponent peaks at the
        // farther end of the curve from the midpoint.
        let m = self.logistic_midpoint;
        let exponent = self.logistic_steepness * m.max(1.0 - m);
        if exponent > MAX_LOGISTIC_EXPONENT {
            return Err(PipelineError::InvalidConfig {
                field: "logistic_steepness",
                reason: format!(
                    "steepness {} with midpoint {m} saturates survival probability to 0 or 1 \
                     (steepness * max(midpoint, 1 - midpoint) must be <= {MAX_LOGISTIC_EXPONENT})",
                    self.logistic_steepness
                ),
            });
        }
        positive("runway_cap_months", self.runway_cap_months)?;
        positive("collapse_horizon_months", self.collapse_horizon_months)?;

        unit_interval("degenerate_risk_score", self.degenerate_risk_score)
    }
}

fn unit_interval(field: &'static str, v: f64) -> PipelineResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(PipelineError::InvalidConfig {
            field,
            reason: format!("must be within [0, 1], got {v}"),
        })
    }
}

fn finite(field: &'static str, v: f64) -> PipelineResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(PipelineError::InvalidConfig {
            field,
            reason: format!("must be finite, got {v}"),
        })
    }
}

fn non_negative(field: &'static str, v: f64) -> PipelineResult<()> {
    finite(field, v)?;
    if v < 0.0 {
        return Err(PipelineError::InvalidConfig {
            field,
            reason: format!("must be >= 0, got {v}"),
        });
    }
    Ok(())
}

fn positive(field: &'static str, v: f64) -> PipelineResult<()> {
    finite(field, v)?;
    if v <= 0.0 {
        return Err(PipelineError::InvalidConfig {
            field,
            reason: format!("must be > 0, got {v}"),
        });
    }
    Ok(())
}
