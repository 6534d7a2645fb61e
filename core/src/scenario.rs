//! Scenario stress: multipliers applied to raw inputs before Phase A.

use crate::{
    error::{PipelineError, PipelineResult},
    types::RawInputs,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    #[default]
    Expected,
    Best,
    Worst,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioMultipliers {
    pub revenue: f64,
    pub expenses: f64,
    pub growth: f64,
}

impl Scenario {
    pub fn multipliers(&self) -> ScenarioMultipliers {
        match self {
            Self::Expected => ScenarioMultipliers { revenue: 1.0,  expenses: 1.0,  growth: 1.0 },
            Self::Best     => ScenarioMultipliers { revenue: 1.25, expenses: 0.85, growth: 1.4 },
            Self::Worst    => ScenarioMultipliers { revenue: 0.65, expenses: 1.2,  growth: 0.5 },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Expected => "expected",
            Self::Best     => "best",
            Self::Worst    => "worst",
        }
    }

    /// Stressed copy of `raw`. `Expected` returns the inputs unchanged.
    pub fn apply(&self, raw: &RawInputs) -> RawInputs {
        if *self == Self::Expected {
            return *raw;
        }
        let m = self.multipliers();
        RawInputs {
            baseline_revenue: raw.baseline_revenue * m.revenue,
            baseline_fixed_expenses: raw.baseline_fixed_expenses * m.expenses,
            baseline_growth_rate: raw.baseline_growth_rate * m.growth,
            ..*raw
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = PipelineError;

    fn from_str(s: &str) -> PipelineResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expected" => Ok(Self::Expected),
            "best"     => Ok(Self::Best),
            "worst"    => Ok(Self::Worst),
            _ => Err(PipelineError::UnknownScenario { name: s.to_string() }),
        }
    }
}
