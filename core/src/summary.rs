//! Dataset-level summary of an enriched run.

use crate::{risk_range::RiskRange, types::EnrichedRecord};
use serde::{Deserialize, Serialize};

/// Runway health bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwayStatus {
    Safe,
    Warning,
    Critical,
}

impl RunwayStatus {
    pub fn from_runway(runway_months: f64) -> Self {
        if runway_months >= 12.0 {
            Self::Safe
        } else if runway_months >= 4.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub break_even_achieved: usize,
    pub collapse_within_12_months: usize,
    pub safe: usize,
    pub warning: usize,
    pub critical: usize,
    pub mean_survival_probability: Option<f64>,
    pub mean_runway_months: Option<f64>,
    pub median_runway_months: Option<f64>,
    pub raw_risk_range: Option<RiskRange>,
    pub degenerate_risk_range: bool,
}

impl DatasetSummary {
    pub fn from_records(records: &[EnrichedRecord], raw_risk_range: Option<RiskRange>) -> Self {
        let rows = records.len();
        let mut summary = Self {
            rows,
            break_even_achieved: 0,
            collapse_within_12_months: 0,
            safe: 0,
            warning: 0,
            critical: 0,
            mean_survival_probability: None,
            mean_runway_months: None,
            median_runway_months: None,
            raw_risk_range,
            degenerate_risk_range: raw_risk_range.is_some_and(|r| r.is_degenerate()),
        };
        if rows == 0 {
            return summary;
        }

        let mut runways = Vec::with_capacity(rows);
        let mut survival_total = 0.0;
        for r in records {
            if r.local.is_break_even_achieved {
                summary.break_even_achieved += 1;
            }
            if r.finals.collapse_within_12_months {
                summary.collapse_within_12_months += 1;
            }
            match RunwayStatus::from_runway(r.local.runway_months) {
                RunwayStatus::Safe => summary.safe += 1,
                RunwayStatus::Warning => summary.warning += 1,
                RunwayStatus::Critical => summary.critical += 1,
            }
            survival_total += r.finals.survival_probability;
            runways.push(r.local.runway_months);
        }

        let n = rows as f64;
        summary.mean_survival_probability = Some(survival_total / n);
        summary.mean_runway_months = Some(runways.iter().sum::<f64>() / n);
        summary.median_runway_months = Some(median(&mut runways));
        summary
    }
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
