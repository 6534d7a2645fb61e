//! The metric derivation pipeline.
//!
//! EXECUTION ORDER (fixed, never reordered):
//!   0. Scenario stress         (identity for `expected`)
//!   A. Local derivations       (per row, see local_metrics.rs)
//!   B. Risk range              (one reduction over the whole dataset)
//!   C. Finalization            (per row, reads the Phase B range)
//!
//! RULES:
//!   - Phase B runs only after every row has finished Phase A.
//!   - Phase C never runs before Phase B has produced its range.
//!   - The range is an immutable value passed into Phase C.
//!   - The raw risk score is never written out; only the normalized one.
//!   - A non-finite derived value fails the whole run; nothing is written.

use crate::{
    config::MetricsConfig,
    dataset::{Dataset, EnrichedDataset, EnrichedRow},
    error::{PipelineError, PipelineResult},
    finalize::finalize,
    local_metrics::derive_local,
    risk_range::RiskRange,
    scenario::Scenario,
    types::{EnrichedRecord, LocalMetrics, RawInputs},
};

/// Output of one run over a sequence of raw inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub records: Vec<EnrichedRecord>,
    pub risk_range: Option<RiskRange>,
}

#[derive(Debug, Clone)]
pub struct MetricPipeline {
    config: MetricsConfig,
    scenario: Scenario,
}

impl MetricPipeline {
    /// Build a pipeline, rejecting an invalid config up front.
    pub fn new(config: MetricsConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scenario: Scenario::Expected,
        })
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Phase 0 + A for a single row.
    pub fn derive_local(&self, raw: &RawInputs) -> (RawInputs, LocalMetrics) {
        let stressed = self.scenario.apply(raw);
        let local = derive_local(&stressed, &self.config);
        (stressed, local)
    }

    /// Run all phases over `inputs`, preserving order. Row numbers in
    /// errors are 1-based.
    pub fn run(&self, inputs: &[RawInputs]) -> PipelineResult<PipelineRun> {
        log::info!(
            "Deriving metrics for {} rows (scenario: {})",
            inputs.len(),
            self.scenario
        );

        // Phase A
        let local: Vec<(RawInputs, LocalMetrics)> =
            inputs.iter().map(|raw| self.derive_local(raw)).collect();
        for (i, (_, metrics)) in local.iter().enumerate() {
            if let Some(column) = metrics.non_finite_field() {
                return Err(PipelineError::NonFiniteDerived { row: i + 1, column });
            }
        }

        // Phase B
        let Some(range) = RiskRange::from_scores(local.iter().map(|(_, m)| m.risk_score_raw)) else {
            log::info!("Empty dataset, nothing to derive");
            return Ok(PipelineRun {
                records: Vec::new(),
                risk_range: None,
            });
        };
        log::debug!("Raw risk range: [{}, {}]", range.min, range.max);
        if range.is_degenerate() {
            log::warn!(
                "Degenerate risk range (all raw scores = {}); normalized risk set to {}",
                range.min,
                self.config.degenerate_risk_score
            );
        }

        // Phase C
        let records: Vec<EnrichedRecord> = local
            .into_iter()
            .map(|(inputs, local)| EnrichedRecord {
                inputs,
                local,
                finals: finalize(&local, range, &self.config),
            })
            .collect();
        // A range spanning most of f64 can still overflow during normalization.
        for (i, record) in records.iter().enumerate() {
            if let Some(column) = record.non_finite_column() {
                return Err(PipelineError::NonFiniteDerived { row: i + 1, column });
            }
        }

        Ok(PipelineRun {
            records,
            risk_range: Some(range),
        })
    }

    /// Run over a loaded dataset, keeping each row's original cells.
    pub fn run_dataset(&self, dataset: Dataset) -> PipelineResult<EnrichedDataset> {
        let inputs = dataset.inputs();
        let run = self.run(&inputs)?;
        let (headers, rows) = dataset.into_parts();
        let rows = rows
            .into_iter()
            .zip(run.records)
            .map(|(row, record)| EnrichedRow {
                cells: row.cells,
                record,
            })
            .collect();
        Ok(EnrichedDataset {
            headers,
            rows,
            risk_range: run.risk_range,
        })
    }
}
