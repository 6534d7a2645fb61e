//! runway-core: financial-health metric derivation for startup scenario datasets.
//!
//! The pipeline turns raw baseline/scenario fields into burn, runway,
//! break-even, risk and survival indicators. See pipeline.rs for the
//! phase order.

pub mod config;
pub mod dataset;
pub mod error;
pub mod finalize;
pub mod guard;
pub mod local_metrics;
pub mod pipeline;
pub mod projection;
pub mod risk_range;
pub mod rng;
pub mod scenario;
pub mod summary;
pub mod synthetic;
pub mod types;

pub use config::{MetricsConfig, RiskWeights};
pub use dataset::{Dataset, EnrichedDataset};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{MetricPipeline, PipelineRun};
pub use scenario::Scenario;
pub use types::{EnrichedRecord, FinalMetrics, LocalMetrics, RawInputs};
