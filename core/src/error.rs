use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing input column '{column}'")]
    MissingColumn { column: String },

    #[error("Malformed value {value:?} in column '{column}' at row {row}")]
    MalformedValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Derived value '{column}' at row {row} is not finite (inputs too large)")]
    NonFiniteDerived { row: usize, column: &'static str },

    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Unknown scenario '{name}' (expected one of: expected, best, worst)")]
    UnknownScenario { name: String },

    #[error("Row {row} out of range: dataset has {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
