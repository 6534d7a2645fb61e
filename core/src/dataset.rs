//! Tabular I/O: headed CSV in, headed CSV out.
//!
//! Input columns are carried through verbatim and in order. The raw
//! input columns must all be present and numeric; anything else is
//! passthrough. Columns named like a derived field are dropped on read
//! so a dataset can be fed back through the pipeline.

use crate::{
    error::{PipelineError, PipelineResult},
    risk_range::RiskRange,
    types::{EnrichedRecord, RawInputs, DERIVED_COLUMNS, RAW_COLUMNS},
};
use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    /// Original cell text, aligned with `Dataset::headers`.
    pub cells: Vec<String>,
    pub inputs: RawInputs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> PipelineResult<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let all_headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

        let keep: Vec<usize> = (0..all_headers.len())
            .filter(|&i| {
                let derived = DERIVED_COLUMNS.contains(&all_headers[i].as_str());
                if derived {
                    log::warn!("Dropping pre-existing derived column '{}'", all_headers[i]);
                }
                !derived
            })
            .collect();
        let headers: Vec<String> = keep.iter().map(|&i| all_headers[i].clone()).collect();

        let mut raw_idx = [0usize; 12];
        for (slot, column) in raw_idx.iter_mut().zip(RAW_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| PipelineError::MissingColumn { column: column.to_string() })?;
        }

        let mut rows = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let row_number = i + 1;
            let cells: Vec<String> = keep
                .iter()
                .map(|&c| record.get(c).unwrap_or_default().to_string())
                .collect();

            let mut values = [0.0f64; 12];
            for ((value, &idx), column) in values.iter_mut().zip(&raw_idx).zip(RAW_COLUMNS) {
                *value = parse_cell(&cells[idx], row_number, column)?;
            }

            rows.push(DatasetRow {
                cells,
                inputs: RawInputs::from_columns(values),
            });
        }

        log::debug!("Read {} rows, {} columns", rows.len(), headers.len());
        Ok(Self { headers, rows })
    }

    /// A dataset whose only columns are the raw inputs.
    pub fn from_inputs(inputs: Vec<RawInputs>) -> Self {
        let headers = RAW_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = inputs
            .into_iter()
            .map(|inputs| DatasetRow {
                cells: inputs.columns().iter().map(|v| format_number(*v)).collect(),
                inputs,
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn inputs(&self) -> Vec<RawInputs> {
        self.rows.iter().map(|r| r.inputs).collect()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<DatasetRow>) {
        (self.headers, self.rows)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub cells: Vec<String>,
    pub record: EnrichedRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedDataset {
    pub headers: Vec<String>,
    pub rows: Vec<EnrichedRow>,
    /// None for an empty dataset.
    pub risk_range: Option<RiskRange>,
}

impl EnrichedDataset {
    pub fn records(&self) -> Vec<EnrichedRecord> {
        self.rows.iter().map(|r| r.record).collect()
    }

    pub fn write_path(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> PipelineResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.headers.iter().map(String::as_str).chain(DERIVED_COLUMNS))?;
        for row in &self.rows {
            let derived = row.record.derived_values().map(format_optional);
            wtr.write_record(row.cells.iter().cloned().chain(derived))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Write raw inputs only, header included.
pub fn write_raw_inputs<W: Write>(writer: W, inputs: &[RawInputs]) -> PipelineResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(RAW_COLUMNS)?;
    for raw in inputs {
        wtr.write_record(raw.columns().map(format_number))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Shortest representation that round-trips.
pub fn format_number(v: f64) -> String {
    format!("{v}")
}

/// Missing values become an empty cell.
pub fn format_optional(v: Option<f64>) -> String {
    v.map(format_number).unwrap_or_default()
}

fn parse_cell(cell: &str, row: usize, column: &str) -> PipelineResult<f64> {
    let malformed = || PipelineError::MalformedValue {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    };
    let value: f64 = cell.trim().parse().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }
    Ok(value)
}
