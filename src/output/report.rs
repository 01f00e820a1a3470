//! JSON combine report writer.
//!
//! Records which inputs went into a combined file and what each one
//! contributed, for scripts that post-process profiler runs.

use crate::aggregator::SourceOutcome;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Combined massif file
    pub output: String,

    /// Header lines carried into the output
    pub header_count: usize,

    /// Snapshots written to the output
    pub total_snapshots: usize,

    /// One entry per input, in processing order
    pub inputs: Vec<InputReport>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Contribution of a single input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputReport {
    pub path: String,
    pub snapshots: usize,
    pub supplied_headers: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SourceOutcome> for InputReport {
    fn from(outcome: &SourceOutcome) -> Self {
        Self {
            path: outcome.path.display().to_string(),
            snapshots: outcome.snapshots_added,
            supplied_headers: outcome.captured_headers,
            error: outcome.error.clone(),
        }
    }
}

/// Build a report from per-source outcomes
pub fn build_report(
    output_path: &Path,
    outcomes: &[SourceOutcome],
    header_count: usize,
    total_snapshots: usize,
) -> CombineReport {
    CombineReport {
        version: REPORT_SCHEMA_VERSION.to_string(),
        output: output_path.display().to_string(),
        header_count,
        total_snapshots,
        inputs: outcomes.iter().map(InputReport::from).collect(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Write a report to a JSON file
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty
/// * `OutputError::SinkUnavailable` - Path is a directory or cannot be created
/// * `OutputError::ReportFailed` - JSON serialization or write error
/// * `OutputError::SinkFinalizeError` - Final flush failed
pub fn write_report(report: &CombineReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing combine report to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(|source| OutputError::SinkUnavailable {
        path: output_path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush().map_err(OutputError::SinkFinalizeError)?;

    debug!("Report lists {} inputs", report.inputs.len());

    Ok(())
}

/// Read a report from a JSON file
///
/// # Errors
/// * `OutputError::SinkUnavailable` - File cannot be opened
/// * `OutputError::ReportFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<CombineReport, OutputError> {
    let input_path = input_path.as_ref();

    let file = File::open(input_path).map_err(|source| OutputError::SinkUnavailable {
        path: input_path.to_path_buf(),
        source,
    })?;

    Ok(serde_json::from_reader(file)?)
}
