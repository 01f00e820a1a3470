//! Combine command implementation.
//!
//! The combine command:
//! 1. Resolves input paths and patterns
//! 2. Parses every input into one document
//! 3. Writes the sorted, renumbered massif file
//! 4. Writes the JSON report (if requested)
//! 5. Deletes the inputs (if requested)

use super::sources::{delete_inputs, resolve_inputs};
use crate::aggregator::Combiner;
use crate::output::{build_report, write_massif, write_report};
use crate::utils::config::DEFAULT_OUTPUT_NAME;
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the combine command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CombineArgs {
    /// Input paths or shell patterns
    pub inputs: Vec<String>,

    /// Combined massif output path
    pub output: PathBuf,

    /// Delete inputs after a successful write
    pub delete_inputs: bool,

    /// Output path for JSON report (optional)
    pub report: Option<PathBuf>,
}

impl Default for CombineArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_NAME),
            delete_inputs: false,
            report: None,
        }
    }
}

/// Result of a completed combine
#[derive(Debug, Clone)]
pub struct CombineSummary {
    /// Inputs after pattern expansion
    pub inputs: Vec<PathBuf>,

    /// Snapshots in the combined file
    pub snapshots_written: usize,

    /// Last per-source error, if any input failed
    pub source_error: Option<String>,

    /// Whether inputs were deleted
    pub inputs_deleted: bool,
}

/// Execute the combine command
///
/// **Public** - main entry point called from main.rs
///
/// Input failures are best effort: they are logged and the remaining
/// inputs are still combined. Only output failures return `Err`.
///
/// # Errors
/// * Nothing to write (no inputs, or inputs without content)
/// * Output file cannot be created, written or closed
pub fn execute_combine(args: CombineArgs) -> Result<CombineSummary> {
    let start_time = Instant::now();

    // Step 1: Resolve inputs
    info!("Step 1/3: Resolving {} input arguments...", args.inputs.len());
    let inputs = exclude_output(resolve_inputs(&args.inputs), &args.output);
    info!("Found {} input files", inputs.len());

    // Step 2: Combine
    info!("Step 2/3: Combining snapshots...");
    let mut combiner = Combiner::new();
    let source_error = match combiner.add_all(&inputs) {
        Ok(()) => None,
        Err(e) => {
            warn!("At least one input failed, last error: {}", e);
            Some(e.to_string())
        }
    };
    let (document, outcomes) = combiner.into_parts();
    let header_count = document.headers.len();

    // Step 3: Write output
    info!("Step 3/3: Writing output files...");
    let snapshots_written = write_massif(document, &args.output)
        .context(format!("Failed to write {}", args.output.display()))?;

    info!(
        "✓ {} snapshots written to: {}",
        snapshots_written,
        args.output.display()
    );

    if let Some(report_path) = &args.report {
        let report = build_report(&args.output, &outcomes, header_count, snapshots_written);
        match write_report(&report, report_path) {
            Ok(()) => info!("✓ Report written to: {}", report_path.display()),
            Err(e) => warn!("Failed to write report {}: {}", report_path.display(), e),
        }
    }

    let inputs_deleted = args.delete_inputs && delete_inputs(&inputs);

    let elapsed = start_time.elapsed();
    info!("Combine completed in {:.2}s", elapsed.as_secs_f64());

    Ok(CombineSummary {
        inputs,
        snapshots_written,
        source_error,
        inputs_deleted,
    })
}

/// Drop the output file from the inputs
///
/// **Private** - a pattern such as `massif.out.*` also matches the
/// result of an earlier run, which must be neither re-read nor deleted
fn exclude_output(inputs: Vec<PathBuf>, output: &Path) -> Vec<PathBuf> {
    let Ok(output) = output.canonicalize() else {
        return inputs;
    };

    inputs
        .into_iter()
        .filter(|input| {
            let is_output = input.canonicalize().is_ok_and(|p| p == output);
            if is_output {
                warn!("Skipping {}: it is the output file", input.display());
            }
            !is_output
        })
        .collect()
}

/// Validate combine arguments
///
/// **Public** - can be called before execute_combine for early validation
///
/// An empty input list is accepted; it ends in an empty-document
/// error at the write step.
pub fn validate_args(args: &CombineArgs) -> Result<()> {
    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if let Some(report) = &args.report {
        if report == &args.output {
            anyhow::bail!("Report path must differ from the output path");
        }
    }

    Ok(())
}
