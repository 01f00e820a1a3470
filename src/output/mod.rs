//! Output writers for combined massif data.
//!
//! This module handles writing data to disk:
//! - The combined massif file
//! - The optional JSON combine report

pub mod massif;
pub mod report;

// Re-export main functions
pub use massif::{serialize_document, write_massif};
pub use report::{build_report, read_report, write_report, CombineReport, InputReport};

use crate::utils::error::OutputError;
use log::debug;
use std::io;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::SinkUnavailable {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
        });
    }

    Ok(())
}

/// Create missing parent directories of an output file
fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|source| OutputError::SinkUnavailable {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
