//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Input that does not follow the massif snapshot grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedSequence {
    #[error("line {line}: found a new snapshot while another one is still open")]
    DuplicateSnapshotOpen { line: usize },

    #[error("line {line}: snapshot content without an open snapshot")]
    OrphanContent { line: usize },
}

/// Errors that can occur while parsing a single massif source
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed snapshot sequence: {0}")]
    Malformed(#[from] MalformedSequence),

    #[error("line {line}: time value {value:?} is out of range")]
    InvalidKey { line: usize, value: String },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// True for structural grammar violations
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseError::Malformed(_))
    }
}

/// Errors that can occur while combining sources
#[derive(Error, Debug)]
pub enum CombineError {
    #[error("Cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl CombineError {
    /// True when the source was read but breaks the snapshot grammar
    pub fn is_malformed(&self) -> bool {
        match self {
            CombineError::Parse { source, .. } => source.is_malformed(),
            CombineError::SourceUnavailable { .. } => false,
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("No content to write")]
    EmptyDocument,

    #[error("Cannot open output {}: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    SinkWriteError(#[source] std::io::Error),

    #[error("Failed to finalize output: {0}")]
    SinkFinalizeError(#[source] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to write report: {0}")]
    ReportFailed(#[from] serde_json::Error),
}
