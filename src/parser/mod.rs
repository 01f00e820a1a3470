//! Massif parsing and the in-memory document model.
//!
//! This module handles:
//! - Recovering headers and snapshots from raw massif output
//! - Extracting the chronological key of each snapshot
//! - Defining the document model shared by combiner and serializer

pub mod massif;
pub mod schema;

// Re-export main types
pub use massif::{parse_massif, ScanState, SnapshotParser};
pub use schema::{Document, Line, Snapshot};
