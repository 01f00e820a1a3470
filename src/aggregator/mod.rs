//! Aggregation of massif sources into one combined document.
//!
//! Sources are parsed in order into a single document owned by the
//! combiner, which also keeps a per-source account of what each added.

pub mod combiner;

// Re-export main types
pub use combiner::{Combiner, SourceOutcome};
