//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod combine;
pub mod sources;

// Re-export main command functions
pub use combine::{execute_combine, validate_args, CombineArgs, CombineSummary};
pub use sources::{delete_inputs, resolve_inputs};
