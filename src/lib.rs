//! Massif Combine
//!
//! Merges several valgrind massif output files into a single file whose
//! snapshots are in chronological order and numbered from zero.
//!
//! This crate provides the core implementation for the
//! `massif-combine` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! massif-combine -o massif.out.all massif.out.*
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
