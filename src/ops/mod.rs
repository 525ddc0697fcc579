//! High-level operations.
//!
//! This module contains the implementation of methodgen commands.

pub mod errors;
pub mod methodgen_generate;
pub mod methodgen_inspect;

pub use errors::GenerateError;
pub use methodgen_generate::{
    collect_declarations, generate, render, GenerateOptions, GenerateReport, Rendered,
};
pub use methodgen_inspect::{
    entries, format_entries, inspect, EntryStatus, InspectEntry, InspectOptions,
};
