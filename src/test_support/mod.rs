//! Test utilities for methodgen unit tests.
//!
//! Provides small helpers for building in-memory source units, plus the
//! native source fixtures shared across the binding tests.

pub mod fixtures;

use crate::bindings::SourceUnit;

pub use fixtures::*;

/// Build an in-memory source unit.
pub fn unit(name: &str, text: &str) -> SourceUnit {
    SourceUnit::new(name, text)
}
