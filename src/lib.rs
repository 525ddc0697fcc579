//! methodgen - P/Invoke binding generator for annotated native sources
//!
//! This crate scans C++ sources for exported function signatures and enum
//! declarations and renders the C# interop module that binds them.

pub mod bindings;
pub mod ops;
pub mod util;

/// Test utilities for methodgen unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides in-memory source units and shared native
/// source fixtures.
#[cfg(test)]
pub mod test_support;

pub use bindings::{CSharpWriter, DeclarationList, Dialect, SourceUnit};
pub use ops::{GenerateError, GenerateOptions};
pub use util::config::Config;
