//! Configuration file support for methodgen.
//!
//! A project may carry a `methodgen.toml` next to its native sources:
//!
//! ```toml
//! [dialect]
//! marker = "RH_C_FUNCTION"
//!
//! [output]
//! namespace = "Rhino.Runtime"
//! extra_usings = ["System.Drawing"]
//! host_usings = true
//! ```
//!
//! Command line flags take precedence over file values.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bindings::Dialect;

/// Default config file name.
pub const CONFIG_FILE: &str = "methodgen.toml";

/// methodgen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Declaration dialect tokens
    pub dialect: Dialect,

    /// Output settings
    pub output: OutputConfig,
}

/// Settings for the generated interop module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Namespace wrapping the generated class
    pub namespace: Option<String>,

    /// Additional `using` lines
    pub extra_usings: Vec<String>,

    /// Emit the host application's `using` lines
    pub host_usings: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load `methodgen.toml` from a directory, or defaults if there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            tracing::debug!("using config {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command line overrides.
    pub fn merge_cli(
        &mut self,
        namespace: Option<String>,
        extra_usings: Vec<String>,
        host_usings: bool,
    ) {
        if namespace.is_some() {
            self.output.namespace = namespace;
        }
        self.output.extra_usings.extend(extra_usings);
        self.output.host_usings |= host_usings;
    }
}
