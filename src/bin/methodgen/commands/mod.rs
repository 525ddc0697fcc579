//! Command implementations

pub mod completions;
pub mod generate;
pub mod inspect;

use std::path::PathBuf;

use anyhow::Result;

use methodgen::util::config::Config;

/// Load the config named on the command line, or discover one in the
/// current directory.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path),
        None => Config::discover(&std::env::current_dir()?),
    }
}
