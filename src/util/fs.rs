//! Filesystem utilities.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// File extensions picked up when an input is a directory.
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp"];

/// Expand command line inputs into source files.
///
/// Each input is a file, a glob pattern, or a directory walked recursively
/// for native sources. Glob and directory matches are sorted; the order of
/// the inputs themselves is kept.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_dir() {
            files.extend(source_files_in(path)?);
        } else if is_glob(input) {
            let mut matched = Vec::new();
            for entry in glob(input).with_context(|| format!("invalid glob pattern: {}", input))? {
                match entry {
                    Ok(path) if path.is_file() => matched.push(path),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("glob error: {}", e),
                }
            }
            if matched.is_empty() {
                tracing::warn!("pattern matched no files: {}", input);
            }
            matched.sort();
            files.extend(matched);
        } else {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Native sources below a directory, sorted.
pub fn source_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", dir.display()))?;
        let path = entry.path();
        let is_source = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));

        if entry.file_type().is_file() && is_source {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Write a file by persisting a temporary file from the same directory.
///
/// The target is either left untouched or fully replaced.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
