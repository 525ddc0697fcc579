//! Marker scanner for annotated native sources.
//!
//! Finds every occurrence of the export marker, drops the ones that are
//! commented out, preprocessor-guarded or manually overridden, and slices
//! the declaration text that follows each accepted marker.

use serde::Serialize;
use tracing::debug;

use super::dialect::Dialect;
use super::errors::{SignatureError, SkippedDeclaration};
use super::types::{DeclarationRecord, SourceUnit};

/// Why a marker occurrence was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// A `//` precedes the marker on its line
    Commented,
    /// A `#` precedes the marker on its line
    Preprocessor,
    /// The manual-override token directly precedes the marker
    Manual,
}

/// A marker occurrence that does not produce a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// 1-based line of the marker token
    pub line: usize,
    pub reason: RejectReason,
}

/// Result of scanning one source unit.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Accepted declarations in discovery order
    pub records: Vec<DeclarationRecord>,
    /// Excluded marker occurrences
    pub rejected: Vec<Rejection>,
    /// Accepted markers with no declaration text after them
    pub skipped: Vec<SkippedDeclaration>,
}

/// Scanner for marker-prefixed declarations.
pub struct SourceScanner<'a> {
    dialect: &'a Dialect,
}

impl<'a> SourceScanner<'a> {
    /// Create a scanner for the given dialect.
    pub fn new(dialect: &'a Dialect) -> Self {
        SourceScanner { dialect }
    }

    /// Scan a source unit for declarations.
    pub fn scan(&self, unit: &SourceUnit) -> ScanResult {
        let mut result = ScanResult::default();
        let text = unit.text.as_str();
        let marker = self.dialect.marker.as_str();

        if marker.is_empty() {
            return result;
        }

        for (index, _) in text.match_indices(marker) {
            let line = unit.line_of(index);

            if let Some(reason) = self.rejection(text, index) {
                debug!("ignoring marker at {}:{} ({:?})", unit.file_name(), line, reason);
                result.rejected.push(Rejection { line, reason });
                continue;
            }

            // Single-level search: a nested `(` before the real closing
            // paren truncates the declaration. A slice that runs into a body
            // or the next marker never closed its own parameter list.
            let start = index + marker.len();
            let slice = text[start..]
                .find(')')
                .map(|close| &text[start..=start + close])
                .filter(|decl| !decl.contains(marker) && !decl.contains(['{', ';']));

            match slice {
                Some(decl) => {
                    result.records.push(DeclarationRecord {
                        text: decl.trim().to_string(),
                        offset: index,
                        line,
                    });
                }
                None => {
                    debug!(
                        "unterminated declaration at {}:{}",
                        unit.file_name(),
                        line
                    );
                    let rest = text[start..].lines().next().unwrap_or("").trim();
                    result.skipped.push(SkippedDeclaration {
                        line,
                        text: (!rest.is_empty()).then(|| rest.to_string()),
                        reason: SignatureError::Unterminated,
                    });
                }
            }
        }

        result
    }

    /// Check whether the marker at `index` is excluded.
    fn rejection(&self, text: &str, index: usize) -> Option<RejectReason> {
        let line_start = text[..index].rfind('\n').map_or(0, |p| p + 1);
        let prefix = &text[line_start..index];

        // The nearest exclusion character wins.
        match (prefix.rfind("//"), prefix.rfind('#')) {
            (Some(c), Some(p)) if p > c => return Some(RejectReason::Preprocessor),
            (Some(_), _) => return Some(RejectReason::Commented),
            (None, Some(_)) => return Some(RejectReason::Preprocessor),
            (None, None) => {}
        }

        let manual = self.dialect.manual.as_str();
        if !manual.is_empty() && text[..index].ends_with(manual) {
            return Some(RejectReason::Manual);
        }

        None
    }
}
