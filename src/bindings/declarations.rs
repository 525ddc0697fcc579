//! Per-file declaration lists.
//!
//! Runs the scanner, signature parser and type mapper over one source unit
//! and collects what the writer needs for that file's region.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use super::dialect::Dialect;
use super::enums::extract_enums;
use super::errors::{DeclarationTypeError, SkippedDeclaration};
use super::scanner::{Rejection, SourceScanner};
use super::signature::SignatureParser;
use super::typemap::TypeMapper;
use super::types::{Binding, Declaration, EnumRecord, SourceUnit};

/// Declarations and enums found in one source unit, in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationList {
    /// Source file path
    pub source: PathBuf,

    /// Accepted declarations
    pub declarations: Vec<Declaration>,

    /// Enum declarations
    pub enums: Vec<EnumRecord>,

    /// Marker occurrences excluded by comment, preprocessor or manual override
    pub rejected: Vec<Rejection>,

    /// Declarations dropped because they could not be parsed
    #[serde(skip)]
    pub skipped: Vec<SkippedDeclaration>,
}

impl DeclarationList {
    /// Scan, parse and resolve one source unit.
    ///
    /// Unparseable declarations are recorded in `skipped`; a disallowed type
    /// fails the whole unit.
    pub fn build(unit: &SourceUnit, dialect: &Dialect) -> Result<Self, DeclarationTypeError> {
        let scan = SourceScanner::new(dialect).scan(unit);
        let parser = SignatureParser::new(dialect);
        let mapper = TypeMapper::new(dialect);
        let file = unit.file_name();

        let mut list = DeclarationList {
            source: unit.path.clone(),
            declarations: Vec::with_capacity(scan.records.len()),
            enums: extract_enums(unit),
            rejected: scan.rejected,
            skipped: scan.skipped,
        };

        for record in scan.records {
            if parser.has_function_pointer(&record.text) {
                debug!("{}:{}: function pointer, left for manual binding", file, record.line);
                list.declarations.push(Declaration {
                    record,
                    binding: Binding::FunctionPointer,
                });
                continue;
            }

            let sig = match parser.parse(&record.text) {
                Ok(sig) => sig,
                Err(reason) => {
                    debug!("{}:{}: skipping declaration: {}", file, record.line, reason);
                    list.skipped.push(SkippedDeclaration {
                        line: record.line,
                        text: Some(record.text),
                        reason,
                    });
                    continue;
                }
            };

            let resolved = mapper
                .resolve_signature(&sig)
                .map_err(|source| DeclarationTypeError {
                    function: sig.name.clone(),
                    record: record.clone(),
                    source,
                })?;

            debug!("{}:{}: {}", file, record.line, resolved.name);
            list.declarations.push(Declaration {
                record,
                binding: Binding::Function(resolved),
            });
        }

        list.skipped.sort_by_key(|s| s.line);

        debug!(
            "{}: {} declarations, {} enums, {} skipped",
            file,
            list.declarations.len(),
            list.enums.len(),
            list.skipped.len()
        );

        Ok(list)
    }

    /// Whether the list contributes a region to the output.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// File name used for the region label.
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}
