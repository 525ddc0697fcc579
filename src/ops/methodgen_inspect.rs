//! Implementation of `methodgen inspect`.
//!
//! Scans sources and reports what would be bound without rendering C#.

use std::path::PathBuf;

use serde::Serialize;

use super::errors::GenerateError;
use super::methodgen_generate::collect_declarations;
use crate::bindings::scanner::RejectReason;
use crate::bindings::{Binding, DeclarationList, Dialect};

/// Options for inspecting sources.
#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub inputs: Vec<PathBuf>,
    pub dialect: Dialect,
}

/// What happens to one marker occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// A binding is generated
    Bound,
    /// Takes a function pointer, written by hand
    Manual,
    /// The marker was ignored
    Excluded(RejectReason),
}

/// One line of the human-readable listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectEntry {
    pub file: String,
    pub line: usize,
    /// Function name; empty for excluded markers
    pub name: String,
    pub status: EntryStatus,
}

/// Scan the inputs into declaration lists.
pub fn inspect(opts: &InspectOptions) -> Result<Vec<DeclarationList>, GenerateError> {
    collect_declarations(&opts.inputs, &opts.dialect)
}

/// Flatten declaration lists into one entry per marker, in line order.
pub fn entries(lists: &[DeclarationList]) -> Vec<InspectEntry> {
    let mut entries = Vec::new();

    for list in lists {
        let file = list.file_name();
        let start = entries.len();

        for decl in &list.declarations {
            let (name, status) = match &decl.binding {
                Binding::Function(sig) => (sig.name.clone(), EntryStatus::Bound),
                Binding::FunctionPointer => {
                    (function_name(&decl.record.text), EntryStatus::Manual)
                }
            };
            entries.push(InspectEntry {
                file: file.clone(),
                line: decl.record.line,
                name,
                status,
            });
        }

        for rejection in &list.rejected {
            entries.push(InspectEntry {
                file: file.clone(),
                line: rejection.line,
                name: String::new(),
                status: EntryStatus::Excluded(rejection.reason),
            });
        }

        entries[start..].sort_by_key(|e| e.line);
    }

    entries
}

/// Best-effort name for a declaration that was not parsed.
fn function_name(text: &str) -> String {
    let head = text.split('(').next().unwrap_or(text);
    head.split_whitespace()
        .last()
        .unwrap_or_default()
        .trim_start_matches('*')
        .to_string()
}

fn describe(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::Commented => "commented out",
        RejectReason::Preprocessor => "preprocessor line",
        RejectReason::Manual => "manual override",
    }
}

/// Format entries for terminal output.
pub fn format_entries(entries: &[InspectEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        let line = match entry.status {
            EntryStatus::Bound => entry.name.clone(),
            EntryStatus::Manual => format!("{} (manual)", entry.name),
            EntryStatus::Excluded(reason) => format!("excluded ({})", describe(reason)),
        };
        output.push_str(&format!("{}:{}: {}\n", entry.file, entry.line, line));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{unit, MESH_CPP};

    #[test]
    fn test_entries_follow_source_lines() {
        let list = DeclarationList::build(&unit("on_mesh.cpp", MESH_CPP), &Dialect::default())
            .unwrap();
        let entries = entries(&[list]);

        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.line, e.name.as_str(), e.status))
            .collect();
        assert_eq!(
            summary,
            vec![
                (9, "ON_Mesh_New", EntryStatus::Bound),
                (16, "ON_Mesh_GetInt", EntryStatus::Bound),
                (24, "", EntryStatus::Excluded(RejectReason::Commented)),
                (26, "", EntryStatus::Excluded(RejectReason::Manual)),
                (30, "ON_Mesh_SetCallback", EntryStatus::Manual),
            ]
        );
        assert!(entries.iter().all(|e| e.file == "on_mesh.cpp"));
    }

    #[test]
    fn test_format_entries() {
        let entry = |line, name: &str, status| InspectEntry {
            file: "a.cpp".to_string(),
            line,
            name: name.to_string(),
            status,
        };
        let entries = vec![
            entry(3, "Foo", EntryStatus::Bound),
            entry(5, "", EntryStatus::Excluded(RejectReason::Preprocessor)),
            entry(9, "Bar", EntryStatus::Manual),
        ];

        assert_eq!(
            format_entries(&entries),
            "a.cpp:3: Foo\na.cpp:5: excluded (preprocessor line)\na.cpp:9: Bar (manual)\n"
        );
    }

    #[test]
    fn test_function_name_of_raw_declaration() {
        assert_eq!(
            function_name("RH_C_FUNCTION ON_Mesh* ON_Mesh_Get(MESHPROC cb)"),
            "ON_Mesh_Get"
        );
    }

    #[test]
    fn test_inspect_requires_inputs() {
        let opts = InspectOptions {
            inputs: Vec::new(),
            dialect: Dialect::default(),
        };
        assert!(matches!(inspect(&opts), Err(GenerateError::NoInputs)));
    }
}
