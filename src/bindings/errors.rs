//! Errors raised while scanning, parsing and mapping declarations.

use std::path::Path;

use thiserror::Error;

use super::types::DeclarationRecord;
use crate::util::diagnostic::Diagnostic;

/// A declaration that could not be split into return type, name and
/// parameters. Only the offending declaration is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("no closing parenthesis after the marker")]
    Unterminated,

    #[error("no opening parenthesis in declaration")]
    MissingParenthesis,

    #[error("no function name before `(`")]
    MissingFunctionName,

    #[error("no return type before `{name}`")]
    MissingReturnType { name: String },

    #[error("parameter `{fragment}` has no name")]
    MalformedParameter { fragment: String },
}

/// A native type the generator refuses to map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("`{token}` is a disallowed legacy type")]
    Disallowed {
        /// The parameter type as written
        token: String,
        /// Which managed replacement to use instead
        replacement: &'static str,
    },
}

/// A type error tied to the declaration it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source} in `{function}`")]
pub struct DeclarationTypeError {
    pub function: String,
    pub record: DeclarationRecord,
    pub source: TypeError,
}

/// A declaration that was seen but not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeclaration {
    /// 1-based line of the marker token
    pub line: usize,
    /// Declaration text, when one could be sliced out
    pub text: Option<String>,
    pub reason: SignatureError,
}

impl SkippedDeclaration {
    /// Convert to a user-facing warning located at `source`.
    pub fn to_diagnostic(&self, source: &Path) -> Diagnostic {
        let file = source
            .file_name()
            .map_or_else(|| source.display().to_string(), |n| n.to_string_lossy().into_owned());
        let mut diag = Diagnostic::warning(format!(
            "skipped declaration at {}:{}: {}",
            file, self.line, self.reason
        ))
        .with_location(source);

        if let Some(ref text) = self.text {
            diag = diag.with_context(text.clone());
        }

        diag.with_suggestion(
            "Fix the declaration, or mark it /*MANUAL*/ and write the binding by hand",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_declaration_diagnostic() {
        let skipped = SkippedDeclaration {
            line: 12,
            text: Some("int Broken(int)".to_string()),
            reason: SignatureError::MalformedParameter {
                fragment: "int".to_string(),
            },
        };

        let output = skipped
            .to_diagnostic(Path::new("native/on_mesh.cpp"))
            .format(false);
        assert!(output.contains("warning: skipped declaration at on_mesh.cpp:12"));
        assert!(output.contains("  --> native/on_mesh.cpp\n"));
        assert!(output.contains("parameter `int` has no name"));
        assert!(output.contains("int Broken(int)"));
        assert!(output.contains("/*MANUAL*/"));
    }
}
