//! Errors that abort a generation run.

use std::io;
use std::path::PathBuf;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::bindings::{DeclarationTypeError, SourceUnit, TypeError};

/// A fatal generation error. No output is written when one occurs.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GenerateError {
    #[error("no source files to scan")]
    #[diagnostic(
        code(methodgen::no_inputs),
        help("Pass native source files, glob patterns or directories")
    )]
    NoInputs,

    #[error("failed to read source `{}`", .path.display())]
    #[diagnostic(code(methodgen::read_source))]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{token}` cannot be bound in `{function}`")]
    #[diagnostic(code(methodgen::disallowed_type))]
    DisallowedType {
        function: String,
        token: String,
        replacement: &'static str,
        #[help]
        advice: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: SourceSpan,
    },

    #[error("failed to write `{}`", .path.display())]
    #[diagnostic(code(methodgen::write_output))]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    /// Attach source context to a declaration type error.
    pub fn disallowed(unit: &SourceUnit, err: DeclarationTypeError) -> Self {
        let TypeError::Disallowed { token, replacement } = err.source;

        let start = err.record.offset;
        let len = unit.text[start..]
            .find(')')
            .map_or(unit.text.len() - start, |p| p + 1);

        GenerateError::DisallowedType {
            function: err.function,
            token,
            replacement,
            advice: format!("Use `{}` in the native signature instead", replacement),
            src: NamedSource::new(unit.path.display().to_string(), unit.text.clone()),
            span: (start, len).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::{DeclarationList, Dialect};
    use crate::test_support::unit;

    #[test]
    fn test_disallowed_span_covers_declaration() {
        let text = "// plane\nRH_C_FUNCTION void SetPlane(const ON_Plane* plane)\n{}\n";
        let source = unit("on_plane.cpp", text);
        let err = DeclarationList::build(&source, &Dialect::default()).unwrap_err();

        let GenerateError::DisallowedType {
            function,
            token,
            replacement,
            span,
            ..
        } = GenerateError::disallowed(&source, err)
        else {
            panic!("expected a disallowed type error");
        };

        assert_eq!(function, "SetPlane");
        assert_eq!(token, "const ON_Plane*");
        assert_eq!(replacement, "ON_PLANE_STRUCT*");
        assert_eq!(span.offset(), 9);
        assert_eq!(
            &text[span.offset()..span.offset() + span.len()],
            "RH_C_FUNCTION void SetPlane(const ON_Plane* plane)"
        );
    }
}
