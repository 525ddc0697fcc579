//! Literal tokens of the annotated declaration dialect.

use serde::{Deserialize, Serialize};

/// The fixed tokens the scanner and parser look for.
///
/// Defaults match the RhinoCommon native support library. Every field can be
/// overridden from the `[dialect]` table of `methodgen.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dialect {
    /// Token that flags an exported function signature
    pub marker: String,

    /// Token placed directly before the marker to opt out of generation
    pub manual: String,

    /// Annotation at the start of a parameter type denoting an array
    pub array: String,

    /// Parameter text containing this token is a function pointer
    pub function_pointer: String,

    /// Type text containing this token is a wide native string
    pub native_string: String,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            marker: "RH_C_FUNCTION".to_string(),
            manual: "/*MANUAL*/".to_string(),
            array: "/*ARRAY*/".to_string(),
            function_pointer: "PROC".to_string(),
            native_string: "RHMONO_STRING".to_string(),
        }
    }
}

impl Dialect {
    /// Strip the array annotation from the start of a parameter type.
    ///
    /// The annotation is matched case-insensitively. Returns the remaining
    /// type text and whether the annotation was present.
    pub fn strip_array<'a>(&self, type_text: &'a str) -> (&'a str, bool) {
        let len = self.array.len();
        match type_text.get(..len) {
            Some(head) if !self.array.is_empty() && head.eq_ignore_ascii_case(&self.array) => {
                (type_text[len..].trim(), true)
            }
            _ => (type_text, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_array_case_insensitive() {
        let dialect = Dialect::default();
        assert_eq!(
            dialect.strip_array("/*ARRAY*/const int*"),
            ("const int*", true)
        );
        assert_eq!(dialect.strip_array("/*array*/ double*"), ("double*", true));
        assert_eq!(dialect.strip_array("double*"), ("double*", false));
    }

    #[test]
    fn test_dialect_partial_toml() {
        let dialect: Dialect = toml::from_str("marker = \"MY_EXPORT\"").unwrap();
        assert_eq!(dialect.marker, "MY_EXPORT");
        assert_eq!(dialect.manual, "/*MANUAL*/");
    }
}
