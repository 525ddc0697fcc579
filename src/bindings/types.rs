//! Type definitions for scanned native sources.
//!
//! These types carry a declaration from its raw text span through parsing and
//! type resolution to the renderer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A native source file and its contents.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Source file path
    pub path: PathBuf,

    /// Raw file contents
    pub text: String,
}

impl SourceUnit {
    /// Create a new source unit.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        SourceUnit {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a source unit from disk.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD; only I/O failures are
    /// errors.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(SourceUnit::new(path, String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// File name used for region labels.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// 1-based line number of a byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        let end = offset.min(self.text.len());
        self.text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
    }
}

/// A raw candidate signature: the text after the marker token up to and
/// including the first closing parenthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    /// Trimmed declaration text
    pub text: String,

    /// Byte offset of the marker token
    pub offset: usize,

    /// 1-based line of the marker token
    pub line: usize,
}

/// A function signature split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSignature {
    /// Return type with any leading `const` removed
    pub return_type: String,

    /// Function name
    pub name: String,

    /// Parameters in source order
    pub params: Vec<NativeParam>,
}

/// A single native parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeParam {
    /// Native type text, with the array annotation removed
    pub type_token: String,

    /// Parameter name
    pub name: String,

    /// Whether the type carried the array annotation
    pub is_array: bool,
}

impl NativeParam {
    /// Create a non-array parameter.
    pub fn new(type_token: impl Into<String>, name: impl Into<String>) -> Self {
        NativeParam {
            type_token: type_token.into(),
            name: name.into(),
            is_array: false,
        }
    }

    /// Mark the parameter as array-annotated.
    pub fn with_array(mut self, is_array: bool) -> Self {
        self.is_array = is_array;
        self
    }
}

/// How a value crosses the native/managed boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Passing {
    /// Passed as-is
    Value,
    /// Fixed-layout struct passed by value
    FlatStruct,
    /// Passed by reference to a single value
    Ref,
    /// Read-only contiguous array
    ConstArray,
    /// Array written back by the callee
    InOutArray,
}

/// Special wire representation applied on top of the passing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marshal {
    /// Boolean marshaled as a single byte
    Bool,
    /// Wide-character string
    WideString,
}

/// The managed representation of a native type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMapping {
    /// Managed type name
    pub target: String,

    /// Passing mode
    pub passing: Passing,

    /// Optional marshaling attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marshal: Option<Marshal>,
}

impl TypeMapping {
    /// Plain by-value mapping.
    pub fn value(target: impl Into<String>) -> Self {
        TypeMapping {
            target: target.into(),
            passing: Passing::Value,
            marshal: None,
        }
    }

    /// By-value fixed-layout struct.
    pub fn flat_struct(target: impl Into<String>) -> Self {
        TypeMapping {
            passing: Passing::FlatStruct,
            ..TypeMapping::value(target)
        }
    }

    /// By-reference mapping.
    pub fn by_ref(target: impl Into<String>) -> Self {
        TypeMapping {
            passing: Passing::Ref,
            ..TypeMapping::value(target)
        }
    }

    /// Array mapping, read-only when `is_const`.
    pub fn array(target: impl Into<String>, is_const: bool) -> Self {
        let passing = if is_const {
            Passing::ConstArray
        } else {
            Passing::InOutArray
        };
        TypeMapping {
            passing,
            ..TypeMapping::value(target)
        }
    }

    /// The opaque native handle fallback.
    pub fn opaque() -> Self {
        TypeMapping::value(OPAQUE_HANDLE)
    }

    /// Attach a marshaling attribute.
    pub fn with_marshal(mut self, marshal: Marshal) -> Self {
        self.marshal = Some(marshal);
        self
    }
}

/// Managed name of an address-sized native handle.
pub const OPAQUE_HANDLE: &str = "IntPtr";

/// A parameter after type resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedParam {
    pub name: String,
    pub mapping: TypeMapping,
}

/// A signature after type resolution, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSignature {
    pub name: String,
    pub return_type: TypeMapping,
    pub params: Vec<ResolvedParam>,
}

/// What the renderer emits for one accepted declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    /// A generated foreign function declaration
    Function(ResolvedSignature),
    /// Contains a function pointer and must be written by hand
    FunctionPointer,
}

/// One accepted declaration with its original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub record: DeclarationRecord,
    pub binding: Binding,
}

/// A raw enum declaration, from the `enum` keyword through its terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumRecord {
    /// Raw text including the trailing `;`
    pub text: String,

    /// Byte offset of the `enum` keyword
    pub offset: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of_offset() {
        let unit = SourceUnit::new("a.cpp", "one\ntwo\nthree");
        assert_eq!(unit.line_of(0), 1);
        assert_eq!(unit.line_of(4), 2);
        assert_eq!(unit.line_of(9), 3);
        assert_eq!(unit.line_of(1000), 3);
    }

    #[test]
    fn test_read_latin1_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("legacy.cpp");
        std::fs::write(&path, b"// (c) Caf\xe9\nRH_C_FUNCTION int F(int a)\n").unwrap();

        let unit = SourceUnit::read(&path).unwrap();
        assert!(unit.text.starts_with("// (c) Caf\u{fffd}\n"));
        assert!(unit.text.contains("RH_C_FUNCTION int F(int a)"));
    }

    #[test]
    fn test_read_missing_source_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(SourceUnit::read(&tmp.path().join("missing.cpp")).is_err());
    }

    #[test]
    fn test_file_name_strips_directories() {
        let unit = SourceUnit::new("native/src/on_mesh.cpp", "");
        assert_eq!(unit.file_name(), "on_mesh.cpp");
    }

    #[test]
    fn test_array_mapping_passing() {
        assert_eq!(TypeMapping::array("int", true).passing, Passing::ConstArray);
        assert_eq!(TypeMapping::array("int", false).passing, Passing::InOutArray);
        assert_eq!(TypeMapping::opaque().target, OPAQUE_HANDLE);
    }
}
