//! P/Invoke binding generation for annotated native sources.
//!
//! This module scans native source files for marker-prefixed function
//! signatures and enum declarations, maps every native type to a managed
//! representation, and renders a C# interop module.

pub mod declarations;
pub mod dialect;
pub mod enums;
pub mod errors;
pub mod scanner;
pub mod signature;
pub mod typemap;
pub mod types;
pub mod writer;

pub use declarations::DeclarationList;
pub use dialect::Dialect;
pub use errors::{DeclarationTypeError, SignatureError, SkippedDeclaration, TypeError};
pub use scanner::SourceScanner;
pub use signature::SignatureParser;
pub use typemap::{TypeMapper, TypeToken};
pub use types::{
    Binding, Declaration, DeclarationRecord, EnumRecord, Marshal, NativeParam, ParsedSignature,
    Passing, ResolvedParam, ResolvedSignature, SourceUnit, TypeMapping,
};
pub use writer::CSharpWriter;
