//! C# P/Invoke writer.
//!
//! Renders declaration lists into a single `UnsafeNativeMethods` partial
//! class, one `#region` per contributing source file.

use super::declarations::DeclarationList;
use super::enums::format_enum;
use super::types::{Binding, Declaration, Marshal, Passing, ResolvedParam, ResolvedSignature};

/// Namespaces the host application's wrapper types live in.
const HOST_USINGS: &[&str] = &[
    "Rhino",
    "Rhino.Geometry",
    "Rhino.Geometry.Intersect",
    "Rhino.Collections",
    "Rhino.Display",
    "Rhino.Runtime.InteropWrappers",
];

/// Writer for C# interop declarations.
#[derive(Debug, Clone)]
pub struct CSharpWriter {
    /// Logical native library name, used as `Import.<library>`
    library: String,
    /// Optional wrapping namespace
    namespace: Option<String>,
    /// Emit the host application's `using` lines
    host_usings: bool,
    /// Caller-supplied `using` lines
    extra_usings: Vec<String>,
}

impl CSharpWriter {
    /// Create a writer for the given library.
    pub fn new(library: impl Into<String>) -> Self {
        CSharpWriter {
            library: library.into(),
            namespace: None,
            host_usings: false,
            extra_usings: Vec::new(),
        }
    }

    /// Wrap the output in a namespace.
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace.filter(|ns| !ns.trim().is_empty());
        self
    }

    /// Emit the host application's `using` lines.
    pub fn with_host_usings(mut self, host_usings: bool) -> Self {
        self.host_usings = host_usings;
        self
    }

    /// Add extra `using` lines.
    pub fn with_extra_usings(mut self, usings: Vec<String>) -> Self {
        self.extra_usings = usings;
        self
    }

    /// Render the complete interop module.
    pub fn render(&self, lists: &[DeclarationList]) -> String {
        let mut output = String::new();

        self.write_header(&mut output);

        if let Some(ref ns) = self.namespace {
            output.push_str(&format!("namespace {}\n{{\n", ns));
        }
        output.push_str("internal partial class UnsafeNativeMethods\n{\n");
        if !self.library.ends_with("rdk") {
            output.push_str("  private UnsafeNativeMethods(){}\n");
        }

        for list in lists.iter().filter(|l| !l.is_empty()) {
            self.write_list(&mut output, list);
            output.push_str("\n\n");
        }

        output.push_str("}\n");
        if self.namespace.is_some() {
            output.push_str("}\n");
        }

        output
    }

    fn write_header(&self, output: &mut String) {
        output.push_str("// !!!DO NOT EDIT THIS FILE BY HAND!!!\n");
        output.push_str("// Generated by methodgen from the annotated native sources.\n");
        output.push_str("// Change the native declarations and regenerate instead.\n");
        output.push('\n');
        output.push_str("using System;\n");
        output.push_str("using System.Runtime.InteropServices;\n");

        if self.host_usings {
            for ns in HOST_USINGS {
                output.push_str(&format!("using {};\n", ns));
            }
        }

        for using in &self.extra_usings {
            output.push_str(&using_line(using));
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&format!(
            "// Function declarations for calling into the native '{}' library.\n",
            self.library
        ));
    }

    fn write_list(&self, output: &mut String, list: &DeclarationList) {
        output.push_str(&format!("  #region {}\n", list.file_name()));

        for (i, decl) in list.declarations.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            self.write_declaration(output, decl);
        }

        for record in &list.enums {
            output.push('\n');
            for line in format_enum(record) {
                output.push_str(&line);
                output.push('\n');
            }
        }

        output.push_str("  #endregion\n");
    }

    fn write_declaration(&self, output: &mut String, decl: &Declaration) {
        for line in decl.record.text.lines() {
            output.push_str(&format!("  //{}\n", line));
        }

        match decl.binding {
            Binding::FunctionPointer => {
                output.push_str(
                    "  // SKIPPED - function pointer parameter, write this binding by hand\n",
                );
            }
            Binding::Function(ref sig) => self.write_function(output, sig),
        }
    }

    fn write_function(&self, output: &mut String, sig: &ResolvedSignature) {
        output.push_str(&format!(
            "  [DllImport(Import.{}, CallingConvention=CallingConvention.Cdecl )]\n",
            self.library
        ));
        if let Some(marshal) = sig.return_type.marshal {
            output.push_str(&format!(
                "  [return: MarshalAs(UnmanagedType.{})]\n",
                unmanaged_type(marshal)
            ));
        }

        let params: Vec<String> = sig.params.iter().map(render_param).collect();
        output.push_str(&format!(
            "  internal static extern {} {}({});\n",
            sig.return_type.target,
            sig.name,
            params.join(", ")
        ));
    }
}

/// Normalize a caller-supplied import to a full `using` statement.
fn using_line(using: &str) -> String {
    let using = using.trim();
    if using.starts_with("using ") {
        if using.ends_with(';') {
            using.to_string()
        } else {
            format!("{};", using)
        }
    } else {
        format!("using {};", using.trim_end_matches(';'))
    }
}

fn unmanaged_type(marshal: Marshal) -> &'static str {
    match marshal {
        Marshal::Bool => "U1",
        Marshal::WideString => "LPWStr",
    }
}

/// Render one parameter: attribute, passing form, type and name.
fn render_param(param: &ResolvedParam) -> String {
    let mapping = &param.mapping;

    let body = match mapping.passing {
        Passing::Value | Passing::FlatStruct => mapping.target.clone(),
        Passing::Ref => format!("ref {}", mapping.target),
        Passing::ConstArray | Passing::InOutArray => format!("{}[]", mapping.target),
    };

    let attribute = match (mapping.passing, mapping.marshal) {
        (Passing::ConstArray, Some(marshal)) => format!(
            "[MarshalAs(UnmanagedType.LPArray, ArraySubType=UnmanagedType.{})] ",
            unmanaged_type(marshal)
        ),
        (Passing::InOutArray, Some(marshal)) => format!(
            "[MarshalAs(UnmanagedType.LPArray, ArraySubType=UnmanagedType.{}), In, Out] ",
            unmanaged_type(marshal)
        ),
        (Passing::InOutArray, None) => "[In,Out] ".to_string(),
        (_, Some(marshal)) => format!("[MarshalAs(UnmanagedType.{})]", unmanaged_type(marshal)),
        (_, None) => String::new(),
    };

    format!("{}{} {}", attribute, body, param.name)
}
