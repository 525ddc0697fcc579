//! Native type to managed type mapping.
//!
//! Resolution is an ordered list of rules evaluated top to bottom; the first
//! rule whose matcher accepts the token decides the mapping. Unknown types
//! never fail: they fall through to an opaque handle or are passed through
//! under their own name.

use std::sync::LazyLock;

use regex::Regex;

use super::dialect::Dialect;
use super::errors::TypeError;
use super::types::{
    Marshal, NativeParam, ParsedSignature, ResolvedParam, ResolvedSignature, TypeMapping,
    OPAQUE_HANDLE,
};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static POINTER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<base>.*?)\s*(?P<stars>(?:\*\s*)*)$").expect("pointer pattern is valid")
});

/// Window-system handle types, passed as opaque handles.
const HANDLE_TYPES: &[&str] = &[
    "HWND", "HBITMAP", "HCURSOR", "HICON", "HBRUSH", "HFONT", "HMENU", "HDC",
];

/// Fixed-layout value structs passed by value.
const FLAT_STRUCTS: &[(&str, &str)] = &[
    ("ON_XFORM_STRUCT", "Transform"),
    ("AR_Transform_Struct", "Transform"),
    ("ON_2DPOINT_STRUCT", "Point2d"),
    ("ON_2FPOINT_STRUCT", "PointF"),
    ("ON_2DVECTOR_STRUCT", "Vector2d"),
    ("ON_INTERVAL_STRUCT", "Interval"),
    ("ON_3FVECTOR_STRUCT", "Vector3f"),
    ("ON_4FVECTOR_STRUCT", "Color4f"),
    ("ON_3FPOINT_STRUCT", "Point3f"),
    ("ON_4FPOINT_STRUCT", "Point4f"),
    ("ON_4DPOINT_STRUCT", "Point4d"),
    ("ON_PLANEEQ_STRUCT", "PlaneEquation"),
    ("ON_PLANE_STRUCT", "Plane"),
    ("ON_CIRCLE_STRUCT", "Circle"),
    ("ON_3DPOINT_STRUCT", "Point3d"),
    ("ON_3DVECTOR_STRUCT", "Vector3d"),
    ("ON_4DVECTOR_STRUCT", "Vector4d"),
    ("ON_LINE_STRUCT", "Line"),
    ("ON_2INTS", "ComponentIndex"),
    ("AR_3fColor", "Point3f"),
    ("AR_4fColor", "Color4f"),
    ("AR_3fPoint", "Point3f"),
    ("AR_3fVector", "Vector3f"),
    ("AR_3dPoint", "Point3d"),
    ("AR_MeshFace", "MeshFace"),
    ("ON_2dPoint", "Point2d"),
    ("ON_3dPoint", "Point3d"),
    ("ON_2dVector", "Vector2d"),
    ("ON_3dVector", "Vector3d"),
];

/// Native primitives spelled differently on the managed side.
const PRIMITIVES: &[(&str, &str)] = &[
    ("unsigned int", "uint"),
    ("unsigned short", "ushort"),
    ("char", "byte"),
    ("ON__INT64", "Int64"),
    ("COleDateTime", "DateTime"),
    ("time_t", "Int64"),
    ("ON_UUID", "Guid"),
];

/// How a single pointer to a known type is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointeeKind {
    /// By reference, or as an array when annotated
    Value,
    /// Like `Value`, with single-byte boolean marshaling
    Bool,
    /// Always by reference, the array annotation is ignored
    RefOnly,
    /// Arrays only; a single pointer stays an opaque handle
    ArrayOnly,
    /// Refused; names the type to use instead
    Disallowed(&'static str),
}

struct Pointee {
    names: &'static [&'static str],
    target: &'static str,
    kind: PointeeKind,
}

const fn pointee(names: &'static [&'static str], target: &'static str, kind: PointeeKind) -> Pointee {
    Pointee {
        names,
        target,
        kind,
    }
}

/// Known pointee types. Looked up by the written name first, then by the
/// scalar-renamed name (so `unsigned int*` finds `uint`).
static POINTEES: &[Pointee] = &[
    pointee(&["int"], "int", PointeeKind::Value),
    pointee(&["uint"], "uint", PointeeKind::Value),
    pointee(&["double"], "double", PointeeKind::Value),
    pointee(&["float"], "float", PointeeKind::Value),
    pointee(&["Guid"], "Guid", PointeeKind::Value),
    pointee(&["short"], "short", PointeeKind::Value),
    pointee(&["Int64"], "Int64", PointeeKind::Value),
    pointee(&["byte", "unsigned char"], "byte", PointeeKind::Value),
    pointee(&["bool"], "bool", PointeeKind::Bool),
    pointee(&["ON_Plane"], "", PointeeKind::Disallowed("ON_PLANE_STRUCT*")),
    pointee(&["ON_Circle"], "", PointeeKind::Disallowed("ON_CIRCLE_STRUCT*")),
    pointee(&["ON_Arc"], "Arc", PointeeKind::Value),
    pointee(&["ON_BoundingBox"], "BoundingBox", PointeeKind::Value),
    pointee(&["ON_Sphere"], "Sphere", PointeeKind::Value),
    pointee(&["ON_Line"], "Line", PointeeKind::Value),
    pointee(&["ON_Interval"], "Interval", PointeeKind::Value),
    pointee(&["ON_Cylinder"], "Cylinder", PointeeKind::Value),
    pointee(&["ON_Cone"], "Cone", PointeeKind::Value),
    pointee(&["ON_Torus"], "Torus", PointeeKind::Value),
    pointee(&["ON_Ellipse"], "Ellipse", PointeeKind::Value),
    pointee(&["ON_Quaternion"], "Quaternion", PointeeKind::Value),
    pointee(&["ON_COMPONENT_INDEX"], "ComponentIndex", PointeeKind::RefOnly),
    pointee(&["ON_Xform", "AR_Transform"], "Transform", PointeeKind::RefOnly),
    pointee(&["ON_2fPoint", "AR_2fPoint"], "Point2f", PointeeKind::RefOnly),
    pointee(&["PointF"], "PointF", PointeeKind::ArrayOnly),
    pointee(&["ON_2dPoint", "AR_2dPoint"], "Point2d", PointeeKind::Value),
    pointee(&["ON_2dVector", "AR_2dVector"], "Vector2d", PointeeKind::Value),
    pointee(&["ON_3dPoint", "AR_3dPoint"], "Point3d", PointeeKind::Value),
    pointee(&["ON_3fPoint", "AR_3fPoint", "Point3f"], "Point3f", PointeeKind::RefOnly),
    pointee(&["ON_4dPoint", "AR_4dPoint"], "Point4d", PointeeKind::Value),
    pointee(&["ON_4fPoint", "AR_4fPoint"], "Color4f", PointeeKind::RefOnly),
    pointee(&["AR_4fColor", "Color4f"], "Color4f", PointeeKind::Value),
    pointee(&["AR_3fColor"], "Point3f", PointeeKind::Value),
    pointee(&["ON_3dVector", "AR_3dVector"], "Vector3d", PointeeKind::Value),
    pointee(&["ON_3fVector", "AR_3fVector", "Vector3f"], "Vector3f", PointeeKind::Value),
    pointee(&["ON_3dRay"], "Ray3d", PointeeKind::RefOnly),
    pointee(&["ON_MeshFace"], "MeshFace", PointeeKind::RefOnly),
    pointee(&["ON_X_EVENT"], "CurveIntersect", PointeeKind::RefOnly),
    pointee(&["AR_MeshFace", "MeshFace"], "MeshFace", PointeeKind::Value),
    pointee(&["Plane"], "Plane", PointeeKind::Value),
    pointee(&["Circle"], "Circle", PointeeKind::RefOnly),
    pointee(&["ON_MESHPOINT_STRUCT"], "MeshPointDataStruct", PointeeKind::RefOnly),
];

/// A native type token split into qualifier, base name and indirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken {
    /// Type text as written, whitespace collapsed
    pub written: String,
    /// Name following an `enum` qualifier
    pub enum_name: Option<String>,
    /// Leading `const` was present
    pub is_const: bool,
    /// Type name without `const` and pointer stars
    pub base: String,
    /// Number of trailing pointer stars
    pub stars: usize,
    /// Parameter carried the array annotation
    pub is_array: bool,
}

impl TypeToken {
    /// Normalize a type as written.
    pub fn parse(text: &str, is_array: bool) -> Self {
        let written = WHITESPACE.replace_all(text.trim(), " ").into_owned();
        let enum_name = written.strip_prefix("enum ").map(|n| n.trim().to_string());

        let (is_const, rest) = match written.strip_prefix("const ") {
            Some(rest) => (true, rest.trim()),
            None => (false, written.as_str()),
        };

        let (base, stars) = match POINTER_SUFFIX.captures(rest) {
            Some(caps) => (
                caps["base"].trim().to_string(),
                caps["stars"].matches('*').count(),
            ),
            None => (rest.to_string(), 0),
        };

        TypeToken {
            enum_name,
            is_const,
            base,
            stars,
            is_array,
            written,
        }
    }
}

/// One entry of a resolution table.
pub struct Rule {
    /// Rule name, for diagnostics and tests
    pub name: &'static str,
    matches: fn(&TypeToken, &Dialect) -> bool,
    resolve: fn(&TypeToken) -> Result<TypeMapping, TypeError>,
}

/// Parameter resolution, first match wins.
static PARAMETER_RULES: &[Rule] = &[
    Rule {
        name: "enum",
        matches: |t, _| t.enum_name.is_some(),
        resolve: |t| Ok(TypeMapping::value(t.enum_name.clone().unwrap_or_default())),
    },
    Rule {
        name: "native_string",
        matches: |t, d| !d.native_string.is_empty() && t.written.contains(&d.native_string),
        resolve: |_| Ok(TypeMapping::value("string").with_marshal(Marshal::WideString)),
    },
    Rule {
        name: "window_handle",
        matches: |t, _| t.stars == 0 && is_handle(&t.base),
        resolve: |_| Ok(TypeMapping::opaque()),
    },
    Rule {
        name: "pointer_to_pointer",
        matches: |t, _| t.stars >= 2,
        resolve: |_| Ok(TypeMapping::by_ref(OPAQUE_HANDLE)),
    },
    Rule {
        name: "pointer",
        matches: |t, _| t.stars == 1,
        resolve: resolve_pointer,
    },
    Rule {
        name: "flat_struct",
        matches: |t, _| lookup(FLAT_STRUCTS, &t.base).is_some(),
        resolve: |t| Ok(TypeMapping::flat_struct(lookup(FLAT_STRUCTS, &t.base).unwrap_or_default())),
    },
    Rule {
        name: "primitive",
        matches: |t, _| lookup(PRIMITIVES, &t.base).is_some(),
        resolve: |t| Ok(TypeMapping::value(lookup(PRIMITIVES, &t.base).unwrap_or_default())),
    },
    Rule {
        name: "pass_through",
        matches: |_, _| true,
        resolve: |t| Ok(pass_through(&t.base)),
    },
];

/// Return type resolution, first match wins.
static RETURN_RULES: &[Rule] = &[
    Rule {
        name: "enum",
        matches: |t, _| t.enum_name.is_some(),
        resolve: |t| Ok(TypeMapping::value(t.enum_name.clone().unwrap_or_default())),
    },
    Rule {
        name: "pointer",
        matches: |t, _| t.stars > 0,
        resolve: |_| Ok(TypeMapping::opaque()),
    },
    Rule {
        name: "window_handle",
        matches: |t, _| t.base == "LPUNKNOWN" || is_handle(&t.base),
        resolve: |_| Ok(TypeMapping::opaque()),
    },
    Rule {
        name: "primitive",
        matches: |t, _| lookup(PRIMITIVES, &t.base).is_some(),
        resolve: |t| Ok(TypeMapping::value(lookup(PRIMITIVES, &t.base).unwrap_or_default())),
    },
    Rule {
        name: "pass_through",
        matches: |_, _| true,
        resolve: |t| Ok(pass_through(&t.base)),
    },
];

fn is_handle(base: &str) -> bool {
    HANDLE_TYPES.iter().any(|h| *h == base)
}

fn lookup(table: &[(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table.iter().find(|(native, _)| *native == name).map(|(_, managed)| *managed)
}

fn pass_through(base: &str) -> TypeMapping {
    if base == "bool" {
        TypeMapping::value("bool").with_marshal(Marshal::Bool)
    } else {
        TypeMapping::value(base)
    }
}

/// Managed name of a non-pointer type.
fn scalar_name(base: &str) -> &str {
    lookup(FLAT_STRUCTS, base)
        .or_else(|| lookup(PRIMITIVES, base))
        .unwrap_or(base)
}

fn find_pointee(name: &str) -> Option<&'static Pointee> {
    POINTEES.iter().find(|p| p.names.iter().any(|n| *n == name))
}

/// Resolve a type with exactly one pointer star.
fn resolve_pointer(t: &TypeToken) -> Result<TypeMapping, TypeError> {
    let Some(pointee) = find_pointee(&t.base).or_else(|| find_pointee(scalar_name(&t.base)))
    else {
        return Ok(TypeMapping::opaque());
    };

    let mapping = match pointee.kind {
        PointeeKind::Disallowed(replacement) => {
            return Err(TypeError::Disallowed {
                token: t.written.clone(),
                replacement,
            });
        }
        PointeeKind::RefOnly => TypeMapping::by_ref(pointee.target),
        PointeeKind::ArrayOnly if t.is_array => TypeMapping::array(pointee.target, t.is_const),
        PointeeKind::ArrayOnly => TypeMapping::opaque(),
        PointeeKind::Value | PointeeKind::Bool if t.is_array => {
            TypeMapping::array(pointee.target, t.is_const)
        }
        PointeeKind::Value | PointeeKind::Bool => TypeMapping::by_ref(pointee.target),
    };

    if pointee.kind == PointeeKind::Bool {
        Ok(mapping.with_marshal(Marshal::Bool))
    } else {
        Ok(mapping)
    }
}

/// Maps native types to their managed representation.
pub struct TypeMapper<'a> {
    dialect: &'a Dialect,
}

impl<'a> TypeMapper<'a> {
    /// Create a mapper for the given dialect.
    pub fn new(dialect: &'a Dialect) -> Self {
        TypeMapper { dialect }
    }

    /// The parameter rule that handles a token.
    pub fn parameter_rule(&self, token: &TypeToken) -> &'static Rule {
        first_match(PARAMETER_RULES, token, self.dialect)
    }

    /// The return rule that handles a token.
    pub fn return_rule(&self, token: &TypeToken) -> &'static Rule {
        first_match(RETURN_RULES, token, self.dialect)
    }

    /// Resolve a parameter type.
    pub fn resolve_param(&self, param: &NativeParam) -> Result<TypeMapping, TypeError> {
        let token = TypeToken::parse(&param.type_token, param.is_array);
        (self.parameter_rule(&token).resolve)(&token)
    }

    /// Resolve a return type.
    pub fn resolve_return(&self, return_type: &str) -> Result<TypeMapping, TypeError> {
        let token = TypeToken::parse(return_type, false);
        (self.return_rule(&token).resolve)(&token)
    }

    /// Resolve every type in a signature.
    pub fn resolve_signature(&self, sig: &ParsedSignature) -> Result<ResolvedSignature, TypeError> {
        let return_type = self.resolve_return(&sig.return_type)?;
        let params = sig
            .params
            .iter()
            .map(|p| {
                Ok(ResolvedParam {
                    name: p.name.clone(),
                    mapping: self.resolve_param(p)?,
                })
            })
            .collect::<Result<Vec<_>, TypeError>>()?;

        Ok(ResolvedSignature {
            name: sig.name.clone(),
            return_type,
            params,
        })
    }
}

fn first_match(rules: &'static [Rule], token: &TypeToken, dialect: &Dialect) -> &'static Rule {
    rules
        .iter()
        .find(|rule| (rule.matches)(token, dialect))
        .unwrap_or(&rules[rules.len() - 1])
}
