//! Enum declaration extraction and reformatting.
//!
//! Only enums with an explicit underlying type are picked up:
//!
//! ```text
//! enum MeshType : int
//! {
//!   mtAnalysis,
//!   mtRender
//! };
//! ```
//!
//! Reformatting is line-based: enumerators lose everything before their
//! first upper-case letter, which drops a shared lower-case prefix such as
//! `mt`. Enumerators without an upper-case letter are kept as they are.

use super::types::{EnumRecord, SourceUnit};

/// Find enum declarations in a source unit.
///
/// An `enum ` occurrence is rejected when a `)` or `{` comes before the next
/// `:`, which is how an enum-typed parameter inside a signature looks. An
/// accepted declaration runs to the next `;`.
pub fn extract_enums(unit: &SourceUnit) -> Vec<EnumRecord> {
    let text = unit.text.as_str();
    let mut enums = Vec::new();

    for (index, _) in text.match_indices("enum ") {
        let find = |c: char| text[index..].find(c).map(|p| index + p);

        let colon = find(':');
        let brace = find('{');
        let paren = find(')');

        // `None` orders before every `Some`, so a missing `)` or `{` also
        // counts as coming first.
        if paren < colon || brace < colon {
            continue;
        }

        let semicolon = find(';');
        let (Some(_), Some(_), Some(end)) = (colon, brace, semicolon) else {
            continue;
        };

        enums.push(EnumRecord {
            text: text[index..=end].to_string(),
            offset: index,
        });
    }

    enums
}

/// Reformat one enum declaration as managed source lines.
///
/// Line 0 carries the declared name, lines 1 and n-1 the braces; the rest
/// are enumerators.
pub fn format_enum(record: &EnumRecord) -> Vec<String> {
    let body = record.text.trim_end_matches(';');
    let lines: Vec<&str> = body.split('\n').collect();
    let last = lines.len() - 1;

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let line = line.trim();
            match i {
                0 => format!("  internal {}", line),
                i if i == 1 || i == last => format!("  {}", line),
                _ => format!("    {}", strip_enumerator_prefix(line)),
            }
        })
        .collect()
}

/// Drop everything before the first upper-case character.
fn strip_enumerator_prefix(entry: &str) -> &str {
    entry
        .char_indices()
        .find(|(_, c)| c.is_uppercase())
        .map_or(entry, |(i, _)| &entry[i..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unit;

    const MESH_TYPE: &str = "enum MeshType : int\n{\n  mtAnalysis,\n  mtRender = 2,\n  mtAny\n};";

    #[test]
    fn test_extract_declared_enum() {
        let text = format!("// types\n{}\n\nRH_C_FUNCTION void F(int a)\n{{}}\n", MESH_TYPE);
        let enums = extract_enums(&unit("on_mesh.cpp", &text));

        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].text, MESH_TYPE);
        assert_eq!(enums[0].offset, 9);
    }

    #[test]
    fn test_extract_skips_enum_parameter() {
        let text = "RH_C_FUNCTION void F(enum MeshType mt, int a)\n{\n  int b = a ? 1 : 2;\n}\n";
        assert!(extract_enums(&unit("on_mesh.cpp", text)).is_empty());
    }

    #[test]
    fn test_extract_enum_without_underlying_type() {
        let text = "enum Plain { A, B };\n";
        assert!(extract_enums(&unit("plain.cpp", text)).is_empty());
    }

    #[test]
    fn test_extract_parameter_then_declaration() {
        let text = format!("RH_C_FUNCTION void F(enum MeshType mt)\n{{}}\n{}\n", MESH_TYPE);
        let enums = extract_enums(&unit("on_mesh.cpp", &text));

        assert_eq!(enums.len(), 1);
        assert!(enums[0].text.starts_with("enum MeshType : int"));
    }

    #[test]
    fn test_format_enum() {
        let record = EnumRecord {
            text: MESH_TYPE.to_string(),
            offset: 0,
        };

        assert_eq!(
            format_enum(&record),
            vec![
                "  internal enum MeshType : int",
                "  {",
                "    Analysis,",
                "    Render = 2,",
                "    Any",
                "  }",
            ]
        );
    }

    #[test]
    fn test_format_keeps_lowercase_only_enumerator() {
        let record = EnumRecord {
            text: "enum Flags : int\n{\n  none,\n  fAll\n};".to_string(),
            offset: 0,
        };

        let lines = format_enum(&record);
        assert_eq!(lines[2], "    none,");
        assert_eq!(lines[3], "    All");
    }

    #[test]
    fn test_format_handles_crlf() {
        let record = EnumRecord {
            text: "enum Side : int\r\n{\r\n  sdLeft,\r\n  sdRight\r\n};".to_string(),
            offset: 0,
        };

        assert_eq!(format_enum(&record)[2], "    Left,");
    }
}
