//! Signature parser for scanned declarations.
//!
//! Splits `ret name(type a, type b)` into its return type, function name and
//! ordered parameters. This is not a C++ parser: parameters are split on
//! every comma, so a type containing a comma is not supported.

use super::dialect::Dialect;
use super::errors::SignatureError;
use super::types::{NativeParam, ParsedSignature};

/// Parser for one declaration record.
pub struct SignatureParser<'a> {
    dialect: &'a Dialect,
}

impl<'a> SignatureParser<'a> {
    /// Create a parser for the given dialect.
    pub fn new(dialect: &'a Dialect) -> Self {
        SignatureParser { dialect }
    }

    /// Whether the parameter list contains a function pointer.
    pub fn has_function_pointer(&self, decl: &str) -> bool {
        let marker = self.dialect.function_pointer.as_str();
        if marker.is_empty() {
            return false;
        }
        let Some(open) = decl.find('(') else {
            return false;
        };
        let close = decl[open..].find(')').map_or(decl.len(), |p| open + p);
        decl[open..close].contains(marker)
    }

    /// Parse a declaration into a signature.
    pub fn parse(&self, decl: &str) -> Result<ParsedSignature, SignatureError> {
        let open = decl.find('(').ok_or(SignatureError::MissingParenthesis)?;
        let close = decl[open..]
            .find(')')
            .map(|p| open + p)
            .ok_or(SignatureError::Unterminated)?;

        let head = decl[..open].trim_end();
        let name_start = last_token_start(head);
        let (star_prefix, name) = split_stars(&head[name_start..]);
        if name.is_empty() {
            return Err(SignatureError::MissingFunctionName);
        }

        let mut return_type = head[..name_start].trim().to_string();
        return_type.push_str(star_prefix);
        let return_type = return_type
            .strip_prefix("const ")
            .map(str::trim)
            .unwrap_or(return_type.as_str())
            .to_string();
        if return_type.is_empty() {
            return Err(SignatureError::MissingReturnType {
                name: name.to_string(),
            });
        }

        let params = self.parse_params(&decl[open + 1..close])?;

        Ok(ParsedSignature {
            return_type,
            name: name.to_string(),
            params,
        })
    }

    /// Parse the text between the parentheses.
    fn parse_params(&self, params_str: &str) -> Result<Vec<NativeParam>, SignatureError> {
        let params_str = params_str.trim();
        if params_str.is_empty() || params_str == "void" {
            return Ok(Vec::new());
        }

        params_str
            .split(',')
            .map(|fragment| self.parse_param(fragment.trim()))
            .collect()
    }

    /// Split one fragment into type and trailing name.
    fn parse_param(&self, fragment: &str) -> Result<NativeParam, SignatureError> {
        let malformed = || SignatureError::MalformedParameter {
            fragment: fragment.to_string(),
        };

        let name_start = last_token_start(fragment);
        if name_start == 0 {
            return Err(malformed());
        }

        let (star_prefix, name) = split_stars(&fragment[name_start..]);
        if name.is_empty() {
            return Err(malformed());
        }

        let mut type_text = fragment[..name_start].trim().to_string();
        type_text.push_str(star_prefix);

        let (type_token, is_array) = self.dialect.strip_array(&type_text);
        if type_token.is_empty() {
            return Err(malformed());
        }

        Ok(NativeParam::new(type_token, name).with_array(is_array))
    }
}

/// Byte offset where the last whitespace-delimited token starts.
fn last_token_start(s: &str) -> usize {
    s.char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8())
}

/// Split leading pointer stars off a name written as `*name`.
fn split_stars(token: &str) -> (&str, &str) {
    let name = token.trim_start_matches('*');
    (&token[..token.len() - name.len()], name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(decl: &str) -> Result<ParsedSignature, SignatureError> {
        let dialect = Dialect::default();
        SignatureParser::new(&dialect).parse(decl)
    }

    #[test]
    fn test_parse_simple_signature() {
        let sig = parse("int ON_Add(int a, int b)").unwrap();

        assert_eq!(sig.return_type, "int");
        assert_eq!(sig.name, "ON_Add");
        assert_eq!(
            sig.params,
            vec![NativeParam::new("int", "a"), NativeParam::new("int", "b")]
        );
    }

    #[test]
    fn test_parse_empty_params() {
        let sig = parse("void ON_Begin()").unwrap();
        assert!(sig.params.is_empty());

        let sig = parse("void ON_Begin( void )").unwrap();
        assert!(sig.params.is_empty());
    }

    #[test]
    fn test_parse_preserves_param_order() {
        let sig = parse("void F(double z, int y, bool x, ON_UUID w)").unwrap();
        let names: Vec<_> = sig.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["z", "y", "x", "w"]);
    }

    #[test]
    fn test_parse_strips_const_return() {
        let sig = parse("const ON_Mesh* ON_Mesh_Get(int index)").unwrap();
        assert_eq!(sig.return_type, "ON_Mesh*");
        assert_eq!(sig.name, "ON_Mesh_Get");
    }

    #[test]
    fn test_parse_space_before_paren() {
        let sig = parse("unsigned int ON_Count (const ON_Mesh* pMesh)").unwrap();
        assert_eq!(sig.return_type, "unsigned int");
        assert_eq!(sig.name, "ON_Count");
        assert_eq!(sig.params[0].type_token, "const ON_Mesh*");
    }

    #[test]
    fn test_parse_array_annotation() {
        let sig = parse("int F(int count, /*ARRAY*/const ON_3dPoint* pts)").unwrap();

        assert!(!sig.params[0].is_array);
        assert!(sig.params[1].is_array);
        assert_eq!(sig.params[1].type_token, "const ON_3dPoint*");
        assert_eq!(sig.params[1].name, "pts");
    }

    #[test]
    fn test_parse_multiline() {
        let sig = parse("bool ON_Mesh_Compact(\n  ON_Mesh* pMesh,\n  int flags)").unwrap();
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.params[0].type_token, "ON_Mesh*");
        assert_eq!(sig.params[1].name, "flags");
    }

    #[test]
    fn test_parse_star_attached_to_name() {
        let sig = parse("ON_Brep *ON_Brep_New(double *tolerance)").unwrap();
        assert_eq!(sig.return_type, "ON_Brep*");
        assert_eq!(sig.name, "ON_Brep_New");
        assert_eq!(sig.params[0], NativeParam::new("double*", "tolerance"));
    }

    #[test]
    fn test_parse_unnamed_param_fails() {
        let err = parse("void F(int a, int)").unwrap_err();
        assert_eq!(
            err,
            SignatureError::MalformedParameter {
                fragment: "int".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_return_type_fails() {
        assert!(matches!(
            parse("Orphan(int a)"),
            Err(SignatureError::MissingReturnType { .. })
        ));
        assert_eq!(parse("int Missing"), Err(SignatureError::MissingParenthesis));
    }

    #[test]
    fn test_function_pointer_detection() {
        let dialect = Dialect::default();
        let parser = SignatureParser::new(&dialect);

        assert!(parser.has_function_pointer("void SetCallback(CONDUITPROC cb, int id)"));
        assert!(!parser.has_function_pointer("PROCESS_RESULT Process(int id)"));
    }
}
