//! Name derivation for generated artifacts.
//!
//! Every logical function name maps to three generated identifiers: a
//! parameter record type, a return-type alias, and an underlying function.
//! All three live under the [`RESERVED_PREFIX`], so validated user
//! identifiers can never collide with them. The kind segment (`args_`,
//! `type_`, `func_`) keeps the derivations injective across kinds as well:
//! no two logical names, and no two kinds, map to the same identifier.

use crate::error::{Error, Result};

/// Prefix under which all derived identifiers live.
pub const RESERVED_PREFIX: &str = "_keyargs_";

/// The formal parameter bound inside a definition body.
pub const ARGS_PARAM: &str = "args";

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Bool", "_Complex", "_Generic",
    "_Imaginary", "bool", "true", "false",
];

/// Name of the generated parameter record type.
pub fn record_type_name(logical: &str) -> String {
    format!("{RESERVED_PREFIX}args_{logical}")
}

/// Name of the generated return-type alias.
pub fn return_alias_name(logical: &str) -> String {
    format!("{RESERVED_PREFIX}type_{logical}")
}

/// Name of the generated underlying function.
pub fn func_name(logical: &str) -> String {
    format!("{RESERVED_PREFIX}func_{logical}")
}

/// Check whether the given name is a C keyword.
pub fn is_c_keyword(name: &str) -> bool {
    C_KEYWORDS.contains(&name)
}

/// Check whether the given name is a valid C identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a user-supplied logical or field name.
///
/// Rejects malformed identifiers, C keywords, and anything under the
/// reserved prefix.
pub fn validate_identifier(name: &str, context: &'static str) -> Result<()> {
    if !is_valid_identifier(name) {
        return Err(Box::new(Error::InvalidIdentifier {
            name: name.to_string(),
            context,
        }));
    }
    if is_c_keyword(name) {
        return Err(Box::new(Error::ReservedKeyword {
            name: name.to_string(),
            context,
        }));
    }
    if name.starts_with(RESERVED_PREFIX) {
        return Err(Box::new(Error::ReservedPrefix {
            name: name.to_string(),
            context,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_names() {
        assert_eq!(record_type_name("add"), "_keyargs_args_add");
        assert_eq!(return_alias_name("add"), "_keyargs_type_add");
        assert_eq!(func_name("add"), "_keyargs_func_add");
    }

    #[test]
    fn test_derivations_do_not_collide_across_kinds() {
        // "args_y" vs "type_z" style logical names cannot cross kinds.
        assert_ne!(record_type_name("type_x"), return_alias_name("x"));
        assert_ne!(record_type_name("func_x"), func_name("x"));
        assert_ne!(return_alias_name("args_x"), record_type_name("x"));
    }

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("add"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("n2"));
        assert!(!is_valid_identifier("2n"));
        assert!(!is_valid_identifier("with-dash"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_validate_rejects_keywords() {
        assert!(validate_identifier("switch", "function").is_err());
        assert!(validate_identifier("unsigned", "field").is_err());
        assert!(validate_identifier("greet", "function").is_ok());
    }

    #[test]
    fn test_validate_rejects_reserved_prefix() {
        assert!(validate_identifier("_keyargs_args_add", "function").is_err());
        assert!(validate_identifier("_keyargs", "function").is_ok());
    }
}
