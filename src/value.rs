//! C literal and expression values.
//!
//! Values carry the meaning of an initializer entry; rendering decides the
//! C spelling. Field-by-field record comparison works over `PartialEq` on
//! this type.

use std::fmt;

/// A value supplied at a call site, or the zero default of an omitted field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer literal.
    Int(i64),
    /// Floating-point literal.
    Float(f64),
    /// Boolean literal.
    Bool(bool),
    /// Character literal.
    Char(char),
    /// String literal (rendered quoted).
    Str(String),
    /// Identifier or raw expression (rendered verbatim).
    Ident(String),
    /// The null pointer.
    Null,
    /// A zeroed aggregate, `{0}`.
    Zeroed,
}

impl Value {
    /// Create an integer value.
    pub fn int(v: i64) -> Self {
        Self::Int(v)
    }

    /// Create a float value.
    pub fn float(v: f64) -> Self {
        Self::Float(v)
    }

    /// Create a boolean value.
    pub fn bool(v: bool) -> Self {
        Self::Bool(v)
    }

    /// Create a character value.
    pub fn char_(v: char) -> Self {
        Self::Char(v)
    }

    /// Create a string literal value.
    pub fn string(v: impl Into<String>) -> Self {
        Self::Str(v.into())
    }

    /// Create an identifier/expression value.
    pub fn ident(v: impl Into<String>) -> Self {
        Self::Ident(v.into())
    }
}

fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out
}

fn escape_char(c: char) -> String {
    match c {
        '\'' => "\\'".to_string(),
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\0' => "\\0".to_string(),
        c => c.to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => {
                if v.fract() == 0.0 && v.is_finite() {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(c) => write!(f, "'{}'", escape_char(*c)),
            Self::Str(s) => write!(f, "\"{}\"", escape_str(s)),
            Self::Ident(s) => write!(f, "{s}"),
            Self::Null => write!(f, "NULL"),
            Self::Zeroed => write!(f, "{{0}}"),
        }
    }
}
