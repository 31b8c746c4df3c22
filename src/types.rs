//! C type model for parameter fields and return types.
//!
//! Types are represented semantically (base type, pointer depth, const
//! qualifier) so the generator can render declarators and derive the
//! zero value an omitted field receives.

use std::fmt;

use crate::value::Value;

/// Base of a C type, before pointer and qualifier decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    /// `void` (return types and pointer targets only).
    Void,
    /// `bool`.
    Bool,
    /// `char`.
    Char,
    /// `int`.
    Int,
    /// `unsigned`.
    UInt,
    /// `long`.
    Long,
    /// `unsigned long`.
    ULong,
    /// `float`.
    Float,
    /// `double`.
    Double,
    /// `size_t`.
    SizeT,
    /// A struct, union, or typedef name.
    Named(String),
}

impl BaseType {
    /// Canonical C spelling of this base type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int => "int",
            Self::UInt => "unsigned",
            Self::Long => "long",
            Self::ULong => "unsigned long",
            Self::Float => "float",
            Self::Double => "double",
            Self::SizeT => "size_t",
            Self::Named(name) => name,
        }
    }

    /// Whether this base is an integer or floating-point type.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Char | Self::Int | Self::UInt | Self::Long | Self::ULong | Self::Float
                | Self::Double
                | Self::SizeT
        )
    }
}

/// A C type: base type plus pointer depth and const qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CType {
    /// Base type.
    pub base: BaseType,
    /// Number of pointer levels (`*`).
    pub pointers: usize,
    /// Whether the base is const-qualified.
    pub is_const: bool,
}

impl CType {
    /// Create an unqualified, non-pointer type.
    pub fn new(base: BaseType) -> Self {
        Self {
            base,
            pointers: 0,
            is_const: false,
        }
    }

    /// Add one pointer level.
    pub fn pointer(mut self) -> Self {
        self.pointers += 1;
        self
    }

    /// Const-qualify the base type.
    pub fn const_(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Convenience: `void`.
    pub fn void() -> Self {
        Self::new(BaseType::Void)
    }

    /// Convenience: `bool`.
    pub fn bool_() -> Self {
        Self::new(BaseType::Bool)
    }

    /// Convenience: `char`.
    pub fn char_() -> Self {
        Self::new(BaseType::Char)
    }

    /// Convenience: `int`.
    pub fn int() -> Self {
        Self::new(BaseType::Int)
    }

    /// Convenience: `float`.
    pub fn float() -> Self {
        Self::new(BaseType::Float)
    }

    /// Convenience: `double`.
    pub fn double() -> Self {
        Self::new(BaseType::Double)
    }

    /// Convenience: `size_t`.
    pub fn size_t() -> Self {
        Self::new(BaseType::SizeT)
    }

    /// Convenience: a struct/typedef name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(BaseType::Named(name.into()))
    }

    /// Convenience: `const char *`.
    pub fn c_string() -> Self {
        Self::char_().const_().pointer()
    }

    /// Whether this type is a pointer.
    pub fn is_pointer(&self) -> bool {
        self.pointers > 0
    }

    /// Render a declarator for the given identifier, e.g. `const char *name`.
    pub fn declare(&self, ident: &str) -> String {
        if self.is_pointer() {
            format!("{self}{ident}")
        } else {
            format!("{self} {ident}")
        }
    }

    /// The value an omitted field of this type receives: numeric zero,
    /// `false`, the null pointer, or a zeroed aggregate.
    pub fn zero_value(&self) -> Value {
        if self.is_pointer() {
            return Value::Null;
        }
        match &self.base {
            BaseType::Float | BaseType::Double => Value::Float(0.0),
            BaseType::Bool => Value::Bool(false),
            base if base.is_numeric() => Value::Int(0),
            _ => Value::Zeroed,
        }
    }
}

impl fmt::Display for CType {
    /// Formats as `int`, `const char *`, `struct point **`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{}", self.base.as_str())?;
        if self.pointers > 0 {
            write!(f, " {}", "*".repeat(self.pointers))?;
        }
        Ok(())
    }
}
