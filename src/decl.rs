//! Declaration specs for keyword-argument functions.
//!
//! A [`FuncSpec`] is the input to the declaration generator: a logical name,
//! a return type, and an ordered field list. Field order is significant for
//! positional initialization; field names are significant for designated
//! initialization.

use serde::Deserialize;

use crate::{
    error::Result,
    parse::{parse_field_list, parse_type},
    types::CType,
};

/// Linkage of the underlying function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Visible and linkable from other translation units.
    #[default]
    External,
    /// Confined to the defining translation unit (`static`).
    Internal,
}

impl Linkage {
    /// Human-readable name, used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::External => "external",
            Self::Internal => "internal",
        }
    }

    /// Whether this is internal linkage.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// A field of the parameter record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: CType,
}

impl FieldSpec {
    /// Create a new field.
    pub fn new(name: impl Into<String>, ty: CType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A declarative specification for a keyword-argument function.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncSpec {
    /// Logical name, unique within a registry.
    pub name: String,
    /// Return type.
    pub returns: CType,
    /// Ordered field list of the parameter record. May be empty.
    pub fields: Vec<FieldSpec>,
    /// Linkage of the underlying function.
    pub linkage: Linkage,
}

impl FuncSpec {
    /// Create a new external-linkage spec with no fields.
    pub fn new(name: impl Into<String>, returns: CType) -> Self {
        Self {
            name: name.into(),
            returns,
            fields: Vec::new(),
            linkage: Linkage::External,
        }
    }

    /// Add a field.
    pub fn field(mut self, name: impl Into<String>, ty: CType) -> Self {
        self.fields.push(FieldSpec::new(name, ty));
        self
    }

    /// Add multiple fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Give the underlying function internal linkage.
    pub fn internal(mut self) -> Self {
        self.linkage = Linkage::Internal;
        self
    }

    /// Build a spec from the textual declaration surface: a return type,
    /// a logical name, and a semicolon-terminated field list such as
    /// `"int a; int b;"` (empty string for a zero-field record).
    pub fn parse(returns: &str, name: &str, field_list: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            returns: parse_type(returns)?,
            fields: parse_field_list(field_list)?,
            linkage: Linkage::External,
        })
    }

    /// Number of declared fields.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Check if this spec has any fields.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Find a field by name.
    pub fn field_named(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find a field's position by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}
