//! The transient record value a call constructs.
//!
//! A [`RecordValue`] holds every declared field in declaration order, with
//! the supplied value or the type's zero value. It does not record whether
//! a field was supplied or defaulted; an explicit zero and an omission are
//! indistinguishable, as in the underlying initialization rule. Fields that
//! need tri-state semantics should use a pointer type (`NULL` = absent).

use crate::value::Value;

/// One field of a constructed record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    /// Field name.
    pub name: String,
    /// Supplied value, or the field type's zero value.
    pub value: Value,
}

/// A fully constructed call-site record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    type_name: String,
    fields: Vec<RecordField>,
}

impl RecordValue {
    pub(crate) fn new(type_name: String, fields: Vec<RecordField>) -> Self {
        Self { type_name, fields }
    }

    /// The generated record type this value instantiates.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Look up a field's value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// Field-by-field equality, ignoring the record type name. Two logical
    /// names sharing a layout (a clone and its origin) construct layout-equal
    /// records from the same initializers.
    pub fn layout_eq(&self, other: &RecordValue) -> bool {
        self.fields == other.fields
    }
}
