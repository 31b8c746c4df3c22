//! Call-site construction: record values and invocation expressions.
//!
//! A [`Call`] carries a logical name and an ordered initializer list. Binding
//! it against a registry validates the list against the declared field list
//! and produces a [`BoundCall`]: the full record value (omitted fields at
//! their zero value) plus the emitted invocation expression.

use crate::{
    error::{Error, Result},
    naming,
    parse::parse_initializers,
    record::{RecordField, RecordValue},
    registry::Registry,
    value::Value,
};

/// One entry of a call's initializer list.
#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    /// A bare value, consumed in field-declaration order.
    Positional(Value),
    /// A `.field = value` entry, order-independent.
    Designated {
        /// Target field name.
        field: String,
        /// Supplied value.
        value: Value,
    },
}

impl Initializer {
    /// Create a positional entry.
    pub fn positional(value: Value) -> Self {
        Self::Positional(value)
    }

    /// Create a designated entry.
    pub fn designated(field: impl Into<String>, value: Value) -> Self {
        Self::Designated {
            field: field.into(),
            value,
        }
    }
}

/// A call to a declared logical name, not yet checked against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    name: String,
    inits: Vec<Initializer>,
}

impl Call {
    /// Start a call with an empty initializer list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inits: Vec::new(),
        }
    }

    /// Add a positional value.
    pub fn arg(mut self, value: Value) -> Self {
        self.inits.push(Initializer::positional(value));
        self
    }

    /// Add a designated value.
    pub fn named(mut self, field: impl Into<String>, value: Value) -> Self {
        self.inits.push(Initializer::designated(field, value));
        self
    }

    /// Build a call from the textual call surface, e.g.
    /// `Call::parse("add", "3, .b = 5")`.
    pub fn parse(name: &str, initializers: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            inits: parse_initializers(initializers)?,
        })
    }

    /// The logical name being called.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The initializer list, in the order given.
    pub fn initializers(&self) -> &[Initializer] {
        &self.inits
    }

    /// Validate this call against the registry and construct the record.
    ///
    /// Positional entries must precede designated ones; a field may be set
    /// at most once; positional entries may not outnumber the declared
    /// fields. Binding reads the registry without changing it.
    pub fn bind(&self, registry: &Registry) -> Result<BoundCall> {
        let resolved = registry.resolve(&self.name)?;
        let fields = &resolved.spec.fields;

        let positional_count = self
            .inits
            .iter()
            .filter(|i| matches!(i, Initializer::Positional(_)))
            .count();
        if positional_count > fields.len() {
            return Err(Box::new(Error::TooManyPositional {
                function: self.name.clone(),
                arity: fields.len(),
                given: positional_count,
            }));
        }

        let mut supplied: Vec<Option<Value>> = vec![None; fields.len()];
        let mut cursor = 0;
        let mut seen_designated = false;
        for init in &self.inits {
            match init {
                Initializer::Positional(value) => {
                    if seen_designated {
                        return Err(Box::new(Error::PositionalAfterDesignated {
                            function: self.name.clone(),
                        }));
                    }
                    supplied[cursor] = Some(value.clone());
                    cursor += 1;
                }
                Initializer::Designated { field, value } => {
                    seen_designated = true;
                    let Some(index) = resolved.spec.field_index(field) else {
                        return Err(Box::new(Error::UnknownField {
                            function: self.name.clone(),
                            field: field.clone(),
                        }));
                    };
                    if supplied[index].is_some() {
                        return Err(Box::new(Error::DuplicateInitializer {
                            function: self.name.clone(),
                            field: field.clone(),
                        }));
                    }
                    supplied[index] = Some(value.clone());
                }
            }
        }

        let record_type = naming::record_type_name(&self.name);
        let record_fields = fields
            .iter()
            .zip(&supplied)
            .map(|(field, value)| RecordField {
                name: field.name.clone(),
                value: value.clone().unwrap_or_else(|| field.ty.zero_value()),
            })
            .collect();

        Ok(BoundCall {
            func: naming::func_name(&self.name),
            record_type: record_type.clone(),
            record: RecordValue::new(record_type, record_fields),
            inits: self.inits.clone(),
        })
    }
}

/// A call checked against its declaration, ready to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCall {
    func: String,
    record_type: String,
    record: RecordValue,
    inits: Vec<Initializer>,
}

impl BoundCall {
    /// The underlying function being invoked.
    pub fn func_name(&self) -> &str {
        &self.func
    }

    /// The constructed record, every field at its supplied or zero value.
    pub fn record(&self) -> &RecordValue {
        &self.record
    }

    /// Emit the invocation expression. Only supplied initializers appear in
    /// the compound literal; the host language zero-fills the rest.
    pub fn render(&self) -> String {
        let inits: Vec<String> = self
            .inits
            .iter()
            .map(|init| match init {
                Initializer::Positional(value) => value.to_string(),
                Initializer::Designated { field, value } => format!(".{field} = {value}"),
            })
            .collect();
        format!(
            "{}(({}){{ {}}})",
            self.func,
            self.record_type,
            if inits.is_empty() {
                String::new()
            } else {
                format!("{} ", inits.join(", "))
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decl::FuncSpec, types::CType};

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .declare(
                FuncSpec::new("add", CType::int())
                    .field("a", CType::int())
                    .field("b", CType::int()),
            )
            .unwrap();
        registry
            .declare(
                FuncSpec::new("greet", CType::void())
                    .field("name", CType::c_string())
                    .field("times", CType::int()),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_positional_call() {
        let bound = Call::new("add")
            .arg(Value::int(3))
            .arg(Value::int(4))
            .bind(&registry())
            .unwrap();
        assert_eq!(
            bound.render(),
            "_keyargs_func_add((_keyargs_args_add){ 3, 4 })"
        );
        assert_eq!(bound.record().get("a"), Some(&Value::int(3)));
        assert_eq!(bound.record().get("b"), Some(&Value::int(4)));
    }

    #[test]
    fn test_designated_call_order_independent() {
        let bound = Call::new("add")
            .named("b", Value::int(5))
            .named("a", Value::int(2))
            .bind(&registry())
            .unwrap();
        assert_eq!(
            bound.render(),
            "_keyargs_func_add((_keyargs_args_add){ .b = 5, .a = 2 })"
        );
        assert_eq!(bound.record().get("a"), Some(&Value::int(2)));
        assert_eq!(bound.record().get("b"), Some(&Value::int(5)));
    }

    #[test]
    fn test_omitted_fields_default_to_zero() {
        let bound = Call::new("greet")
            .named("name", Value::string("x"))
            .bind(&registry())
            .unwrap();
        assert_eq!(bound.record().get("times"), Some(&Value::int(0)));
        assert_eq!(
            bound.render(),
            "_keyargs_func_greet((_keyargs_args_greet){ .name = \"x\" })"
        );

        let empty = Call::new("greet").bind(&registry()).unwrap();
        assert_eq!(empty.record().get("name"), Some(&Value::Null));
        assert_eq!(empty.render(), "_keyargs_func_greet((_keyargs_args_greet){ })");
    }

    #[test]
    fn test_mixed_call() {
        let bound = Call::new("add")
            .arg(Value::int(3))
            .named("b", Value::int(5))
            .bind(&registry())
            .unwrap();
        assert_eq!(
            bound.render(),
            "_keyargs_func_add((_keyargs_args_add){ 3, .b = 5 })"
        );
        assert_eq!(bound.record().get("a"), Some(&Value::int(3)));
    }

    #[test]
    fn test_parse_surface() {
        let bound = Call::parse("add", "3, .b = 5")
            .unwrap()
            .bind(&registry())
            .unwrap();
        assert_eq!(bound.record().get("b"), Some(&Value::int(5)));
    }

    #[test]
    fn test_parse_surface_preserves_non_ascii() {
        let bound = Call::parse("greet", ".name = \"café\"")
            .unwrap()
            .bind(&registry())
            .unwrap();
        assert_eq!(bound.record().get("name"), Some(&Value::string("café")));
        assert_eq!(
            bound.render(),
            "_keyargs_func_greet((_keyargs_args_greet){ .name = \"café\" })"
        );
    }

    #[test]
    fn test_unknown_field() {
        let err = Call::new("add")
            .named("c", Value::int(1))
            .bind(&registry())
            .unwrap_err();
        assert!(matches!(*err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_duplicate_initializer() {
        // positionally and by designation
        let err = Call::new("add")
            .arg(Value::int(1))
            .named("a", Value::int(2))
            .bind(&registry())
            .unwrap_err();
        assert!(matches!(*err, Error::DuplicateInitializer { .. }));

        // designated twice
        let err = Call::new("add")
            .named("b", Value::int(1))
            .named("b", Value::int(2))
            .bind(&registry())
            .unwrap_err();
        assert!(matches!(*err, Error::DuplicateInitializer { .. }));
    }

    #[test]
    fn test_too_many_positional() {
        let err = Call::new("add")
            .arg(Value::int(1))
            .arg(Value::int(2))
            .arg(Value::int(3))
            .bind(&registry())
            .unwrap_err();
        assert!(matches!(*err, Error::TooManyPositional { .. }));
    }

    #[test]
    fn test_positional_after_designated() {
        let err = Call::new("add")
            .named("a", Value::int(1))
            .arg(Value::int(2))
            .bind(&registry())
            .unwrap_err();
        assert!(matches!(*err, Error::PositionalAfterDesignated { .. }));
    }

    #[test]
    fn test_call_undeclared() {
        let err = Call::new("nope").bind(&registry()).unwrap_err();
        assert!(matches!(*err, Error::Undeclared { .. }));
    }

    #[test]
    fn test_binding_is_repeatable() {
        let registry = registry();
        let call = Call::parse("add", ".a = 10").unwrap();
        let first = call.bind(&registry).unwrap();
        let second = call.bind(&registry).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.render(), second.render());
    }
}
