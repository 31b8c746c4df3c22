//! Generator for a keyword-argument calling convention in C.
//!
//! C functions take fixed, ordered, required parameter lists. This crate
//! synthesizes the source for a calling convention on top of that: each
//! declared function gets an ordered parameter record type, a return-type
//! alias, and an underlying function taking the record by value, so call
//! sites can mix positional and `.field = value` initializers and omit any
//! field, omitted fields taking their type's zero value.
//!
//! Everything happens at generation time: declarations go through a
//! [`Registry`], call sites are validated against the declared field list,
//! and every contract violation is reported as a diagnostic before any C
//! is emitted.
//!
//! # Module Organization
//!
//! - [`naming`] - Derivation of generated identifiers from logical names
//! - [`types`] / [`value`] - C type and literal models
//! - [`decl`] - Declaration specs ([`FuncSpec`], [`FieldSpec`], [`Linkage`])
//! - [`parse`] - Parsers for the textual declaration and call surfaces
//! - [`registry`] - Symbol table and ordering invariants
//! - [`emit`] - Declaration, clone, definition-opener, and wrapper emission
//! - [`call`] / [`record`] - Call-site construction and record values
//! - [`header`] - Include-guarded header assembly
//! - [`manifest`] - TOML front-end
//!
//! # Example
//!
//! ```
//! use keyargs_codegen::{Call, CType, FuncSpec, Registry, Value};
//!
//! let mut registry = Registry::new();
//! registry.declare(
//!     FuncSpec::new("add", CType::int())
//!         .field("a", CType::int())
//!         .field("b", CType::int()),
//! )?;
//!
//! let call = Call::new("add").arg(Value::int(3)).named("b", Value::int(4));
//! let bound = call.bind(&registry)?;
//! assert_eq!(bound.render(), "_keyargs_func_add((_keyargs_args_add){ 3, .b = 4 })");
//! # Ok::<(), Box<keyargs_codegen::Error>>(())
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod call;
pub mod decl;
pub mod emit;
pub mod error;
pub mod header;
pub mod manifest;
pub mod naming;
pub mod parse;
pub mod record;
pub mod registry;
pub mod types;
pub mod value;

pub use call::{BoundCall, Call, Initializer};
pub use decl::{FieldSpec, FuncSpec, Linkage};
pub use error::{Error, Result};
pub use header::HeaderFile;
pub use manifest::Manifest;
pub use record::{RecordField, RecordValue};
pub use registry::{Entry, EntryKind, Registry, Resolved};
pub use types::{BaseType, CType};
pub use value::Value;
