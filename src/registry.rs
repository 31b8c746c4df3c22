//! Symbol registry for declared keyword-argument functions.
//!
//! The registry is the compile-time symbol table keyed by logical name:
//! declarations, clones, and definition bookkeeping all go through it, and
//! it enforces the ordering invariants (declare before clone, define, or
//! call; one declaration and one definition per name).

use indexmap::IndexMap;

use crate::{
    decl::{FuncSpec, Linkage},
    emit,
    error::{Error, Result},
    naming,
    types::BaseType,
};

/// How a logical name entered the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    /// Declared with its own field list and return type.
    Declared(FuncSpec),
    /// Declared as a clone sharing another name's record layout.
    Clone {
        /// The cloned logical name.
        origin: String,
    },
}

/// One logical name known to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Logical name.
    pub name: String,
    /// Declaration or clone.
    pub kind: EntryKind,
    /// Whether the underlying function's definition has been opened.
    pub defined: bool,
}

impl Entry {
    /// Whether this entry is a clone.
    pub fn is_clone(&self) -> bool {
        matches!(self.kind, EntryKind::Clone { .. })
    }
}

/// A logical name resolved to its shared layout.
///
/// For a clone, `spec` is the origin's spec: the record layout is shared,
/// never copied, and linkage is inherited along with it.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// The logical name that was looked up (a clone keeps its own name).
    pub name: &'a str,
    /// Linkage of the underlying function.
    pub linkage: Linkage,
    /// Field list and return type (the origin's, for clones).
    pub spec: &'a FuncSpec,
}

/// Insertion-ordered registry of declared logical names.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, Entry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a function. Validates the logical and field names and
    /// rejects redeclaration of the logical name within this registry.
    pub fn declare(&mut self, spec: FuncSpec) -> Result<()> {
        naming::validate_identifier(&spec.name, "function")?;
        for field in &spec.fields {
            naming::validate_identifier(&field.name, "field")?;
            if field.ty.base == BaseType::Void && !field.ty.is_pointer() {
                return Err(Box::new(Error::VoidField {
                    function: spec.name.clone(),
                    field: field.name.clone(),
                }));
            }
        }
        for (i, field) in spec.fields.iter().enumerate() {
            if spec.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(Box::new(Error::DuplicateFieldDeclaration {
                    function: spec.name.clone(),
                    field: field.name.clone(),
                }));
            }
        }
        if self.entries.contains_key(&spec.name) {
            return Err(Error::redeclaration(&spec.name));
        }
        let name = spec.name.clone();
        self.entries.insert(
            name.clone(),
            Entry {
                name,
                kind: EntryKind::Declared(spec),
                defined: false,
            },
        );
        Ok(())
    }

    /// Declare `new` as a clone of the already-declared `old`: a fresh
    /// underlying function identity sharing `old`'s record layout, return
    /// type, and linkage.
    pub fn declare_clone(&mut self, new: &str, old: &str) -> Result<()> {
        naming::validate_identifier(new, "function")?;
        if !self.entries.contains_key(old) {
            return Err(Error::undeclared(old));
        }
        if self.entries.contains_key(new) {
            return Err(Error::redeclaration(new));
        }
        self.entries.insert(
            new.to_string(),
            Entry {
                name: new.to_string(),
                kind: EntryKind::Clone {
                    origin: old.to_string(),
                },
                defined: false,
            },
        );
        Ok(())
    }

    /// Look up an entry by logical name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Resolve a logical name to its shared record layout, following clone
    /// links back to the declaring entry.
    pub fn resolve(&self, name: &str) -> Result<Resolved<'_>> {
        let entry = self.entries.get(name).ok_or_else(|| Error::undeclared(name))?;
        let spec = self.origin_spec(entry);
        Ok(Resolved {
            name: &entry.name,
            linkage: spec.linkage,
            spec,
        })
    }

    /// Follow an entry's clone chain to the declaring spec.
    ///
    /// `declare_clone` only admits clones of names already present and
    /// entries are never removed, so the chain always ends at a
    /// declaration.
    fn origin_spec<'a>(&'a self, entry: &'a Entry) -> &'a FuncSpec {
        let mut cursor = entry;
        loop {
            match &cursor.kind {
                EntryKind::Declared(spec) => return spec,
                EntryKind::Clone { origin } => cursor = &self.entries[origin.as_str()],
            }
        }
    }

    /// Open the definition of a name's underlying function with external
    /// linkage, returning the emitted opener. The author follows it with
    /// the function body.
    pub fn define(&mut self, name: &str) -> Result<String> {
        self.open_definition(name, Linkage::External)
    }

    /// Open the definition of an internally linked name's underlying
    /// function.
    pub fn define_static(&mut self, name: &str) -> Result<String> {
        self.open_definition(name, Linkage::Internal)
    }

    /// Open a definition, checking that the requested linkage matches the
    /// declaration and that no definition exists yet.
    pub fn open_definition(&mut self, name: &str, linkage: Linkage) -> Result<String> {
        let resolved = self.resolve(name)?;
        if resolved.linkage != linkage {
            return Err(Box::new(Error::LinkageMismatch {
                name: name.to_string(),
                declared: resolved.linkage.as_str(),
                requested: linkage.as_str(),
            }));
        }
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| Error::undeclared(name))?;
        if entry.defined {
            return Err(Box::new(Error::Redefinition {
                name: name.to_string(),
            }));
        }
        entry.defined = true;
        Ok(emit::definition_opener(name, linkage))
    }

    /// Emit the declaration (or clone) trio for a name.
    pub fn render_declaration(&self, name: &str) -> Result<String> {
        let entry = self.entries.get(name).ok_or_else(|| Error::undeclared(name))?;
        Ok(self.render_entry(entry))
    }

    /// Emit the declaration (or clone) trio for an entry of this registry.
    pub fn render_entry(&self, entry: &Entry) -> String {
        match &entry.kind {
            EntryKind::Declared(spec) => emit::declaration(spec),
            EntryKind::Clone { origin } => {
                emit::clone_declaration(&entry.name, origin, self.origin_spec(entry).linkage)
            }
        }
    }

    /// Iterate entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Number of declared logical names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
