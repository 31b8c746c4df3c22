//! TOML manifest describing a set of keyword-argument functions.
//!
//! ```toml
//! [functions.add]
//! returns = "int"
//! args = "int a; int b;"
//!
//! [functions.accumulate]
//! clone_of = "add"
//!
//! [functions.helper]
//! returns = "void"
//! linkage = "internal"
//! args = "const char *message; int level;"
//! ```
//!
//! Entries are processed in manifest order, so a clone must appear after
//! the function it clones.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    decl::{FuncSpec, Linkage},
    error::{Error, Result},
    registry::Registry,
};

/// Root schema for a keyargs manifest.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Declared functions, in manifest order.
    #[serde(default)]
    pub functions: IndexMap<String, FunctionEntry>,
}

/// One `[functions.<name>]` table.
#[derive(Debug, Deserialize)]
pub struct FunctionEntry {
    /// Return type, e.g. `"int"`. Required unless `clone_of` is set.
    #[serde(default)]
    pub returns: Option<String>,

    /// Semicolon-terminated field list, e.g. `"int a; int b;"`.
    #[serde(default)]
    pub args: Option<String>,

    /// Linkage of the underlying function.
    #[serde(default)]
    pub linkage: Linkage,

    /// Declare this entry as a clone of an earlier one.
    #[serde(default)]
    pub clone_of: Option<String>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "keyargs.toml")
    }
}

impl Manifest {
    /// Parse a manifest from a string with a custom filename for error
    /// reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }

    /// Declare every entry into a fresh registry, in manifest order.
    pub fn build_registry(&self) -> Result<Registry> {
        let mut registry = Registry::new();
        for (name, entry) in &self.functions {
            if let Some(origin) = &entry.clone_of {
                if entry.returns.is_some() || entry.args.is_some() {
                    return Err(Box::new(Error::ManifestEntry {
                        function: name.clone(),
                        message: "a clone_of entry may not also set returns or args".into(),
                    }));
                }
                registry.declare_clone(name, origin)?;
                continue;
            }
            let Some(returns) = &entry.returns else {
                return Err(Box::new(Error::ManifestEntry {
                    function: name.clone(),
                    message: "missing 'returns'".into(),
                }));
            };
            let args = entry.args.as_deref().unwrap_or_default();
            let mut spec = FuncSpec::parse(returns, name, args)?;
            spec.linkage = entry.linkage;
            registry.declare(spec)?;
        }
        Ok(registry)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    toml::from_str(content).map_err(|e| Error::manifest_parse(e, content, filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decl::Linkage, types::CType};

    #[test]
    fn test_parse_and_build() {
        let manifest: Manifest = r#"
            [functions.add]
            returns = "int"
            args = "int a; int b;"

            [functions.accumulate]
            clone_of = "add"

            [functions.helper]
            returns = "void"
            linkage = "internal"
            args = "const char *message; int level;"
        "#
        .parse()
        .unwrap();

        let registry = manifest.build_registry().unwrap();
        assert_eq!(registry.len(), 3);

        let add = registry.resolve("add").unwrap();
        assert_eq!(add.spec.returns, CType::int());
        assert_eq!(add.spec.arity(), 2);

        let clone = registry.resolve("accumulate").unwrap();
        assert_eq!(clone.spec.name, "add");

        let helper = registry.resolve("helper").unwrap();
        assert_eq!(helper.linkage, Linkage::Internal);
        assert_eq!(helper.spec.fields[0].ty, CType::c_string());
    }

    #[test]
    fn test_entry_without_fields() {
        let manifest: Manifest = "[functions.tick]\nreturns = \"void\"\n".parse().unwrap();
        let registry = manifest.build_registry().unwrap();
        assert!(!registry.resolve("tick").unwrap().spec.has_fields());
    }

    #[test]
    fn test_clone_must_follow_origin() {
        let manifest: Manifest = r#"
            [functions.accumulate]
            clone_of = "add"

            [functions.add]
            returns = "int"
            args = "int a; int b;"
        "#
        .parse()
        .unwrap();
        let err = manifest.build_registry().unwrap_err();
        assert!(matches!(*err, Error::Undeclared { .. }));
    }

    #[test]
    fn test_clone_entry_rejects_own_signature() {
        let manifest: Manifest = r#"
            [functions.add]
            returns = "int"
            args = "int a;"

            [functions.accumulate]
            clone_of = "add"
            returns = "int"
        "#
        .parse()
        .unwrap();
        let err = manifest.build_registry().unwrap_err();
        assert!(matches!(*err, Error::ManifestEntry { .. }));
    }

    #[test]
    fn test_missing_returns() {
        let manifest: Manifest = "[functions.f]\nargs = \"int a;\"\n".parse().unwrap();
        let err = manifest.build_registry().unwrap_err();
        assert!(matches!(*err, Error::ManifestEntry { .. }));
    }

    #[test]
    fn test_bad_toml() {
        let err = Manifest::from_str("functions = 3").unwrap_err();
        assert!(matches!(*err, Error::ManifestParse { .. }));
    }
}
