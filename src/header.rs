//! Header assembly for a registry's declarations.
//!
//! Renders every declaration (and clone) of a registry, in declaration
//! order, wrapped in an include guard. Output is a string; writing it
//! anywhere is the caller's business.

use crate::{emit, registry::Registry};

/// An include-guarded C header carrying a registry's declarations.
#[derive(Debug, Clone)]
pub struct HeaderFile {
    name: String,
    wrapper_macros: bool,
}

impl HeaderFile {
    /// Create a header named after the given unit, e.g. `"demo"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wrapper_macros: false,
        }
    }

    /// Also emit the conventional same-named wrapper macro after each
    /// declaration.
    pub fn wrapper_macros(mut self, enabled: bool) -> Self {
        self.wrapper_macros = enabled;
        self
    }

    /// The include-guard symbol, e.g. `DEMO_H`.
    pub fn guard(&self) -> String {
        let sanitized: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{sanitized}_H")
    }

    /// Render the header for the given registry.
    pub fn render(&self, registry: &Registry) -> String {
        let guard = self.guard();
        let mut w = emit::CWriter::new();
        w.line(&format!("#ifndef {guard}"));
        w.line(&format!("#define {guard}"));
        for entry in registry.entries() {
            w.blank();
            let decl = registry.render_entry(entry);
            for line in decl.lines() {
                w.line(line);
            }
            if self.wrapper_macros {
                w.line(&emit::wrapper_macro(&entry.name));
            }
        }
        w.blank();
        w.line(&format!("#endif /* {guard} */"));
        w.build()
    }
}
