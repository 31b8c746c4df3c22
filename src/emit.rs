//! Emission of the generated C artifacts.
//!
//! Each function here is one generation rule: the declaration trio, the
//! clone trio, the definition opener, and the ergonomic wrapper macro. The
//! internal-linkage variants differ only in the `static` storage class on
//! the underlying function.

use crate::{
    decl::{FuncSpec, Linkage},
    naming::{self, ARGS_PARAM},
};

/// Small fluent writer for indented C output.
#[derive(Debug, Clone, Default)]
pub struct CWriter {
    indent_level: usize,
    buffer: String,
}

impl CWriter {
    /// Create an empty writer with 4-space indentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line of code with current indentation.
    pub fn line(&mut self, s: &str) -> &mut Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str("    ");
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Consume the writer and return the built code.
    pub fn build(self) -> String {
        self.buffer
    }
}

fn storage_class(linkage: Linkage) -> &'static str {
    if linkage.is_internal() { "static " } else { "" }
}

/// Emit the declaration trio for a spec: the parameter record type, the
/// return-type alias, and the forward signature of the underlying function.
pub fn declaration(spec: &FuncSpec) -> String {
    let record = naming::record_type_name(&spec.name);
    let alias = naming::return_alias_name(&spec.name);
    let func = naming::func_name(&spec.name);

    let mut w = CWriter::new();
    if spec.has_fields() {
        w.line("typedef struct {");
        w.indent();
        for field in &spec.fields {
            w.line(&format!("{};", field.ty.declare(&field.name)));
        }
        w.dedent();
        w.line(&format!("}} {record};"));
    } else {
        w.line(&format!("typedef struct {{ }} {record};"));
    }
    w.line(&format!("typedef {};", spec.returns.declare(&alias)));
    w.line(&format!(
        "{}{alias} {func}({record});",
        storage_class(spec.linkage)
    ));
    w.build()
}

/// Emit the clone trio: aliases onto the origin's record type and
/// return-type alias, plus a forward signature for a fresh underlying
/// function. No new record type is defined.
pub fn clone_declaration(new: &str, origin: &str, linkage: Linkage) -> String {
    let record = naming::record_type_name(new);
    let alias = naming::return_alias_name(new);
    let func = naming::func_name(new);

    let mut w = CWriter::new();
    w.line(&format!(
        "typedef {} {record};",
        naming::record_type_name(origin)
    ));
    w.line(&format!(
        "typedef {} {alias};",
        naming::return_alias_name(origin)
    ));
    w.line(&format!("{}{alias} {func}({record});", storage_class(linkage)));
    w.build()
}

/// Emit the opening of the underlying function's definition, binding its
/// sole parameter to the reserved `args` identifier. The author follows
/// this with the function body.
pub fn definition_opener(name: &str, linkage: Linkage) -> String {
    format!(
        "{}{} {}({} {ARGS_PARAM})",
        storage_class(linkage),
        naming::return_alias_name(name),
        naming::func_name(name),
        naming::record_type_name(name),
    )
}

/// Emit the conventional same-named wrapper macro, so `name(...)` reads as
/// an ordinary call at use sites.
pub fn wrapper_macro(name: &str) -> String {
    format!(
        "#define {name}(...) {}(({}){{ __VA_ARGS__ }})",
        naming::func_name(name),
        naming::record_type_name(name),
    )
}
