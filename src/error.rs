use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for keyargs-codegen operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("syntax error in {surface}: {message}")]
    #[diagnostic(code(keyargs::syntax_error))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        surface: &'static str,
        message: String,
    },

    #[error("failed to parse keyargs manifest")]
    #[diagnostic(code(keyargs::manifest_parse_error))]
    ManifestParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid entry '{function}' in keyargs manifest: {message}")]
    #[diagnostic(code(keyargs::manifest_entry))]
    ManifestEntry { function: String, message: String },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(keyargs::invalid_identifier),
        help(
            "use only letters, digits, and underscores, starting with a letter or underscore"
        )
    )]
    InvalidIdentifier { name: String, context: &'static str },

    #[error("'{name}' is a C keyword")]
    #[diagnostic(
        code(keyargs::reserved_keyword),
        help("rename the {context} to something else, e.g. '{name}_'")
    )]
    ReservedKeyword { name: String, context: &'static str },

    #[error("{context} name '{name}' collides with the reserved prefix '_keyargs_'")]
    #[diagnostic(
        code(keyargs::reserved_prefix),
        help("identifiers starting with '_keyargs_' are reserved for derived names")
    )]
    ReservedPrefix { name: String, context: &'static str },

    #[error("function '{name}' is already declared")]
    #[diagnostic(code(keyargs::redeclaration))]
    Redeclaration { name: String },

    #[error("field '{field}' of '{function}' is declared twice")]
    #[diagnostic(code(keyargs::duplicate_field_declaration))]
    DuplicateFieldDeclaration { function: String, field: String },

    #[error("field '{field}' of '{function}' has type void")]
    #[diagnostic(
        code(keyargs::void_field),
        help("only pointers to void can be record members")
    )]
    VoidField { function: String, field: String },

    #[error("function '{name}' is not declared")]
    #[diagnostic(
        code(keyargs::undeclared),
        help("declare '{name}' before cloning, defining, or calling it")
    )]
    Undeclared { name: String },

    #[error("function '{name}' is already defined")]
    #[diagnostic(code(keyargs::redefinition))]
    Redefinition { name: String },

    #[error("linkage mismatch for '{name}': declared {declared}, opened as {requested}")]
    #[diagnostic(
        code(keyargs::linkage_mismatch),
        help("use define for external declarations and define_static for internal ones")
    )]
    LinkageMismatch {
        name: String,
        declared: &'static str,
        requested: &'static str,
    },

    #[error("function '{function}' has no field '{field}'")]
    #[diagnostic(code(keyargs::unknown_field))]
    UnknownField { function: String, field: String },

    #[error("field '{field}' in call to '{function}' is initialized twice")]
    #[diagnostic(
        code(keyargs::duplicate_initializer),
        help("a field may be set positionally or by designation, but not both")
    )]
    DuplicateInitializer { function: String, field: String },

    #[error("'{function}' has {arity} field(s) but {given} positional value(s) were supplied")]
    #[diagnostic(code(keyargs::too_many_positional))]
    TooManyPositional {
        function: String,
        arity: usize,
        given: usize,
    },

    #[error("positional value after a designated one in call to '{function}'")]
    #[diagnostic(
        code(keyargs::positional_after_designated),
        help("positional entries must precede designated ones")
    )]
    PositionalAfterDesignated { function: String },
}

impl Error {
    /// Create a syntax error over one of the textual surfaces.
    pub fn syntax(
        surface: &'static str,
        src: &str,
        span: impl Into<SourceSpan>,
        message: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::Syntax {
            src: NamedSource::new(surface, src.to_string()),
            span: span.into(),
            surface,
            message: message.into(),
        })
    }

    /// Create a manifest parse error from a toml error.
    pub fn manifest_parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ManifestParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub fn undeclared(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::Undeclared { name: name.into() })
    }

    pub fn redeclaration(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::Redeclaration { name: name.into() })
    }
}
