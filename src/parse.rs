//! Parsers for the textual declaration and call surfaces.
//!
//! Two surfaces are parsed: the semicolon-terminated field list of a
//! declaration (`"int a; const char *name;"`) and the initializer list of a
//! call (`"3, .b = 5"`). Both share one lexer, and both report errors with
//! a span into the surface string.

use crate::{
    call::Initializer,
    decl::FieldSpec,
    error::{Error, Result},
    types::{BaseType, CType},
    value::Value,
};

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Char(char),
    Star,
    Semi,
    Comma,
    Dot,
    Eq,
    Minus,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    start: usize,
    len: usize,
}

impl Token {
    fn span(&self) -> (usize, usize) {
        (self.start, self.len)
    }
}

fn end_span(src: &str) -> (usize, usize) {
    (src.len(), 0)
}

/// Decode the character starting at byte offset `i`.
///
/// The lexer advances past non-ASCII input only in whole characters, so
/// `i` always sits on a boundary and the fallback never fires.
fn char_at(src: &str, i: usize) -> char {
    src.get(i..)
        .and_then(|tail| tail.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn tokenize(surface: &'static str, src: &str) -> Result<Vec<Token>> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let kind = match c {
            '*' => {
                i += 1;
                TokenKind::Star
            }
            ';' => {
                i += 1;
                TokenKind::Semi
            }
            ',' => {
                i += 1;
                TokenKind::Comma
            }
            '.' => {
                i += 1;
                TokenKind::Dot
            }
            '=' => {
                i += 1;
                TokenKind::Eq
            }
            '-' => {
                i += 1;
                TokenKind::Minus
            }
            '"' => {
                i += 1;
                let mut s = String::new();
                loop {
                    if i >= bytes.len() {
                        return Err(Error::syntax(
                            surface,
                            src,
                            (start, i - start),
                            "unterminated string literal",
                        ));
                    }
                    match bytes[i] {
                        b'"' => {
                            i += 1;
                            break;
                        }
                        b'\\' => {
                            s.push(unescape(surface, src, bytes, &mut i, start)?);
                        }
                        b if b.is_ascii() => {
                            s.push(b as char);
                            i += 1;
                        }
                        _ => {
                            // the byte walk keeps `i` on a character
                            // boundary, so decode the full character
                            let c = char_at(src, i);
                            s.push(c);
                            i += c.len_utf8();
                        }
                    }
                }
                TokenKind::Str(s)
            }
            '\'' => {
                i += 1;
                if i >= bytes.len() {
                    return Err(Error::syntax(
                        surface,
                        src,
                        (start, 1),
                        "unterminated character literal",
                    ));
                }
                let c = match bytes[i] {
                    b'\\' => unescape(surface, src, bytes, &mut i, start)?,
                    b if b.is_ascii() => {
                        i += 1;
                        b as char
                    }
                    _ => {
                        let c = char_at(src, i);
                        i += c.len_utf8();
                        c
                    }
                };
                if i >= bytes.len() || bytes[i] as char != '\'' {
                    return Err(Error::syntax(
                        surface,
                        src,
                        (start, i - start),
                        "unterminated character literal",
                    ));
                }
                i += 1;
                TokenKind::Char(c)
            }
            c if c.is_ascii_digit() => {
                while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                    i += 1;
                }
                let mut is_float = false;
                if i < bytes.len() && bytes[i] as char == '.' {
                    is_float = true;
                    i += 1;
                    while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                        i += 1;
                    }
                }
                let text = &src[start..i];
                // tolerate a C float suffix
                if i < bytes.len() && matches!(bytes[i] as char, 'f' | 'F') {
                    i += 1;
                }
                if is_float {
                    let v = text.parse::<f64>().map_err(|_| {
                        Error::syntax(surface, src, (start, i - start), "invalid float literal")
                    })?;
                    TokenKind::Float(v)
                } else {
                    let v = text.parse::<i64>().map_err(|_| {
                        Error::syntax(
                            surface,
                            src,
                            (start, i - start),
                            "integer literal out of range",
                        )
                    })?;
                    TokenKind::Int(v)
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                while i < bytes.len()
                    && ((bytes[i] as char).is_ascii_alphanumeric() || bytes[i] as char == '_')
                {
                    i += 1;
                }
                TokenKind::Ident(src[start..i].to_string())
            }
            c => {
                return Err(Error::syntax(
                    surface,
                    src,
                    (start, 1),
                    format!("unexpected character '{c}'"),
                ));
            }
        };
        tokens.push(Token {
            kind,
            start,
            len: i - start,
        });
    }
    Ok(tokens)
}

fn unescape(
    surface: &'static str,
    src: &str,
    bytes: &[u8],
    i: &mut usize,
    start: usize,
) -> Result<char> {
    // caller sits on the backslash
    *i += 1;
    if *i >= bytes.len() {
        return Err(Error::syntax(
            surface,
            src,
            (start, *i - start),
            "unterminated escape sequence",
        ));
    }
    let c = bytes[*i] as char;
    *i += 1;
    match c {
        'n' => Ok('\n'),
        't' => Ok('\t'),
        'r' => Ok('\r'),
        '0' => Ok('\0'),
        '\\' => Ok('\\'),
        '\'' => Ok('\''),
        '"' => Ok('"'),
        c => Err(Error::syntax(
            surface,
            src,
            (*i - 2, 2),
            format!("unknown escape sequence '\\{c}'"),
        )),
    }
}

/// Map type words (with `const` already filtered out) to a base type.
fn base_from_words(words: &[&str]) -> Option<BaseType> {
    let joined = words.join(" ");
    let base = match joined.as_str() {
        "void" => BaseType::Void,
        "bool" | "_Bool" => BaseType::Bool,
        "char" => BaseType::Char,
        "int" | "signed" | "signed int" => BaseType::Int,
        "unsigned" | "unsigned int" => BaseType::UInt,
        "long" | "long int" => BaseType::Long,
        "unsigned long" | "unsigned long int" => BaseType::ULong,
        "float" => BaseType::Float,
        "double" => BaseType::Double,
        "size_t" => BaseType::SizeT,
        _ if words.len() == 1 => BaseType::Named(joined),
        _ => return None,
    };
    Some(base)
}

/// Build a type from one declaration run of tokens, excluding the field name.
fn type_from_tokens(
    surface: &'static str,
    src: &str,
    tokens: &[Token],
    span: (usize, usize),
) -> Result<CType> {
    let mut words: Vec<&str> = Vec::new();
    let mut pointers = 0;
    let mut is_const = false;
    for tok in tokens {
        match &tok.kind {
            TokenKind::Ident(w) if w == "const" => is_const = true,
            TokenKind::Ident(w) => {
                if pointers > 0 {
                    return Err(Error::syntax(
                        surface,
                        src,
                        tok.span(),
                        "type name after '*'",
                    ));
                }
                words.push(w);
            }
            TokenKind::Star => pointers += 1,
            _ => {
                return Err(Error::syntax(
                    surface,
                    src,
                    tok.span(),
                    "unexpected token in type",
                ));
            }
        }
    }
    if words.is_empty() {
        return Err(Error::syntax(surface, src, span, "missing type"));
    }
    let base = base_from_words(&words).ok_or_else(|| {
        Error::syntax(
            surface,
            src,
            span,
            format!("unknown type '{}'", words.join(" ")),
        )
    })?;
    Ok(CType {
        base,
        pointers,
        is_const,
    })
}

/// Parse a bare type, e.g. a declaration's return type.
pub fn parse_type(src: &str) -> Result<CType> {
    const SURFACE: &str = "type";
    let tokens = tokenize(SURFACE, src)?;
    if tokens.is_empty() {
        return Err(Error::syntax(SURFACE, src, (0, src.len()), "missing type"));
    }
    let span = (0, src.trim_end().len());
    type_from_tokens(SURFACE, src, &tokens, span)
}

/// Parse a semicolon-terminated field list, e.g. `"int a; const char *name;"`.
///
/// Every declaration must be terminated by `;`, including the last one. The
/// empty list is the empty (or all-whitespace) string; stray semicolons are
/// tolerated, matching the original macro's lone-`;` spelling of an empty
/// list.
pub fn parse_field_list(src: &str) -> Result<Vec<FieldSpec>> {
    const SURFACE: &str = "field list";
    let tokens = tokenize(SURFACE, src)?;
    let mut fields = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::Semi {
            i += 1;
            continue;
        }
        let start = i;
        while i < tokens.len() && tokens[i].kind != TokenKind::Semi {
            i += 1;
        }
        if i == tokens.len() {
            let last = &tokens[i - 1];
            return Err(Error::syntax(
                SURFACE,
                src,
                last.span(),
                "missing ';' after field declaration",
            ));
        }
        let run = &tokens[start..i];
        i += 1; // consume ';'

        let name_tok = run.last().filter(|t| !matches!(t.kind, TokenKind::Star));
        let Some(Token {
            kind: TokenKind::Ident(name),
            ..
        }) = name_tok
        else {
            let span = run.last().map_or_else(|| end_span(src), Token::span);
            return Err(Error::syntax(SURFACE, src, span, "expected field name"));
        };
        let last = &run[run.len() - 1];
        let run_span = (run[0].start, last.start + last.len - run[0].start);
        let ty = type_from_tokens(SURFACE, src, &run[..run.len() - 1], run_span)?;
        if ty.base == BaseType::Void && !ty.is_pointer() {
            return Err(Error::syntax(
                SURFACE,
                src,
                run_span,
                "a field cannot have type void",
            ));
        }
        fields.push(FieldSpec::new(name.clone(), ty));
    }
    Ok(fields)
}

/// Parse one value token (with optional leading minus).
fn parse_value(surface: &'static str, src: &str, tokens: &[Token], i: &mut usize) -> Result<Value> {
    let Some(tok) = tokens.get(*i) else {
        return Err(Error::syntax(surface, src, end_span(src), "expected a value"));
    };
    *i += 1;
    let value = match &tok.kind {
        TokenKind::Int(v) => Value::Int(*v),
        TokenKind::Float(v) => Value::Float(*v),
        TokenKind::Str(s) => Value::Str(s.clone()),
        TokenKind::Char(c) => Value::Char(*c),
        TokenKind::Ident(s) if s == "NULL" => Value::Null,
        TokenKind::Ident(s) if s == "true" => Value::Bool(true),
        TokenKind::Ident(s) if s == "false" => Value::Bool(false),
        TokenKind::Ident(s) => Value::Ident(s.clone()),
        TokenKind::Minus => match tokens.get(*i).map(|t| &t.kind) {
            Some(TokenKind::Int(v)) => {
                *i += 1;
                Value::Int(-v)
            }
            Some(TokenKind::Float(v)) => {
                *i += 1;
                Value::Float(-v)
            }
            _ => {
                return Err(Error::syntax(
                    surface,
                    src,
                    tok.span(),
                    "expected a number after '-'",
                ));
            }
        },
        _ => {
            return Err(Error::syntax(
                surface,
                src,
                tok.span(),
                "expected a literal or identifier",
            ));
        }
    };
    Ok(value)
}

/// Parse a call initializer list, e.g. `"3, .b = 5"`.
///
/// Entries are comma-separated: a bare value is positional, `.field = value`
/// is designated. A trailing comma is tolerated.
pub fn parse_initializers(src: &str) -> Result<Vec<Initializer>> {
    const SURFACE: &str = "initializer list";
    let tokens = tokenize(SURFACE, src)?;
    let mut inits = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::Dot {
            i += 1;
            let Some(Token {
                kind: TokenKind::Ident(field),
                ..
            }) = tokens.get(i)
            else {
                let span = tokens.get(i).map_or_else(|| end_span(src), Token::span);
                return Err(Error::syntax(
                    SURFACE,
                    src,
                    span,
                    "expected a field name after '.'",
                ));
            };
            let field = field.clone();
            i += 1;
            if tokens.get(i).map(|t| &t.kind) != Some(&TokenKind::Eq) {
                let span = tokens.get(i).map_or_else(|| end_span(src), Token::span);
                return Err(Error::syntax(
                    SURFACE,
                    src,
                    span,
                    "expected '=' after the field name",
                ));
            }
            i += 1;
            let value = parse_value(SURFACE, src, &tokens, &mut i)?;
            inits.push(Initializer::designated(field, value));
        } else {
            let value = parse_value(SURFACE, src, &tokens, &mut i)?;
            inits.push(Initializer::positional(value));
        }
        match tokens.get(i).map(|t| &t.kind) {
            Some(TokenKind::Comma) => i += 1,
            None => break,
            Some(_) => {
                return Err(Error::syntax(
                    SURFACE,
                    src,
                    tokens[i].span(),
                    "expected ',' between initializers",
                ));
            }
        }
    }
    Ok(inits)
}
