//! Field parsing for the `[for ...]` directive head.
//!
//! Grammar: `[for <iterable-expr> [as <alias>] [key <key-expr>] [when <guard-expr>]]`.
//! The iterable expression may contain spaces; the optional clauses are
//! introduced by standalone keywords. Each keyword switches the clause
//! being collected the first time it appears.

use crate::compiler::errors::{snippet_at, CompileError, CompileErrorKind, CompileResult};

/// Parsed fields of a `[for]` head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForHead {
    /// The required iterable expression.
    pub iterable: String,
    /// The alias bound by `as`, when present.
    pub alias: Option<String>,
    /// The `key` expression, when present. Reserved; not consumed by codegen.
    pub key: Option<String>,
    /// The `when` guard expression, when present.
    pub guard: Option<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Clause {
    Iterable,
    Alias,
    Key,
    Guard,
}

/// Parses the raw text between `[for` and `]`. `at` is the byte offset of
/// the directive's `[`, used for error positions.
pub(super) fn parse_for_head(source: &str, raw: &str, at: usize) -> CompileResult<ForHead> {
    let mut iterable: Vec<&str> = Vec::new();
    let mut alias: Option<&str> = None;
    let mut key: Vec<&str> = Vec::new();
    let mut guard: Vec<&str> = Vec::new();

    let mut clause = Clause::Iterable;
    let mut saw_alias = false;
    let mut saw_key = false;
    let mut saw_guard = false;

    for word in raw.split_whitespace() {
        match word {
            "as" if !saw_alias => {
                clause = Clause::Alias;
                saw_alias = true;
            }
            "key" if !saw_key => {
                clause = Clause::Key;
                saw_key = true;
            }
            "when" if !saw_guard => {
                clause = Clause::Guard;
                saw_guard = true;
            }
            _ => match clause {
                Clause::Iterable => iterable.push(word),
                Clause::Alias => {
                    if alias.is_some() {
                        return Err(head_error(CompileErrorKind::InvalidAlias, source, at)
                            .with_help("`as` binds exactly one identifier"));
                    }
                    alias = Some(word);
                }
                Clause::Key => key.push(word),
                Clause::Guard => guard.push(word),
            },
        }
    }

    if iterable.is_empty() {
        return Err(head_error(CompileErrorKind::MissingIterable, source, at));
    }
    if saw_alias {
        match alias {
            Some(name) if is_identifier(name) => {}
            _ => return Err(head_error(CompileErrorKind::InvalidAlias, source, at)),
        }
    }
    if saw_key && key.is_empty() {
        return Err(head_error(CompileErrorKind::MissingKeyExpr, source, at));
    }
    if saw_guard && guard.is_empty() {
        return Err(head_error(CompileErrorKind::MissingGuardExpr, source, at));
    }

    Ok(ForHead {
        iterable: iterable.join(" "),
        alias: alias.map(str::to_string),
        key: if key.is_empty() { None } else { Some(key.join(" ")) },
        guard: if guard.is_empty() { None } else { Some(guard.join(" ")) },
    })
}

fn head_error(kind: CompileErrorKind, source: &str, at: usize) -> CompileError {
    CompileError::new(kind, at)
        .with_context("[for ...] directive head")
        .with_snippet(&snippet_at(source, at))
}

/// A loop alias must be a plain identifier so the dot-shorthand rewrite
/// produces a valid host-engine reference.
fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
