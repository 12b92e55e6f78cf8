//! Error types for template compilation.
//!
//! Every failure carries the byte offset of the offending marker or tag,
//! and unterminated constructs also record where they were opened.
//! Compilation never emits partial output alongside an error.

use std::fmt;

use thiserror::Error;

/// The kind of compile error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    /// A `[for` head with no closing `]` before end of input.
    #[error("unterminated [for directive head")]
    UnterminatedDirective,
    /// A `[for]` directive with no iterable expression.
    #[error("missing iterable expression in [for]")]
    MissingIterable,
    /// An `as` clause with no alias, or an alias that is not an identifier.
    #[error("invalid loop alias")]
    InvalidAlias,
    /// A `key` clause with no expression.
    #[error("missing expression after `key`")]
    MissingKeyExpr,
    /// A `when` clause with no expression.
    #[error("missing expression after `when`")]
    MissingGuardExpr,
    /// A `[for]` with no matching `[/for]` before end of input.
    #[error("unterminated [for] loop")]
    UnclosedFor,
    /// An `[empty]`, `[between]`, `[/between]`, or `[/for]` with no active
    /// loop frame, or a `[/between]` outside a separator segment.
    #[error("stray loop marker")]
    StrayMarker,
    /// A second `[empty]` or `[between]` clause in the same loop.
    #[error("duplicate loop clause")]
    DuplicateClause,
    /// A component tag with no terminator (an unclosed `<Link>`, a
    /// `<RegionMarker>` without `/>`, or a tag head running to end of input).
    #[error("unterminated component tag")]
    UnclosedComponent,
    /// A quoted attribute value with no closing quote.
    #[error("unterminated attribute value")]
    UnterminatedAttribute,
}

impl CompileErrorKind {
    /// Returns a suggested fix for this error kind, when one exists.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnterminatedDirective => Some("add a closing ] to the [for ...] head"),
            Self::MissingIterable => Some("write [for <iterable>] with an expression to iterate"),
            Self::InvalidAlias => Some("use a plain identifier after `as`"),
            Self::MissingKeyExpr => Some("add an expression after `key` or drop the clause"),
            Self::MissingGuardExpr => Some("add an expression after `when` or drop the clause"),
            Self::UnclosedFor => Some("add a matching [/for]"),
            Self::StrayMarker => Some("this marker is only valid inside a [for] block"),
            Self::DuplicateClause => Some("a loop may carry [empty] and [between] at most once"),
            Self::UnclosedComponent => None,
            Self::UnterminatedAttribute => Some("add the closing quote"),
        }
    }
}

/// A compile error with source context.
#[derive(Debug, Clone)]
pub struct CompileError {
    /// The kind of error.
    pub kind: CompileErrorKind,
    /// Byte offset in the source where the error occurred.
    pub position: usize,
    /// What was being compiled when the error occurred.
    pub context: String,
    /// A snippet of the source around the error position.
    pub snippet: String,
    /// Optional help text for fixing the error.
    pub help: Option<String>,
    /// Position where the construct was opened, for unterminated errors.
    pub opened_at: Option<usize>,
}

impl CompileError {
    /// Creates a new compile error at the given byte offset.
    pub fn new(kind: CompileErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            context: String::new(),
            snippet: String::new(),
            help: None,
            opened_at: None,
        }
    }

    /// Creates an "unterminated [for head" error.
    pub fn unterminated_directive(source: &str, opened_at: usize) -> Self {
        Self::new(CompileErrorKind::UnterminatedDirective, source.len())
            .with_context("[for ...] directive head")
            .with_snippet(&snippet_at(source, opened_at))
            .opened_at(opened_at)
    }

    /// Creates an "unterminated [for] loop" error.
    pub fn unclosed_for(source: &str, opened_at: usize) -> Self {
        Self::new(CompileErrorKind::UnclosedFor, source.len())
            .with_context("[for] loop body")
            .with_snippet(&snippet_at(source, opened_at))
            .opened_at(opened_at)
    }

    /// Creates a "stray marker" error for a clause outside any loop frame.
    pub fn stray_marker(source: &str, label: &str, position: usize) -> Self {
        Self::new(CompileErrorKind::StrayMarker, position)
            .with_context(label)
            .with_snippet(&snippet_at(source, position))
    }

    /// Creates a "duplicate clause" error.
    pub fn duplicate_clause(source: &str, label: &str, position: usize) -> Self {
        Self::new(CompileErrorKind::DuplicateClause, position)
            .with_context(label)
            .with_snippet(&snippet_at(source, position))
    }

    /// Creates an "unterminated component tag" error.
    pub fn unclosed_component(source: &str, tag: &str, position: usize) -> Self {
        Self::new(CompileErrorKind::UnclosedComponent, position)
            .with_context(tag)
            .with_snippet(&snippet_at(source, position))
            .opened_at(position)
    }

    /// Creates an "unterminated attribute value" error.
    pub fn unterminated_attribute(source: &str, position: usize) -> Self {
        Self::new(CompileErrorKind::UnterminatedAttribute, position)
            .with_snippet(&snippet_at(source, position))
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = context.to_string();
        self
    }

    /// Adds a snippet of the source around the error.
    pub fn with_snippet(mut self, snippet: &str) -> Self {
        self.snippet = snippet.to_string();
        self
    }

    /// Adds help text to the error.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Sets the position where the construct was opened.
    pub fn opened_at(mut self, pos: usize) -> Self {
        self.opened_at = Some(pos);
        self
    }

    /// Converts the error to a user-friendly message.
    pub fn to_message(&self) -> String {
        let mut msg = format!("compile error at byte {}: {}", self.position, self.kind);

        if !self.context.is_empty() {
            msg.push_str(&format!(" (in {})", self.context));
        }

        if let Some(opened) = self.opened_at {
            msg.push_str(&format!(" (opened at byte {})", opened));
        }

        if !self.snippet.is_empty() {
            msg.push_str(&format!("\n  --> {}", self.snippet));
        }

        if let Some(ref help) = self.help {
            msg.push_str(&format!("\n  help: {}", help));
        } else if let Some(suggestion) = self.kind.suggestion() {
            msg.push_str(&format!("\n  help: {}", suggestion));
        }

        msg
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_message())
    }
}

impl std::error::Error for CompileError {}

/// Result type for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// Extracts a short snippet of the source around `pos`, clamped to char
/// boundaries, with newlines flattened for single-line display.
pub(crate) fn snippet_at(source: &str, pos: usize) -> String {
    let pos = pos.min(source.len());
    let mut start = pos.saturating_sub(12);
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (pos + 28).min(source.len());
    while !source.is_char_boundary(end) {
        end += 1;
    }
    source[start..end].replace(['\n', '\r'], " ")
}
