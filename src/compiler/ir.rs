//! Intermediate representation for loop expansion.
//!
//! The IR is produced by the parser and consumed by codegen. It is a tree
//! rather than a flat marker stream so that nested `[for]` blocks close at
//! the right depth, and so the separator and empty clauses can be emitted
//! in the structurally correct order regardless of their source order.

/// The alias bound when a `[for]` head has no `as` clause. An internal
/// name, so it cannot shadow an author-facing context variable inside the
/// loop body.
pub const DEFAULT_ALIAS: &str = "__it";

/// A node in the expanded-template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A raw text segment. Interpolation and dot-shorthand rewriting are
    /// applied when the segment is emitted, never earlier, so text is
    /// rewritten exactly once.
    Text(String),
    /// A `[for] ... [/for]` region.
    Loop(LoopBlock),
}

/// One `[for ...]` block with its clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopBlock {
    /// The iterable expression, forwarded verbatim to the host engine.
    pub iterable: String,
    /// The per-iteration alias. Defaults to [`DEFAULT_ALIAS`] when the head
    /// has no `as` clause. Inner loops shadow outer aliases for
    /// dot-shorthand resolution.
    pub alias: String,
    /// The `key` expression. Parsed and validated but not consumed by
    /// codegen; reserved for keyed-diff support.
    pub key: Option<String>,
    /// The `when` guard expression, applied as a loop filter.
    pub guard: Option<String>,
    /// Body content, including any text after a `[/between]` segment.
    pub body: Vec<Node>,
    /// The `[empty]` clause, taken when the iterable yields nothing.
    pub empty: Option<Vec<Node>>,
    /// The `[between]` separator, emitted between iterations.
    pub between: Option<Vec<Node>>,
}

impl LoopBlock {
    /// Creates an empty block from the parsed head fields.
    pub fn new(
        iterable: String,
        alias: Option<String>,
        key: Option<String>,
        guard: Option<String>,
    ) -> Self {
        Self {
            iterable,
            alias: alias.unwrap_or_else(|| DEFAULT_ALIAS.to_string()),
            key,
            guard,
            body: Vec::new(),
            empty: None,
            between: None,
        }
    }
}
