//! Marker scanner for the bracket template dialect.
//!
//! The scanner makes one forward pass over the source and produces a flat
//! stream of tokens: plain text segments and the five control markers.
//! Directive heads (`[for ...]`) are parsed into their fields here so the
//! parser only deals with structure.

mod consume;
mod directive;
#[cfg(test)]
mod tests;

pub use directive::ForHead;

use tracing::trace;

use super::errors::{CompileError, CompileResult};
use super::syntax::{MarkerKind, FOR_OPEN};

/// A token produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token, with the parsed head for loop opens.
    pub kind: TokenKind,
    /// The byte offset where this token starts.
    pub start: usize,
}

/// The kind of token, carrying the payload the parser needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of plain markup between markers.
    Text(String),
    /// A `[for ...]` directive with its parsed fields.
    ForOpen(ForHead),
    /// `[empty]`
    Empty,
    /// `[between]`
    Between,
    /// `[/between]`
    BetweenEnd,
    /// `[/for]`
    ForEnd,
}

/// The scanner over a template source.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input from the current position.
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Advances the position by n bytes.
    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Tokenizes the entire source.
    pub fn tokenize(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut text_start = self.pos;

        while self.pos < self.input.len() {
            let Some(kind) = MarkerKind::match_at(self.remaining()) else {
                self.skip_to_next_bracket();
                continue;
            };

            if self.pos > text_start {
                tokens.push(Token {
                    kind: TokenKind::Text(self.input[text_start..self.pos].to_string()),
                    start: text_start,
                });
            }

            let start = self.pos;
            let kind = match kind {
                MarkerKind::ForOpen => TokenKind::ForOpen(self.lex_for_head()?),
                MarkerKind::Empty => TokenKind::Empty,
                MarkerKind::Between => TokenKind::Between,
                MarkerKind::BetweenEnd => TokenKind::BetweenEnd,
                MarkerKind::ForEnd => TokenKind::ForEnd,
            };
            if let Some(len) = marker_fixed_len(&kind) {
                self.advance(len);
            }
            tokens.push(Token { kind, start });
            text_start = self.pos;
        }

        if self.pos > text_start {
            tokens.push(Token {
                kind: TokenKind::Text(self.input[text_start..self.pos].to_string()),
                start: text_start,
            });
        }

        trace!(count = tokens.len(), "template tokenized");
        Ok(tokens)
    }

    /// Lexes a `[for ...]` head starting at the current position. The head
    /// runs to the first `]`; a head with no `]` is a structural error.
    fn lex_for_head(&mut self) -> CompileResult<ForHead> {
        let open = self.pos;
        match self.remaining().find(']') {
            Some(close) => {
                let raw = &self.remaining()[FOR_OPEN.len()..close];
                let head = directive::parse_for_head(self.input, raw, open)?;
                self.advance(close + 1);
                Ok(head)
            }
            None => Err(CompileError::unterminated_directive(self.input, open)),
        }
    }
}

/// The byte length consumed for fixed-spelling markers. `ForOpen` consumes
/// its head during lexing, `Text` is sliced directly.
fn marker_fixed_len(kind: &TokenKind) -> Option<usize> {
    match kind {
        TokenKind::Empty => MarkerKind::Empty.fixed_len(),
        TokenKind::Between => MarkerKind::Between.fixed_len(),
        TokenKind::BetweenEnd => MarkerKind::BetweenEnd.fixed_len(),
        TokenKind::ForEnd => MarkerKind::ForEnd.fixed_len(),
        TokenKind::ForOpen(_) | TokenKind::Text(_) => None,
    }
}
