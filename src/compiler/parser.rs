//! Parser for the marker token stream.
//!
//! Builds the loop IR from the scanner's tokens. Loop frames are explicit:
//! each `[for]` opens a frame and recursion carries the frame stack, so a
//! nested `[for]` can never close an outer loop prematurely and clause
//! markers are validated against the frame they appear in.

use super::errors::{CompileError, CompileResult};
use super::ir::{LoopBlock, Node};
use super::lexer::{Token, TokenKind};
use super::syntax::MarkerKind;

/// Which section of a loop frame is currently collecting nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Body,
    Empty,
    Between,
}

/// The parser over a scanned token stream.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given source and its token stream.
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Parses the whole template. Clause markers at top level, where no
    /// loop frame is active, are structural errors.
    pub fn parse(mut self) -> CompileResult<Vec<Node>> {
        let mut nodes = Vec::new();
        while let Some(token) = self.next_token() {
            match token.kind {
                TokenKind::Text(text) => nodes.push(Node::Text(text)),
                TokenKind::ForOpen(head) => {
                    let block = LoopBlock::new(head.iterable, head.alias, head.key, head.guard);
                    nodes.push(self.parse_loop(block, token.start)?);
                }
                TokenKind::Empty => {
                    return Err(self.stray(MarkerKind::Empty, token.start));
                }
                TokenKind::Between => {
                    return Err(self.stray(MarkerKind::Between, token.start));
                }
                TokenKind::BetweenEnd => {
                    return Err(self.stray(MarkerKind::BetweenEnd, token.start));
                }
                TokenKind::ForEnd => {
                    return Err(self.stray(MarkerKind::ForEnd, token.start));
                }
            }
        }
        Ok(nodes)
    }

    /// Parses one loop frame up to its matching `[/for]`. `opened_at` is
    /// the byte offset of the frame's `[for`.
    fn parse_loop(&mut self, mut block: LoopBlock, opened_at: usize) -> CompileResult<Node> {
        let mut section = Section::Body;

        loop {
            let Some(token) = self.next_token() else {
                return Err(CompileError::unclosed_for(self.source, opened_at));
            };
            match token.kind {
                TokenKind::Text(text) => bucket(&mut block, section).push(Node::Text(text)),
                TokenKind::ForOpen(head) => {
                    let inner = LoopBlock::new(head.iterable, head.alias, head.key, head.guard);
                    let node = self.parse_loop(inner, token.start)?;
                    bucket(&mut block, section).push(node);
                }
                TokenKind::Empty => {
                    if block.empty.is_some() {
                        return Err(CompileError::duplicate_clause(
                            self.source,
                            MarkerKind::Empty.label(),
                            token.start,
                        ));
                    }
                    block.empty = Some(Vec::new());
                    section = Section::Empty;
                }
                TokenKind::Between => {
                    if block.between.is_some() {
                        return Err(CompileError::duplicate_clause(
                            self.source,
                            MarkerKind::Between.label(),
                            token.start,
                        ));
                    }
                    block.between = Some(Vec::new());
                    section = Section::Between;
                }
                TokenKind::BetweenEnd => {
                    if section != Section::Between {
                        return Err(self
                            .stray(MarkerKind::BetweenEnd, token.start)
                            .with_help("[/between] must follow a [between] segment"));
                    }
                    section = Section::Body;
                }
                TokenKind::ForEnd => return Ok(Node::Loop(block)),
            }
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn stray(&self, kind: MarkerKind, position: usize) -> CompileError {
        CompileError::stray_marker(self.source, kind.label(), position)
    }
}

/// The node list the current section collects into. Clause lists are
/// created on first use so a clause marker and its content stay paired.
fn bucket(block: &mut LoopBlock, section: Section) -> &mut Vec<Node> {
    match section {
        Section::Body => &mut block.body,
        Section::Empty => block.empty.get_or_insert_with(Vec::new),
        Section::Between => block.between.get_or_insert_with(Vec::new),
    }
}
