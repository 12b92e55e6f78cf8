//! Compiler infrastructure for the bracket template dialect.
//!
//! The compile pipeline has two stages:
//! - Loop expansion: lexer tokenizes the source into text and directive
//!   markers, the parser builds a loop IR with an explicit frame stack, and
//!   codegen emits host-engine loop syntax with interpolation applied.
//! - Component desugaring: three fixed-order tag-rewrite passes turn
//!   component tags into plain markup plus `hx-*` attributes.

pub mod codegen;
pub mod errors;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod syntax;

use tracing::debug;

use crate::desugar;
use errors::CompileError;
use lexer::Scanner;
use parser::Parser;

/// Compiles a bracket-dialect template into host-engine markup.
///
/// The output is meant to be passed, unmodified, into a downstream
/// rendering engine supporting double-brace interpolation, for/else loops,
/// and if/endif conditionals.
///
/// Compilation never emits partial output: any structural problem (an
/// unterminated `[for]`, a stray `[empty]`, an unclosed `<Link>`) fails
/// with a [`CompileError`] carrying the offending byte offset.
pub fn compile(source: &str) -> Result<String, CompileError> {
    if source.is_empty() {
        return Ok(String::new());
    }

    debug!(len = source.len(), "compiling template");

    // Single full pass: loop expansion with interpolation applied to every
    // emitted text segment.
    let tokens = Scanner::new(source).tokenize()?;
    let nodes = Parser::new(source, tokens).parse()?;
    let expanded = codegen::generate(&nodes);

    // Desugaring passes run in fixed order so later passes never re-match
    // text already rewritten by earlier ones.
    let output = desugar::desugar(&expanded)?;

    debug!(len = output.len(), "template compiled");
    Ok(output)
}
