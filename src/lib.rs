//! Compiler for the bracket authoring-template dialect.
//!
//! This crate rewrites component-oriented template markup into plain markup
//! for a generic double-brace rendering engine, augmented with
//! hypermedia-exchange (`hx-*`) attributes for partial-page updates.
//!
//! The dialect has three surfaces:
//!
//! - **Interpolation**: `{expr}` becomes `{{ expr }}`; text already in
//!   double-brace form passes through untouched.
//!
//! - **Loops**: `[for items as it] ... [empty] ... [between] ... [/for]`
//!   expands into the host engine's for/else loop, with a separator clause
//!   guarded by "not the last iteration". Inside a loop body, `{.field}`
//!   resolves against the innermost loop alias.
//!
//! - **Components**: `<RegionMarker/>`, `<Link>...</Link>`, and
//!   form/button event bindings desugar into plain elements carrying
//!   `hx-*` attributes.
//!
//! # Example
//!
//! ```
//! use brackets_compiler::compile;
//!
//! let out = compile("[for todos as t]<li>{.title}</li>[/for]").unwrap();
//! assert_eq!(
//!     out,
//!     "{% for t in (todos or []) %}<li>{{ t.title }}</li>{% endfor %}"
//! );
//! ```
//!
//! Compilation is pure and stateless: output is a function of the input
//! text alone, so callers may cache compiled templates keyed by template
//! identity and modification time.

mod compiler;
mod desugar;

pub use compiler::compile;
pub use compiler::errors::{CompileError, CompileErrorKind};
