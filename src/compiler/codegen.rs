//! Host-engine emission.
//!
//! Walks the loop IR and appends output text in a single forward pass.
//! Brace interpolation lives here as the leaf operation: it is applied to
//! every emitted text segment and never to the control constructs this
//! module produces itself, so output text is rewritten exactly once.

use super::ir::{LoopBlock, Node};

/// Generates host-engine markup from the parsed template.
pub fn generate(nodes: &[Node]) -> String {
    let mut out = String::new();
    emit_nodes(&mut out, nodes, None);
    out
}

/// Emits a node list. `alias` is the innermost active loop alias; it
/// resolves dot-shorthand in text segments, and inner loops shadow it.
fn emit_nodes(out: &mut String, nodes: &[Node], alias: Option<&str>) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&interpolate(text, alias)),
            Node::Loop(block) => emit_loop(out, block),
        }
    }
}

/// Emits one loop. Clause output order is fixed (body, separator, else)
/// regardless of the clauses' source order: the separator conditional must
/// sit inside the iteration body, and the empty branch after it.
fn emit_loop(out: &mut String, block: &LoopBlock) {
    let alias = Some(block.alias.as_str());

    // A falsy iterable iterates as an empty sequence.
    out.push_str("{% for ");
    out.push_str(&block.alias);
    out.push_str(" in (");
    out.push_str(&block.iterable);
    out.push_str(" or [])");
    if let Some(guard) = &block.guard {
        out.push_str(" if ");
        out.push_str(guard);
    }
    out.push_str(" %}");

    emit_nodes(out, &block.body, alias);

    if let Some(separator) = &block.between {
        // Never emitted after the last iteration.
        out.push_str("{% if not loop.last %}");
        emit_nodes(out, separator, alias);
        out.push_str("{% endif %}");
    }

    if let Some(empty) = &block.empty {
        out.push_str("{% else %}");
        emit_nodes(out, empty, alias);
    }

    out.push_str("{% endfor %}");
}

/// Rewrites every single-brace expression in `text` to the host engine's
/// double-brace form, in one append-only scan.
///
/// - `{expr}` with a non-empty, brace-free `expr` becomes `{{ expr }}`.
/// - The host engine's own delimiters, `{{` and `{%`, pass through
///   untouched (detected by the character after the opening brace), so
///   already-compiled output is a fixed point.
/// - With an `alias`, an expression starting with `.` is qualified by it:
///   `{.field}` becomes `{{ alias.field }}`.
/// - Any `{` that opens no well-formed expression is literal text.
pub fn interpolate(text: &str, alias: Option<&str>) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let Some(brace) = rest.find('{') else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..brace]);
        i += brace;

        let after = &text[i + 1..];
        if after.starts_with('{') {
            out.push_str("{{");
            i += 2;
            continue;
        }
        if after.starts_with('%') {
            out.push_str("{%");
            i += 2;
            continue;
        }

        // A match needs a `}` before any further `{` and before end of text.
        match after.find(|c| c == '{' || c == '}') {
            Some(end) if after.as_bytes()[end] == b'}' && !after[..end].trim().is_empty() => {
                let expr = after[..end].trim();
                out.push_str("{{ ");
                if let Some(alias) = alias {
                    if expr.starts_with('.') {
                        out.push_str(alias);
                    }
                }
                out.push_str(expr);
                out.push_str(" }}");
                i += 1 + end + 1;
            }
            _ => {
                out.push('{');
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::ir::DEFAULT_ALIAS;

    // ==================== interpolate ====================

    #[test]
    fn test_single_brace_becomes_double() {
        assert_eq!(interpolate("hello {name}!", None), "hello {{ name }}!");
        assert_eq!(interpolate("{a}{b}", None), "{{ a }}{{ b }}");
    }

    #[test]
    fn test_expression_is_trimmed() {
        assert_eq!(interpolate("{ user.name }", None), "{{ user.name }}");
    }

    #[test]
    fn test_double_brace_passes_through() {
        assert_eq!(interpolate("{{ name }}", None), "{{ name }}");
        assert_eq!(interpolate("x {{ a.b }} y", None), "x {{ a.b }} y");
    }

    #[test]
    fn test_host_statement_delimiters_pass_through() {
        let stmt = "{% for x in (xs or []) %}{{ x }}{% endfor %}";
        assert_eq!(interpolate(stmt, None), stmt);
    }

    #[test]
    fn test_interpolate_is_a_fixed_point() {
        let once = interpolate("a {x} b {{ y }} c", None);
        assert_eq!(interpolate(&once, None), once);
    }

    #[test]
    fn test_unmatched_and_empty_braces_are_literal() {
        assert_eq!(interpolate("a { b", None), "a { b");
        assert_eq!(interpolate("{}", None), "{}");
        assert_eq!(interpolate("{   }", None), "{   }");
        assert_eq!(interpolate("tail {", None), "tail {");
    }

    #[test]
    fn test_brace_in_expression_restarts_scan() {
        // `{x{y}` - the first brace opens nothing; `{y}` still matches.
        assert_eq!(interpolate("{x{y}", None), "{x{{ y }}");
    }

    #[test]
    fn test_dot_shorthand_uses_alias() {
        assert_eq!(interpolate("{.title}", Some("t")), "{{ t.title }}");
        assert_eq!(
            interpolate("<li>{.a} - {.b}</li>", Some("row")),
            "<li>{{ row.a }} - {{ row.b }}</li>"
        );
    }

    #[test]
    fn test_dot_shorthand_without_alias_is_not_qualified() {
        assert_eq!(interpolate("{.title}", None), "{{ .title }}");
    }

    #[test]
    fn test_plain_expression_ignores_alias() {
        assert_eq!(interpolate("{total}", Some("t")), "{{ total }}");
    }

    // ==================== loop emission ====================

    fn block(iterable: &str, alias: &str) -> LoopBlock {
        LoopBlock::new(iterable.to_string(), Some(alias.to_string()), None, None)
    }

    #[test]
    fn test_loop_open_and_close() {
        let mut b = block("todos", "t");
        b.body.push(Node::Text("<li>{.title}</li>".to_string()));
        let out = generate(&[Node::Loop(b)]);
        assert_eq!(
            out,
            "{% for t in (todos or []) %}<li>{{ t.title }}</li>{% endfor %}"
        );
    }

    #[test]
    fn test_guard_becomes_loop_filter() {
        let mut b = block("todos", "t");
        b.guard = Some("t.done".to_string());
        let out = generate(&[Node::Loop(b)]);
        assert_eq!(out, "{% for t in (todos or []) if t.done %}{% endfor %}");
    }

    #[test]
    fn test_key_is_not_consumed() {
        let mut b = block("todos", "t");
        b.key = Some("t.id".to_string());
        let out = generate(&[Node::Loop(b)]);
        assert!(!out.contains("t.id"), "key must not appear in output: {out}");
    }

    #[test]
    fn test_separator_and_empty_emission_order() {
        let mut b = block("xs", "x");
        b.body.push(Node::Text("{.v}".to_string()));
        b.between = Some(vec![Node::Text(", ".to_string())]);
        b.empty = Some(vec![Node::Text("none".to_string())]);
        let out = generate(&[Node::Loop(b)]);
        assert_eq!(
            out,
            "{% for x in (xs or []) %}{{ x.v }}\
             {% if not loop.last %}, {% endif %}\
             {% else %}none{% endfor %}"
        );
    }

    #[test]
    fn test_nested_loop_shadows_alias() {
        let mut inner = block("x.ys", "y");
        inner.body.push(Node::Text("{.n}".to_string()));
        let mut outer = block("xs", "x");
        outer.body.push(Node::Text("{.m}".to_string()));
        outer.body.push(Node::Loop(inner));
        outer.body.push(Node::Text("{.m}".to_string()));
        let out = generate(&[Node::Loop(outer)]);
        assert_eq!(
            out,
            "{% for x in (xs or []) %}{{ x.m }}\
             {% for y in (x.ys or []) %}{{ y.n }}{% endfor %}\
             {{ x.m }}{% endfor %}"
        );
    }

    #[test]
    fn test_default_alias_constant() {
        let b = LoopBlock::new("xs".to_string(), None, None, None);
        assert_eq!(b.alias, DEFAULT_ALIAS);
    }

    #[test]
    fn test_text_outside_loops_keeps_dot_unqualified() {
        let nodes = [
            Node::Text("{.free}".to_string()),
            Node::Loop(block("xs", "x")),
        ];
        let out = generate(&nodes);
        assert!(out.starts_with("{{ .free }}"));
    }
}
