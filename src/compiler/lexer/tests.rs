use super::*;
use crate::compiler::errors::CompileErrorKind;

fn tokenize(src: &str) -> Vec<Token> {
    Scanner::new(src).tokenize().expect("tokenize failed")
}

fn tokenize_err(src: &str) -> CompileError {
    Scanner::new(src).tokenize().expect_err("expected tokenize error")
}

#[test]
fn test_plain_text_is_one_token() {
    let tokens = tokenize("<p>hello {name}</p>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(
        tokens[0].kind,
        TokenKind::Text("<p>hello {name}</p>".to_string())
    );
    assert_eq!(tokens[0].start, 0);
}

#[test]
fn test_for_head_full_clauses() {
    let tokens = tokenize("[for todos as t key t.id when t.done]x[/for]");
    let TokenKind::ForOpen(head) = &tokens[0].kind else {
        panic!("expected ForOpen, got {:?}", tokens[0].kind);
    };
    assert_eq!(head.iterable, "todos");
    assert_eq!(head.alias.as_deref(), Some("t"));
    assert_eq!(head.key.as_deref(), Some("t.id"));
    assert_eq!(head.guard.as_deref(), Some("t.done"));
    assert_eq!(tokens[1].kind, TokenKind::Text("x".to_string()));
    assert_eq!(tokens[2].kind, TokenKind::ForEnd);
}

#[test]
fn test_for_head_iterable_only() {
    let tokens = tokenize("[for user.posts][/for]");
    let TokenKind::ForOpen(head) = &tokens[0].kind else {
        panic!("expected ForOpen");
    };
    assert_eq!(head.iterable, "user.posts");
    assert_eq!(head.alias, None);
    assert_eq!(head.key, None);
    assert_eq!(head.guard, None);
}

#[test]
fn test_for_head_iterable_with_spaces() {
    let tokens = tokenize("[for items | selected as it][/for]");
    let TokenKind::ForOpen(head) = &tokens[0].kind else {
        panic!("expected ForOpen");
    };
    assert_eq!(head.iterable, "items | selected");
    assert_eq!(head.alias.as_deref(), Some("it"));
}

#[test]
fn test_clause_markers_and_offsets() {
    let src = "[for xs as x]a[between], [/between]b[empty]none[/for]";
    let tokens = tokenize(src);
    let kinds: Vec<_> = tokens
        .iter()
        .map(|t| match &t.kind {
            TokenKind::Text(s) => format!("text:{s}"),
            TokenKind::ForOpen(_) => "for".to_string(),
            TokenKind::Empty => "empty".to_string(),
            TokenKind::Between => "between".to_string(),
            TokenKind::BetweenEnd => "between-end".to_string(),
            TokenKind::ForEnd => "for-end".to_string(),
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "for",
            "text:a",
            "between",
            "text:, ",
            "between-end",
            "text:b",
            "empty",
            "text:none",
            "for-end"
        ]
    );
    // Each marker token starts at its `[`.
    for token in &tokens {
        if !matches!(token.kind, TokenKind::Text(_)) {
            assert_eq!(src.as_bytes()[token.start], b'[');
        }
    }
}

#[test]
fn test_bracketed_text_is_not_a_marker() {
    let tokens = tokenize("[item] [formats] [/force]");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(tokens[0].kind, TokenKind::Text(_)));
}

#[test]
fn test_unterminated_head_is_error() {
    let err = tokenize_err("text [for items as it");
    assert_eq!(err.kind, CompileErrorKind::UnterminatedDirective);
    assert_eq!(err.opened_at, Some(5));
}

#[test]
fn test_missing_iterable_is_error() {
    let err = tokenize_err("[for][/for]");
    assert_eq!(err.kind, CompileErrorKind::MissingIterable);
    assert_eq!(err.position, 0);

    let err = tokenize_err("[for  ][/for]");
    assert_eq!(err.kind, CompileErrorKind::MissingIterable);
}

#[test]
fn test_alias_must_be_identifier() {
    let err = tokenize_err("[for xs as][/for]");
    assert_eq!(err.kind, CompileErrorKind::InvalidAlias);

    let err = tokenize_err("[for xs as a.b][/for]");
    assert_eq!(err.kind, CompileErrorKind::InvalidAlias);

    let err = tokenize_err("[for xs as a b][/for]");
    assert_eq!(err.kind, CompileErrorKind::InvalidAlias);
}

#[test]
fn test_empty_clause_expressions_are_errors() {
    let err = tokenize_err("[for xs key][/for]");
    assert_eq!(err.kind, CompileErrorKind::MissingKeyExpr);

    let err = tokenize_err("[for xs when][/for]");
    assert_eq!(err.kind, CompileErrorKind::MissingGuardExpr);
}

#[test]
fn test_keyword_order_is_flexible() {
    let tokens = tokenize("[for xs when x.ok as x][/for]");
    let TokenKind::ForOpen(head) = &tokens[0].kind else {
        panic!("expected ForOpen");
    };
    assert_eq!(head.iterable, "xs");
    assert_eq!(head.alias.as_deref(), Some("x"));
    assert_eq!(head.guard.as_deref(), Some("x.ok"));
}
