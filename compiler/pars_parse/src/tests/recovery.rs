//! Error reporting and recovery.

use pars_ir::{Span, StmtKind, StringInterner};
use pars_lexer::{LexError, TokenKind};
use pretty_assertions::assert_eq;

use crate::{parse, ParseError};

#[test]
fn missing_expression_is_reported() {
    let interner = StringInterner::new();
    let output = parse("let x = ", &interner);
    assert_eq!(
        output.errors,
        vec![ParseError::ExpectedExpression {
            found: TokenKind::Eof,
            span: Span::new(8, 8),
        }]
    );
}

#[test]
fn parsing_continues_after_bad_statement() {
    let interner = StringInterner::new();
    let output = parse("let = 1\nlet y = 2", &interner);
    assert_eq!(output.errors.len(), 1);
    let stmts = output.arena.get_stmts(output.program);
    assert_eq!(stmts.len(), 1);
    assert!(matches!(stmts[0].kind, StmtKind::Let { .. }));
}

#[test]
fn two_expressions_on_one_line() {
    let interner = StringInterner::new();
    let output = parse("1 2", &interner);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].to_string(),
        "expected newline or `;` after statement, found integer"
    );
}

#[test]
fn lex_errors_are_not_duplicated() {
    let interner = StringInterner::new();
    let output = parse("let a = #", &interner);
    assert_eq!(
        output.errors,
        vec![ParseError::Lex(LexError::UnexpectedChar {
            found: '#',
            span: Span::new(8, 9),
        })]
    );
}

#[test]
fn invalid_module_path() {
    let interner = StringInterner::new();
    let output = parse("import @lib/util", &interner);
    assert!(matches!(
        output.errors.as_slice(),
        [ParseError::InvalidModulePath { .. }]
    ));
    assert_eq!(output.errors[0].span(), Span::new(7, 16));
}

#[test]
fn unclosed_block_is_reported() {
    let interner = StringInterner::new();
    let output = parse("for (x in items) { x", &interner);
    assert!(output.has_errors());
    assert!(output.errors[0]
        .to_string()
        .contains("expected `}`"));
}
