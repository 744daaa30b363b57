//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! string interning and final token conversion.

use logos::Logos;

use crate::parse_helpers::{parse_float, parse_int};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    #[token("let")]
    Let,
    #[token("fn")]
    #[token("function")]
    Fn,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("return")]
    Return,
    #[token("stop")]
    Stop,
    #[token("skip")]
    Skip,
    #[token("check")]
    Check,
    #[token("try")]
    Try,
    #[token("computed")]
    Computed,
    #[token("export")]
    Export,
    #[token("import")]
    Import,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("as")]
    As,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,

    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("++")]
    PlusPlus,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // Integer; `None` on i64 overflow becomes a lex error
    #[regex(r"[0-9][0-9_]*", |lex| parse_int(lex.slice()))]
    Int(i64),

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", |lex| parse_float(lex.slice()))]
    Float(f64),

    // Double-quoted string (no unescaped newlines allowed)
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    // Opening quote with no closing quote on the same line
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    // Single-quoted raw string: only `\'` and `\\` are escapes
    #[regex(r"'([^'\\\n]|\\.)*'")]
    RawString,

    // `@std/math`, `@./lib/util.pars`, `@../shared.pars`
    #[regex(r"@[A-Za-z0-9_./\-]+")]
    ModulePath,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}
