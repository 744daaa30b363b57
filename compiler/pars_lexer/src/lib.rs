//! Lexer for Parsley using logos with string interning.
//!
//! [`lex`] turns source text into a [`TokenList`] ending in `Eof`. Comments
//! are dropped; newlines stay as tokens because they separate statements.
//! Unlexable input becomes a `TokenKind::Error` token plus a [`LexError`].

mod lex_error;
mod parse_helpers;
mod raw_token;
mod token;

use logos::Logos;
use pars_ir::{Span, StringInterner};

pub use lex_error::LexError;
pub use token::{Token, TokenKind, TokenList};

use parse_helpers::{unescape_raw, unescape_string};
use raw_token::RawToken;

/// Tokens plus every error found along the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

/// Lex source code into tokens.
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let mut output = LexOutput::default();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::LineComment) => {}
            Ok(RawToken::UnterminatedString) => {
                output.errors.push(LexError::UnterminatedString {
                    preview: preview(slice),
                    span,
                });
                output.tokens.push(Token::new(TokenKind::Error, span));
            }
            Ok(raw) => {
                let kind = convert_token(raw, slice, interner);
                output.tokens.push(Token::new(kind, span));
            }
            Err(()) => {
                output.errors.push(classify_error(slice, span));
                output.tokens.push(Token::new(TokenKind::Error, span));
            }
        }
    }

    let eof_pos = u32::try_from(source.len()).unwrap_or(u32::MAX);
    output
        .tokens
        .push(Token::new(TokenKind::Eof, Span::new(eof_pos, eof_pos)));

    output
}

/// Logos reports failed literal callbacks and unknown bytes the same way.
fn classify_error(slice: &str, span: Span) -> LexError {
    match slice.chars().next() {
        Some(c) if c.is_ascii_digit() && slice.contains('.') => LexError::FloatParse { span },
        Some(c) if c.is_ascii_digit() => LexError::IntOverflow { span },
        Some(found) => LexError::UnexpectedChar { found, span },
        None => LexError::UnexpectedChar { found: '\0', span },
    }
}

fn preview(slice: &str) -> String {
    let truncated: String = slice.chars().take(20).collect();
    if truncated.len() < slice.len() {
        format!("{truncated}...")
    } else {
        truncated
    }
}

/// Convert a raw token to a `TokenKind`, interning strings.
fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::Float(f) => TokenKind::Float(f.to_bits()),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(&unescape_string(content)))
        }
        RawToken::RawString => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(&unescape_raw(content)))
        }
        RawToken::ModulePath => TokenKind::ModulePath(interner.intern(&slice[1..])),
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        RawToken::Let => TokenKind::Let,
        RawToken::Fn => TokenKind::Fn,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Return => TokenKind::Return,
        RawToken::Stop => TokenKind::Stop,
        RawToken::Skip => TokenKind::Skip,
        RawToken::Check => TokenKind::Check,
        RawToken::Try => TokenKind::Try,
        RawToken::Computed => TokenKind::Computed,
        RawToken::Export => TokenKind::Export,
        RawToken::Import => TokenKind::Import,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::As => TokenKind::As,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Dot => TokenKind::Dot,

        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,

        RawToken::Newline => TokenKind::Newline,
        // Filtered out by `lex` before conversion.
        RawToken::LineComment | RawToken::UnterminatedString => TokenKind::Error,
    }
}
