//! Recursive descent parser for Parsley.
//!
//! Produces a flat AST in an [`ExprArena`] plus the program's statement
//! range. Errors are collected rather than returned: after an error the
//! parser skips to the next statement boundary and continues.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::ParseError;

use pars_ir::{Expr, ExprArena, ExprId, ExprKind, Name, Span, StmtRange, StringInterner};
use pars_lexer::{TokenKind, TokenList};

/// Everything a parse produces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutput {
    pub arena: ExprArena,
    /// Top-level statements of the program.
    pub program: StmtRange,
    /// Lex errors first, then parse errors, each in source order.
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex and parse a source text.
pub fn parse(source: &str, interner: &StringInterner) -> ParseOutput {
    let lexed = pars_lexer::lex(source, interner);
    let mut output = parse_tokens(&lexed.tokens, interner);
    if !lexed.errors.is_empty() {
        let mut errors: Vec<ParseError> = lexed.errors.into_iter().map(ParseError::from).collect();
        errors.append(&mut output.errors);
        output.errors = errors;
    }
    output
}

/// Parse an already lexed token list.
pub fn parse_tokens(tokens: &TokenList, interner: &StringInterner) -> ParseOutput {
    tracing::debug!(tokens = tokens.len(), "parsing program");
    Parser::new(tokens, interner).parse_program()
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    arena: ExprArena,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            interner,
            arena: ExprArena::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the whole token stream as a program.
    pub fn parse_program(mut self) -> ParseOutput {
        let stmts = self.parse_statements(None);
        let program = self.arena.alloc_stmts(stmts);
        if !self.errors.is_empty() {
            tracing::debug!(errors = self.errors.len(), "parse finished with errors");
        }
        ParseOutput {
            arena: self.arena,
            program,
            errors: self.errors,
        }
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor.advance();
    }

    #[inline]
    fn skip_newlines(&mut self) {
        self.cursor.skip_newlines();
    }

    /// Consume `kind` if it is next.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.current_span();
                self.advance();
                Ok((name, span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current_kind(),
            span: self.current_span(),
        }
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    fn record(&mut self, error: ParseError) {
        if error.is_at_error_token() {
            tracing::trace!(?error, "dropping error already reported by the lexer");
        } else {
            self.errors.push(error);
        }
    }

    /// Skip to the next statement boundary. A closing `}` is left for the
    /// enclosing block.
    fn synchronize(&mut self) {
        while !matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests;
