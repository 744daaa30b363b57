//! Statement parsing.
//!
//! Statements are separated by newlines or `;`. A statement that ends in a
//! closing `}` needs no separator before the next one.

use pars_ir::{DestructureField, LetTarget, Stmt, StmtKind};
use pars_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse statements until `closing` (left unconsumed) or end of input.
    pub(crate) fn parse_statements(&mut self, closing: Option<TokenKind>) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            if self.is_at_end() || closing.is_some_and(|kind| self.check(kind)) {
                break;
            }

            let before = self.cursor.position();
            match self.parse_statement() {
                Ok(stmt) => {
                    stmts.push(stmt);
                    if let Err(error) = self.end_statement(closing) {
                        self.record(error);
                        self.synchronize();
                    }
                }
                Err(error) => {
                    self.record(error);
                    self.synchronize();
                }
            }
            if self.cursor.position() == before {
                // Stray token the statement parser could not consume.
                self.advance();
            }
        }
        stmts
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.advance();
        }
    }

    fn end_statement(&mut self, closing: Option<TokenKind>) -> Result<(), ParseError> {
        let kind = self.current_kind();
        if matches!(
            kind,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof
        ) || closing == Some(kind)
            || self.cursor.previous_kind() == TokenKind::RBrace
        {
            Ok(())
        } else {
            Err(self.unexpected("newline or `;` after statement"))
        }
    }

    /// `return`, `check` and friends may end at any of these.
    pub(crate) fn at_statement_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        )
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Let => {
                self.advance();
                self.parse_let(false)?
            }
            TokenKind::Export => {
                self.advance();
                self.parse_export()?
            }
            TokenKind::Computed => {
                self.advance();
                self.parse_computed(false)?
            }
            TokenKind::Return => {
                self.advance();
                if self.at_statement_end() {
                    StmtKind::Return(None)
                } else {
                    StmtKind::Return(Some(self.parse_expr()?))
                }
            }
            TokenKind::Stop => {
                self.advance();
                StmtKind::Stop
            }
            TokenKind::Skip => {
                self.advance();
                StmtKind::Skip
            }
            TokenKind::Check => {
                self.advance();
                let cond = self.parse_expr()?;
                self.expect(TokenKind::Else)?;
                let otherwise = self.parse_expr()?;
                StmtKind::Check { cond, otherwise }
            }
            TokenKind::Import => {
                self.advance();
                let path = self.parse_module_path()?;
                let alias = if self.eat(TokenKind::As) {
                    Some(self.expect_ident()?.0)
                } else {
                    None
                };
                StmtKind::Import { path, alias }
            }
            _ => {
                let expr = self.parse_expr()?;
                if self.eat(TokenKind::Eq) {
                    self.skip_newlines();
                    let value = self.parse_expr()?;
                    StmtKind::Assign {
                        target: expr,
                        value,
                    }
                } else {
                    StmtKind::Expr(expr)
                }
            }
        };
        Ok(Stmt::new(kind, start.merge(self.previous_span())))
    }

    /// After `let`.
    fn parse_let(&mut self, export: bool) -> Result<StmtKind, ParseError> {
        let target = self.parse_let_target()?;
        self.expect(TokenKind::Eq)?;
        self.skip_newlines();
        let value = self.parse_expr()?;
        Ok(StmtKind::Let {
            target,
            value,
            export,
        })
    }

    /// A name, `{a, b as c, ...rest}` or `[x, ...rest]`. Shared with
    /// function parameters.
    pub(in crate::grammar) fn parse_let_target(&mut self) -> Result<LetTarget, ParseError> {
        match self.current_kind() {
            TokenKind::LBrace => {
                self.advance();
                let (fields, rest) = self.parse_destructure_fields(TokenKind::RBrace, true)?;
                let fields = self.arena.alloc_destructure_fields(fields);
                Ok(LetTarget::Dict { fields, rest })
            }
            TokenKind::LBracket => {
                self.advance();
                let (fields, rest) = self.parse_destructure_fields(TokenKind::RBracket, false)?;
                let fields = self.arena.alloc_destructure_fields(fields);
                Ok(LetTarget::Array { fields, rest })
            }
            _ => Ok(LetTarget::Name(self.expect_ident()?.0)),
        }
    }

    /// Fields of `{a, b as c, ...rest}` or `[x, y, ...rest]`, consuming the
    /// closing token. A rest element must come last.
    fn parse_destructure_fields(
        &mut self,
        closing: TokenKind,
        allow_rename: bool,
    ) -> Result<(Vec<DestructureField>, Option<pars_ir::Name>), ParseError> {
        let mut fields = Vec::new();
        let mut rest = None;
        loop {
            self.skip_newlines();
            if self.eat(closing) {
                break;
            }
            if self.eat(TokenKind::Ellipsis) {
                rest = Some(self.expect_ident()?.0);
                self.skip_newlines();
                self.eat(TokenKind::Comma);
                self.skip_newlines();
                self.expect(closing)?;
                break;
            }

            let (key, span) = self.expect_ident()?;
            let binding = if allow_rename && self.eat(TokenKind::As) {
                self.expect_ident()?.0
            } else {
                key
            };
            fields.push(DestructureField {
                key,
                binding,
                span: span.merge(self.previous_span()),
            });

            self.skip_newlines();
            if !self.eat(TokenKind::Comma) {
                self.skip_newlines();
                self.expect(closing)?;
                break;
            }
        }
        Ok((fields, rest))
    }

    /// After `export`.
    fn parse_export(&mut self) -> Result<StmtKind, ParseError> {
        match self.current_kind() {
            TokenKind::Let => {
                self.advance();
                self.parse_let(true)
            }
            TokenKind::Computed => {
                self.advance();
                self.parse_computed(true)
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.eat(TokenKind::Eq) {
                    self.skip_newlines();
                    let value = self.parse_expr()?;
                    Ok(StmtKind::Let {
                        target: LetTarget::Name(name),
                        value,
                        export: true,
                    })
                } else {
                    Ok(StmtKind::Export(name))
                }
            }
            _ => Err(self.unexpected("`let`, `computed` or a name after `export`")),
        }
    }

    /// After `computed`: `NAME = expr` or `NAME { block }`.
    fn parse_computed(&mut self, export: bool) -> Result<StmtKind, ParseError> {
        let (name, _) = self.expect_ident()?;
        let body = if self.check(TokenKind::LBrace) {
            self.parse_block_expr()?
        } else {
            self.expect(TokenKind::Eq)?;
            self.skip_newlines();
            self.parse_expr()?
        };
        Ok(StmtKind::Computed { name, body, export })
    }
}
