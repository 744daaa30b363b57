//! Postfix operators: call, index, field access and method calls.
//!
//! Postfix operators bind to the expression on their left only when they
//! start on the same line.

use pars_ir::{ExprId, ExprKind, ExprRange};
use pars_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let start = self.span_of(expr);
            match self.current_kind() {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_call_args()?;
                    let span = start.merge(self.previous_span());
                    expr = self.alloc(ExprKind::Call { func: expr, args }, span);
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.skip_newlines();
                    let index = self.parse_expr()?;
                    self.skip_newlines();
                    self.expect(TokenKind::RBracket)?;
                    let span = start.merge(self.previous_span());
                    expr = self.alloc(
                        ExprKind::Index {
                            receiver: expr,
                            index,
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    let (name, _) = self.expect_ident()?;
                    if self.eat(TokenKind::LParen) {
                        let args = self.parse_call_args()?;
                        let span = start.merge(self.previous_span());
                        expr = self.alloc(
                            ExprKind::MethodCall {
                                receiver: expr,
                                method: name,
                                args,
                            },
                            span,
                        );
                    } else {
                        let span = start.merge(self.previous_span());
                        expr = self.alloc(
                            ExprKind::Field {
                                receiver: expr,
                                field: name,
                            },
                            span,
                        );
                    }
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Arguments after `(`, consuming the closing `)`.
    fn parse_call_args(&mut self) -> Result<ExprRange, ParseError> {
        let args = self.parse_comma_list(TokenKind::RParen)?;
        Ok(self.arena.alloc_expr_list(args))
    }

    /// Comma separated expressions up to and including `closing`.
    /// Newlines and a trailing comma are allowed.
    pub(crate) fn parse_comma_list(
        &mut self,
        closing: TokenKind,
    ) -> Result<Vec<ExprId>, ParseError> {
        let mut items = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(closing) {
                break;
            }
            items.push(self.parse_expr()?);
            self.skip_newlines();
            if !self.eat(TokenKind::Comma) {
                self.skip_newlines();
                self.expect(closing)?;
                break;
            }
        }
        Ok(items)
    }
}
