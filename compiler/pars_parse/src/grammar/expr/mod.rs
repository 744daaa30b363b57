//! Expression parsing.
//!
//! - `mod.rs`: entry point (`parse_expr`), binary precedence climbing, prefix operators
//! - `operators.rs`: token to operator mapping
//! - `postfix.rs`: call, method call, field, index
//! - `primary.rs`: literals, collections, functions, `if`, `for`, `import`

mod operators;
mod postfix;
mod primary;

use pars_ir::{ExprId, ExprKind};
use pars_lexer::TokenKind;
use pars_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow
    /// on deeply nested expressions.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_binary(0))
    }

    /// Left-associative precedence climbing over [`pars_ir::BinaryOp::precedence`].
    /// A newline may follow an operator but not precede it.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_binary_op() {
            let precedence = op.precedence();
            if precedence <= min_precedence {
                break;
            }
            self.advance();
            self.skip_newlines();
            let right = self.parse_binary(precedence)?;
            let span = self.span_of(left).merge(self.span_of(right));
            left = self.alloc(ExprKind::Binary { op, left, right }, span);
        }

        Ok(left)
    }

    /// Prefix operators and `try`.
    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();

        if let Some(op) = self.match_unary_op() {
            self.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(self.span_of(operand));
            return Ok(self.alloc(ExprKind::Unary { op, operand }, span));
        }

        if self.check(TokenKind::Try) {
            self.advance();
            let inner = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(self.span_of(inner));
            return Ok(self.alloc(ExprKind::Try(inner), span));
        }

        self.parse_postfix()
    }
}
