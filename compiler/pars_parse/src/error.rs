//! Parse errors.

use pars_ir::Span;
use pars_lexer::{LexError, TokenKind};
use thiserror::Error;

/// A syntax error with the span it was found at.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        span: Span,
    },

    #[error("expected an expression, found {found}")]
    ExpectedExpression { found: TokenKind, span: Span },

    #[error("invalid module path `@{path}`: use `@std/name` or a relative `@./file.pars`")]
    InvalidModulePath { path: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::InvalidModulePath { span, .. } => *span,
        }
    }

    /// Errors at an invalid token duplicate the lexer's own report.
    pub(crate) fn is_at_error_token(&self) -> bool {
        matches!(
            self,
            ParseError::UnexpectedToken {
                found: TokenKind::Error,
                ..
            } | ParseError::ExpectedExpression {
                found: TokenKind::Error,
                ..
            }
        )
    }
}
