//! Lexer errors.

use pars_ir::Span;
use thiserror::Error;

/// A problem found while tokenizing. Lexing continues after each one.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character `{found}`")]
    UnexpectedChar { found: char, span: Span },

    #[error("integer literal does not fit in 64 bits")]
    IntOverflow { span: Span },

    #[error("malformed float literal")]
    FloatParse { span: Span },

    #[error("unterminated string starting with {preview}")]
    UnterminatedString { preview: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::IntOverflow { span }
            | LexError::FloatParse { span }
            | LexError::UnterminatedString { span, .. } => *span,
        }
    }
}
