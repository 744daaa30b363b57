//! Operator Matching Helpers

use pars_ir::{BinaryOp, UnaryOp};
use pars_lexer::TokenKind;

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn match_binary_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Or | TokenKind::PipePipe => Some(BinaryOp::Or),
            TokenKind::And | TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            TokenKind::In => Some(BinaryOp::In),
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::PlusPlus => Some(BinaryOp::Concat),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang | TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }
}
