//! Flat AST types using arena allocation.
//!
//! - `expr`: expression nodes (`Expr`, `ExprKind`) and their list elements
//! - `stmt`: statement nodes and `let` targets
//! - `operators`: binary and unary operators

mod expr;
mod operators;
mod stmt;

pub use expr::{DictEntry, DictKey, Expr, ExprKind, ImportKind, ImportPath, Param};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{DestructureField, LetTarget, Stmt, StmtKind};
