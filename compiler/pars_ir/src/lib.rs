//! Parsley IR - the data structures shared by the front end and the evaluator.
//!
//! - Spans for source locations
//! - Names for interned identifiers and string literals
//! - A flat arena holding expressions, statements and their side tables
//! - AST node kinds and operators
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string literals become `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//!   and lists are `(start, len)` ranges into arena side tables
//!
//! Floats are stored as their `u64` bit pattern so every node is `Eq + Hash`.

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod span;

pub use arena::{ExprArena, SharedArena};
pub use ast::{
    BinaryOp, DestructureField, DictEntry, DictKey, Expr, ExprKind, ImportKind, ImportPath,
    LetTarget, Param, Stmt, StmtKind, UnaryOp,
};
pub use expr_id::{DestructureRange, DictEntryRange, ExprId, ExprRange, ParamRange, StmtRange};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
