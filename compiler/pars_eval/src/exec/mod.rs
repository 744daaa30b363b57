//! Execution helpers for the Parsley interpreter.
//!
//! - `control`: block result streams, loop signals, iteration, body exits
//! - `expr`: indexing, field access and index/field assignment
//! - `destructure`: `let {..}` and `let [..]` binding
//!
//! These functions do not own a scope. Where a thunk may need forcing
//! they take a [`pars_value::ThunkForcer`], which the `Interpreter`
//! implements.

pub mod control;
pub mod destructure;
pub mod expr;
