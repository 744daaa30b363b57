//! Runtime model of the Parsley evaluator.
//!
//! - [`Value`]: the closed set of runtime values plus opaque [`Extension`] leaves
//! - [`Dictionary`]: insertion-ordered map from string keys to [`Binding`]s
//! - [`Binding`]: an eager value or a [`Thunk`] re-evaluated on every read
//! - [`Environment`]: reference-counted lexical scope chain
//! - [`EvalError`] / [`ControlAction`]: the error model and early-exit signals
//!
//! Nothing here evaluates syntax. Thunks are forced through the
//! [`ThunkForcer`] seam, which the interpreter implements.

mod binding;
mod code_unit;
mod environment;
pub mod errors;
mod shared;
mod value;

pub use binding::{Binding, Thunk, ThunkForcer};
pub use code_unit::CodeUnit;
pub use environment::{AssignError, DefineError, Environment, Mutability, ScopeKind};
pub use errors::{
    BacktraceFrame, ControlAction, ErrorClass, EvalBacktrace, EvalError, EvalErrorKind, EvalNote,
    EvalResult,
};
pub use shared::Shared;
pub use value::{format_float, BuiltinValue, Dictionary, Extension, FunctionValue, Value};
