//! Pars Eval - tree-walking evaluator for the Parsley scripting language.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Interpreter`: one `eval` dispatcher over the flat AST, with RAII scope
//!   guards for environment and arena switching
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `methods`: enum-based dispatch for built-in methods
//! - `builtins` / `stdlib`: native functions addressed by key
//! - `Value`, `Environment`, `EvalError` from `pars_value`
//!
//! Early exits (`return`, `stop`, `skip`, `check`) travel on the error side
//! of `EvalResult` as `ControlAction`s and are consumed by the construct
//! that owns them.

mod builtins;
mod coerce;
mod diagnostics;
pub mod errors;
pub mod exec;
pub mod interpreter;
mod methods;
mod operators;
mod print_handler;
mod stdlib;
mod unary_operators;

pub use pars_value::{
    ControlAction, Dictionary, Environment, EvalError, EvalResult, Extension, Value,
};

pub use builtins::BuiltinFn;
pub use coerce::{compare_values, NumericCoercion};
pub use diagnostics::{closest_match, CallFrame, CallStack};
pub use interpreter::{
    FsLoader, Interpreter, InterpreterBuilder, MemoryLoader, ModuleLoader, RunError,
    ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH,
};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use unary_operators::evaluate_unary;

#[cfg(test)]
mod tests;
