//! Built-in methods, dispatched on the receiver's variant.
//!
//! The set of core types is closed, so dispatch is a match rather than a
//! trait lookup. Extensions answer through
//! [`pars_value::Extension::call_method`].
//!
//! # Module Structure
//!
//! - [`helpers`]: argument validation and method name tables
//! - `array`, `string`, `dict`: per-type methods

mod array;
mod dict;
pub(crate) mod helpers;
mod string;

use pars_ir::Span;
use pars_value::{EvalError, EvalNote, EvalResult, Value};

use crate::diagnostics::closest_match;
use crate::errors::unknown_method;
use crate::Interpreter;

/// Call built-in `method` on `receiver`.
pub fn dispatch(
    interp: &mut Interpreter,
    receiver: &Value,
    method: &str,
    args: &[Value],
    span: Span,
) -> EvalResult {
    match receiver {
        Value::Array(items) => array::dispatch(interp, receiver, items, method, args, span),
        Value::Str(s) => string::dispatch(s, method, args),
        Value::Dict(dict) => {
            let dict = dict.borrow().clone();
            dict::dispatch(interp, &dict, receiver.type_name(), method, args)
        }
        Value::Error(err) => dict::dispatch(interp, &err.view(), receiver.type_name(), method, args),
        Value::Extension(ext) => match ext.call_method(method, args) {
            Some(result) => Ok(result?),
            None => Err(no_such_method(method, receiver.type_name(), &[]).into()),
        },
        _ => Err(no_such_method(method, receiver.type_name(), &[]).into()),
    }
}

/// Unknown-method error, with a suggestion drawn from `known`.
#[cold]
pub(crate) fn no_such_method(method: &str, type_name: &str, known: &[&'static str]) -> EvalError {
    let err = unknown_method(method, type_name);
    match closest_match(method, known.iter().copied()) {
        Some(suggestion) => err.with_note(EvalNote::new(format!("did you mean `{suggestion}`?"))),
        None => err,
    }
}
