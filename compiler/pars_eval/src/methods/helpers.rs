//! Argument validation shared by builtins, methods and the standard library.

use pars_value::{EvalError, Value};

use crate::errors::{arg_count_range, wrong_arg_count, wrong_arg_type};

/// Built-in method names per receiver type, for "did you mean" hints.
/// Sorted by method name.
pub const ARRAY_METHODS: &[&str] = &[
    "contains", "filter", "join", "length", "map", "push", "reduce", "reverse", "sort",
];
pub const STRING_METHODS: &[&str] = &[
    "contains", "length", "split", "toLower", "toUpper", "trim",
];
pub const DICT_METHODS: &[&str] = &["entries", "has", "keys", "length", "values"];

/// Validate exact argument count.
#[inline]
pub fn require_args(function: &str, expected: usize, args: &[Value]) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_arg_count(function, expected, args.len()))
    }
}

/// Validate an inclusive argument count range.
#[inline]
pub fn require_args_range(
    function: &str,
    min: usize,
    max: usize,
    args: &[Value],
) -> Result<(), EvalError> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(arg_count_range(function, min, max, args.len()))
    }
}

/// Extract a string argument at the given index.
#[inline]
pub fn require_str_arg<'a>(
    function: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a str, EvalError> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s),
        other => Err(wrong_arg_type(function, "a string", type_of(other))),
    }
}

/// Extract a numeric argument at the given index, widening integers.
#[inline]
pub fn require_number_arg(function: &str, args: &[Value], index: usize) -> Result<f64, EvalError> {
    match args.get(index) {
        Some(value @ (Value::Int(_) | Value::Float(_))) => Ok(value.as_float().unwrap_or(0.0)),
        other => Err(wrong_arg_type(function, "a number", type_of(other))),
    }
}

/// Extract a callable argument (function or builtin) at the given index.
#[inline]
pub fn require_callable_arg<'a>(
    function: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a Value, EvalError> {
    match args.get(index) {
        Some(value @ (Value::Function(_) | Value::Builtin(_))) => Ok(value),
        other => Err(wrong_arg_type(function, "a function", type_of(other))),
    }
}

fn type_of(value: Option<&Value>) -> &'static str {
    value.map_or("nothing", Value::type_name)
}
