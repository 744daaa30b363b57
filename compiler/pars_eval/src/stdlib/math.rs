//! `@std/math`.

use pars_ir::Span;
use pars_value::{ControlAction, Dictionary, EvalResult, Value};

use crate::builtins::BuiltinFn;
use crate::errors::{empty_collection, integer_overflow, invalid_argument_value, wrong_arg_type};
use crate::methods::helpers::{require_args, require_args_range, require_number_arg};
use crate::Interpreter;

const FUNCTIONS: &[(&str, &str, BuiltinFn)] = &[
    ("floor", "math.floor", floor),
    ("ceil", "math.ceil", ceil),
    ("round", "math.round", round),
    ("abs", "math.abs", abs),
    ("sqrt", "math.sqrt", sqrt),
    ("min", "math.min", min),
    ("max", "math.max", max),
    ("sum", "math.sum", sum),
];

pub(super) fn exports() -> Dictionary {
    let mut exports = Dictionary::new();
    exports.insert_value("PI", Value::Float(std::f64::consts::PI));
    for (name, key, _) in FUNCTIONS {
        exports.insert_value(*name, Value::builtin(*key));
    }
    exports
}

pub(super) fn resolve(name: &str) -> Option<BuiltinFn> {
    FUNCTIONS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, _, call)| *call)
}

/// Float to integer, saturating at the `i64` bounds.
#[expect(
    clippy::cast_possible_truncation,
    reason = "rounding functions return integers and saturate like `as` does"
)]
fn to_int(f: f64) -> Value {
    Value::Int(f as i64)
}

/// Integral results become integers, everything else stays float.
#[expect(
    clippy::float_cmp,
    clippy::cast_precision_loss,
    reason = "exact integrality test against the i64 range"
)]
fn number_result(f: f64) -> Value {
    if f.trunc() == f && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        to_int(f)
    } else {
        Value::Float(f)
    }
}

fn floor(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("math.floor", 1, args)?;
    Ok(to_int(require_number_arg("math.floor", args, 0)?.floor()))
}

fn ceil(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("math.ceil", 1, args)?;
    Ok(to_int(require_number_arg("math.ceil", args, 0)?.ceil()))
}

/// `round(x)` gives an integer; `round(x, digits)` a float with that many
/// decimals.
fn round(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args_range("math.round", 1, 2, args)?;
    let x = require_number_arg("math.round", args, 0)?;
    match args.get(1) {
        None => Ok(to_int(x.round())),
        Some(Value::Int(digits)) => {
            let digits = i32::try_from(*digits)
                .map_err(|_| invalid_argument_value("math.round", "too many decimal places"))?;
            let scale = 10f64.powi(digits);
            Ok(Value::Float((x * scale).round() / scale))
        }
        Some(other) => Err(wrong_arg_type("math.round", "an integer", other.type_name()).into()),
    }
}

fn abs(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("math.abs", 1, args)?;
    match &args[0] {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("abs").into()),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(wrong_arg_type("math.abs", "a number", other.type_name()).into()),
    }
}

fn sqrt(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("math.sqrt", 1, args)?;
    let x = require_number_arg("math.sqrt", args, 0)?;
    if x < 0.0 {
        return Err(invalid_argument_value(
            "math.sqrt",
            "cannot take square root of negative number",
        )
        .into());
    }
    Ok(number_result(x.sqrt()))
}

/// Numbers from either one array argument or two number arguments.
fn operands(function: &str, args: &[Value]) -> Result<Vec<f64>, ControlAction> {
    require_args_range(function, 1, 2, args)?;
    if args.len() == 2 {
        return Ok(vec![
            require_number_arg(function, args, 0)?,
            require_number_arg(function, args, 1)?,
        ]);
    }
    let Value::Array(items) = &args[0] else {
        return Err(wrong_arg_type(function, "an array or two numbers", args[0].type_name()).into());
    };
    let items = items.borrow();
    let mut numbers = Vec::with_capacity(items.len());
    for item in items.iter() {
        match item.as_float() {
            Some(n) => numbers.push(n),
            None => {
                return Err(
                    wrong_arg_type(function, "an array of numbers", item.type_name()).into(),
                )
            }
        }
    }
    Ok(numbers)
}

fn min(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    let numbers = operands("math.min", args)?;
    numbers
        .into_iter()
        .reduce(f64::min)
        .map(number_result)
        .ok_or_else(|| empty_collection("math.min").into())
}

fn max(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    let numbers = operands("math.max", args)?;
    numbers
        .into_iter()
        .reduce(f64::max)
        .map(number_result)
        .ok_or_else(|| empty_collection("math.max").into())
}

/// `sum([])` is `0`.
fn sum(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    let numbers = operands("math.sum", args)?;
    Ok(number_result(numbers.into_iter().sum()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integral_results_become_integers() {
        assert_eq!(number_result(3.0), Value::Int(3));
        assert!(matches!(number_result(2.5), Value::Float(_)));
        assert!(matches!(number_result(f64::NAN), Value::Float(_)));
    }

    #[test]
    fn exports_are_ordered() {
        let keys: Vec<_> = exports().keys().map(str::to_string).collect();
        assert_eq!(
            keys,
            vec!["PI", "floor", "ceil", "round", "abs", "sqrt", "min", "max", "sum"]
        );
    }
}
