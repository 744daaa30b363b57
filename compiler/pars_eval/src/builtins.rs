//! Global builtin functions and the prelude that binds them.
//!
//! Builtins are referenced by key (`"len"`, `"math.floor"`) so that a
//! [`Value::Builtin`] stays `Copy` and comparable. [`resolve`] maps a key
//! to its implementation; namespaced keys belong to the standard library.

use pars_ir::{Span, StringInterner};
use pars_value::{Binding, Dictionary, Environment, EvalResult, Mutability, Value};

use crate::errors::{
    invalid_conversion, invalid_time, user_failure, wrong_arg_count, wrong_arg_type,
};
use crate::exec::expr::length_value;
use crate::methods::helpers::{require_args, require_str_arg};
use crate::{stdlib, Interpreter};

/// Native function: receives already evaluated arguments.
pub type BuiltinFn = fn(&mut Interpreter, &[Value], Span) -> EvalResult;

/// Code of a `fail` without an explicit one.
const USER_FAILURE_CODE: &str = "USER-0001";

/// Global builtins, in prelude order.
const GLOBALS: &[(&str, BuiltinFn)] = &[
    ("len", builtin_len),
    ("fail", builtin_fail),
    ("print", builtin_print),
    ("log", builtin_log),
    ("toString", builtin_to_string),
    ("toInt", builtin_to_int),
    ("toFloat", builtin_to_float),
    ("toNumber", builtin_to_number),
    ("type", builtin_type),
    ("time", builtin_time),
];

/// Bind every global builtin in `prelude` as a protected name.
pub fn install_prelude(prelude: &Environment, interner: &StringInterner) {
    for (key, _) in GLOBALS {
        prelude.define_fresh(
            interner.intern(key),
            Binding::eager(Value::builtin(*key)),
            Mutability::Protected,
        );
    }
}

/// Implementation behind a builtin key.
pub fn resolve(key: &str) -> Option<BuiltinFn> {
    GLOBALS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, call)| *call)
        .or_else(|| stdlib::resolve(key))
}

/// `len(x)`: characters of a string, elements of an array, fields of a
/// dictionary.
fn builtin_len(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("len", 1, args)?;
    match &args[0] {
        Value::Str(s) => Ok(length_value(s.chars().count())),
        Value::Array(items) => Ok(length_value(items.borrow().len())),
        Value::Dict(dict) => Ok(length_value(dict.borrow().len())),
        Value::Error(err) => Ok(length_value(err.view().len())),
        other => Err(wrong_arg_type("len", "a string, array or dictionary", other.type_name()).into()),
    }
}

/// `fail(message)` / `fail({message, code, ...})`.
///
/// Raises a catchable user error. A dictionary must carry a string
/// `message` and, when given, a string `code` (default `USER-0001`). Extra
/// fields are kept in order for `try` to expose.
fn builtin_fail(interp: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("fail", 1, args)?;
    match &args[0] {
        Value::Str(message) => {
            let mut payload = Dictionary::new();
            payload.insert_value("message", Value::Str(message.clone()));
            payload.insert_value("code", Value::string(USER_FAILURE_CODE));
            Err(user_failure(message, USER_FAILURE_CODE, payload).into())
        }
        Value::Dict(dict) => {
            let fields = dict.borrow().clone();
            fail_with_fields(interp, &fields)
        }
        // A caught error re-raised: its view is already a dictionary.
        Value::Error(err) => fail_with_fields(interp, &err.view()),
        other => Err(wrong_arg_type("fail", "a string or dictionary", other.type_name()).into()),
    }
}

fn fail_with_fields(interp: &mut Interpreter, fields: &Dictionary) -> EvalResult {
    let mut payload = Dictionary::new();
    for (key, binding) in fields.iter() {
        payload.insert_value(key, binding.force(interp)?);
    }
    let message = match payload.get("message").and_then(Binding::peek) {
        Some(Value::Str(message)) => message.to_string(),
        other => {
            let got = other.map_or("null", Value::type_name);
            return Err(wrong_arg_type("fail", "a dictionary with a string message", got).into());
        }
    };
    let code = match payload.get("code").and_then(Binding::peek) {
        Some(Value::Str(code)) => code.to_string(),
        None | Some(Value::Null) => USER_FAILURE_CODE.to_string(),
        Some(other) => {
            return Err(wrong_arg_type("fail", "a string code", other.type_name()).into());
        }
    };
    payload.insert_value("code", Value::string(code.as_str()));
    Err(user_failure(&message, &code, payload).into())
}

/// `print(a, b, ...)`: display strings, concatenated, one line.
fn builtin_print(interp: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    if args.is_empty() {
        return Err(wrong_arg_count("print", 1, 0).into());
    }
    let mut line = String::new();
    for arg in args {
        line.push_str(&interp.resolve_deep(arg)?.to_display_string());
    }
    interp.print_handler().println(&line);
    Ok(Value::Null)
}

/// `log(label, values...)`: a leading string prints raw, everything else
/// in its inspected form.
fn builtin_log(interp: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    let mut line = String::new();
    let leading_label = matches!(args.first(), Some(Value::Str(_)));
    for (i, arg) in args.iter().enumerate() {
        let arg = interp.resolve_deep(arg)?;
        match (i, &arg) {
            (0, Value::Str(s)) => line.push_str(s),
            (0, _) => line.push_str(&arg.inspect()),
            (1, _) if leading_label => {
                line.push(' ');
                line.push_str(&arg.inspect());
            }
            _ => {
                line.push_str(", ");
                line.push_str(&arg.inspect());
            }
        }
    }
    interp.print_handler().println(&line);
    Ok(Value::Null)
}

/// `toString(a, b, ...)`: concatenated display strings.
fn builtin_to_string(interp: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    let mut out = String::new();
    for arg in args {
        out.push_str(&interp.resolve_deep(arg)?.to_display_string());
    }
    Ok(Value::string(out))
}

fn builtin_to_int(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("toInt", 1, args)?;
    let text = require_str_arg("toInt", args, 0)?;
    text.trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| invalid_conversion("integer", text).into())
}

fn builtin_to_float(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("toFloat", 1, args)?;
    let text = require_str_arg("toFloat", args, 0)?;
    text.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| invalid_conversion("float", text).into())
}

/// `toNumber(s)`: an integer unless the text has a decimal point or does
/// not fit, otherwise a float.
fn builtin_to_number(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("toNumber", 1, args)?;
    let text = require_str_arg("toNumber", args, 0)?;
    let trimmed = text.trim();
    if !trimmed.contains('.') {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Value::Int(n));
        }
    }
    trimmed
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| invalid_conversion("number", text).into())
}

fn builtin_type(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("type", 1, args)?;
    Ok(Value::from(args[0].type_name()))
}

/// `time(s)`: parse a time of day such as `15:45`, `15:45:30`, `3:45 PM`
/// or `3pm` into `{kind: "time", hour, minute, second}`.
fn builtin_time(_: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("time", 1, args)?;
    let text = require_str_arg("time", args, 0)?;
    let (hour, minute, second) = parse_time_of_day(text).ok_or_else(|| invalid_time(text))?;
    let mut dict = Dictionary::new();
    dict.insert_value("kind", Value::from("time"));
    dict.insert_value("hour", Value::Int(hour));
    dict.insert_value("minute", Value::Int(minute));
    dict.insert_value("second", Value::Int(second));
    Ok(Value::dict(dict))
}

/// `(hour, minute, second)` in 24-hour form.
fn parse_time_of_day(text: &str) -> Option<(i64, i64, i64)> {
    let text = text.trim().to_ascii_lowercase();
    let (clock, meridiem) = if let Some(rest) = text.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = text.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else {
        (text.as_str(), None)
    };

    let mut parts = clock.split(':');
    let hour: i64 = parts.next()?.parse().ok()?;
    let minute: i64 = match parts.next() {
        Some(part) => part.parse().ok()?,
        // A bare hour needs am/pm.
        None if meridiem.is_some() => 0,
        None => return None,
    };
    let second: i64 = match parts.next() {
        // Fractional seconds are accepted and truncated.
        Some(part) => part.split('.').next()?.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || !(0..60).contains(&minute) || !(0..60).contains(&second) {
        return None;
    }
    let hour = match meridiem {
        Some(pm) if (1..=12).contains(&hour) => hour % 12 + if pm { 12 } else { 0 },
        Some(_) => return None,
        None if (0..24).contains(&hour) => hour,
        None => return None,
    };
    Some((hour, minute, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_times_of_day() {
        assert_eq!(parse_time_of_day("15:45"), Some((15, 45, 0)));
        assert_eq!(parse_time_of_day("15:45:30.123"), Some((15, 45, 30)));
        assert_eq!(parse_time_of_day("3:45 PM"), Some((15, 45, 0)));
        assert_eq!(parse_time_of_day("12:05am"), Some((0, 5, 0)));
        assert_eq!(parse_time_of_day("12pm"), Some((12, 0, 0)));
        assert_eq!(parse_time_of_day(" 3 pm "), Some((15, 0, 0)));
    }

    #[test]
    fn rejects_malformed_times() {
        assert_eq!(parse_time_of_day("soon"), None);
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(parse_time_of_day("13:00 pm"), None);
        assert_eq!(parse_time_of_day("10:61"), None);
        assert_eq!(parse_time_of_day("7"), None);
        assert_eq!(parse_time_of_day(""), None);
    }

    #[test]
    fn every_global_resolves() {
        for (key, _) in GLOBALS {
            assert!(resolve(key).is_some(), "{key}");
        }
        assert!(resolve("nope").is_none());
    }
}
