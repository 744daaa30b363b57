//! String methods.

use pars_value::{EvalResult, Value};

use super::helpers::{require_args, require_str_arg, STRING_METHODS};
use super::no_such_method;
use crate::exec::expr::length_value;

pub(super) fn dispatch(s: &str, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "length" => {
            require_args("length", 0, args)?;
            Ok(length_value(s.chars().count()))
        }
        "toUpper" => {
            require_args("toUpper", 0, args)?;
            Ok(Value::string(s.to_uppercase()))
        }
        "toLower" => {
            require_args("toLower", 0, args)?;
            Ok(Value::string(s.to_lowercase()))
        }
        "trim" => {
            require_args("trim", 0, args)?;
            Ok(Value::from(s.trim()))
        }
        "split" => {
            require_args("split", 1, args)?;
            let separator = require_str_arg("split", args, 0)?;
            let parts = if separator.is_empty() {
                s.chars().map(|c| Value::string(c.to_string())).collect()
            } else {
                s.split(separator).map(Value::from).collect()
            };
            Ok(Value::array(parts))
        }
        "contains" => {
            require_args("contains", 1, args)?;
            let needle = require_str_arg("contains", args, 0)?;
            Ok(Value::Bool(s.contains(needle)))
        }
        _ => Err(no_such_method(method, "string", STRING_METHODS).into()),
    }
}
