//! Dictionary methods. Error values use them over their view.

use pars_value::{Dictionary, EvalResult, Value};

use super::helpers::{require_args, require_str_arg, DICT_METHODS};
use super::no_such_method;
use crate::exec::expr::length_value;
use crate::Interpreter;

pub(super) fn dispatch(
    interp: &mut Interpreter,
    dict: &Dictionary,
    type_name: &str,
    method: &str,
    args: &[Value],
) -> EvalResult {
    match method {
        "keys" => {
            require_args("keys", 0, args)?;
            Ok(Value::array(dict.keys().map(Value::from).collect()))
        }
        "values" => {
            require_args("values", 0, args)?;
            let mut values = Vec::with_capacity(dict.len());
            for (_, binding) in dict.iter() {
                values.push(binding.force(interp)?);
            }
            Ok(Value::array(values))
        }
        "entries" => {
            require_args("entries", 0, args)?;
            let mut entries = Vec::with_capacity(dict.len());
            for (key, binding) in dict.iter() {
                let mut entry = Dictionary::new();
                entry.insert_value("key", Value::from(key));
                entry.insert_value("value", binding.force(interp)?);
                entries.push(Value::dict(entry));
            }
            Ok(Value::array(entries))
        }
        "has" => {
            require_args("has", 1, args)?;
            let key = require_str_arg("has", args, 0)?;
            Ok(Value::Bool(dict.contains_key(key)))
        }
        "length" => {
            require_args("length", 0, args)?;
            Ok(length_value(dict.len()))
        }
        _ => Err(no_such_method(method, type_name, DICT_METHODS).into()),
    }
}
