//! Array methods.
//!
//! Callbacks run on a snapshot of the elements, so a callback may mutate
//! the array it is iterating.

use pars_ir::Span;
use pars_value::{EvalResult, Shared, Value};

use super::helpers::{
    require_args, require_args_range, require_callable_arg, require_str_arg, ARRAY_METHODS,
};
use super::no_such_method;
use crate::coerce::{compare_values, NumericCoercion};
use crate::exec::expr::length_value;
use crate::Interpreter;

pub(super) fn dispatch(
    interp: &mut Interpreter,
    receiver: &Value,
    items: &Shared<Vec<Value>>,
    method: &str,
    args: &[Value],
    span: Span,
) -> EvalResult {
    match method {
        "length" => {
            require_args("length", 0, args)?;
            Ok(length_value(items.borrow().len()))
        }
        "push" => {
            require_args("push", 1, args)?;
            items.borrow_mut().push(args[0].clone());
            Ok(receiver.clone())
        }
        "map" => {
            require_args("map", 1, args)?;
            let callback = require_callable_arg("map", args, 0)?;
            let snapshot = items.borrow().clone();
            let mut mapped = Vec::with_capacity(snapshot.len());
            for item in snapshot {
                mapped.push(interp.call_value(callback, &[item], span, None, None)?);
            }
            Ok(Value::array(mapped))
        }
        "filter" => {
            require_args("filter", 1, args)?;
            let callback = require_callable_arg("filter", args, 0)?;
            let snapshot = items.borrow().clone();
            let mut kept = Vec::new();
            for item in snapshot {
                let keep = interp.call_value(callback, &[item.clone()], span, None, None)?;
                if keep.is_truthy() {
                    kept.push(item);
                }
            }
            Ok(Value::array(kept))
        }
        "reduce" => {
            require_args("reduce", 2, args)?;
            let callback = require_callable_arg("reduce", args, 0)?;
            let snapshot = items.borrow().clone();
            let mut acc = args[1].clone();
            for item in snapshot {
                acc = interp.call_value(callback, &[acc, item], span, None, None)?;
            }
            Ok(acc)
        }
        "join" => {
            require_args_range("join", 0, 1, args)?;
            let separator = if args.is_empty() {
                ""
            } else {
                require_str_arg("join", args, 0)?
            };
            let joined = items
                .borrow()
                .iter()
                .map(Value::to_display_string)
                .collect::<Vec<_>>()
                .join(separator);
            Ok(Value::string(joined))
        }
        "reverse" => {
            require_args("reverse", 0, args)?;
            let mut reversed = items.borrow().clone();
            reversed.reverse();
            Ok(Value::array(reversed))
        }
        "sort" => {
            require_args("sort", 0, args)?;
            let mut sorted = items.borrow().clone();
            sorted.sort_by(|a, b| compare_values(a, b, NumericCoercion::ParseStrings));
            Ok(Value::array(sorted))
        }
        "contains" => {
            require_args("contains", 1, args)?;
            let found = items.borrow().iter().any(|item| item.equals(&args[0]));
            Ok(Value::Bool(found))
        }
        _ => Err(no_such_method(method, "array", ARRAY_METHODS).into()),
    }
}
