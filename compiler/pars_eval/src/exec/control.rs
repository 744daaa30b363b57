//! Control flow plumbing: block results, loop signals, iteration sources
//! and function-boundary exits.

use pars_value::{ControlAction, EvalError, EvalResult, ThunkForcer, Value};

use crate::errors::{not_iterable, skip_outside_loop, stop_outside_loop};

/// Collects the values of the statements of a block.
///
/// `null` results are dropped. No value makes the block `null`, one value
/// is the block's value, several become an array in statement order.
#[derive(Default)]
pub struct ResultStream {
    values: Vec<Value>,
}

impl ResultStream {
    pub fn push(&mut self, value: Value) {
        if !value.is_null() {
            self.values.push(value);
        }
    }

    pub fn finish(mut self) -> Value {
        match self.values.len() {
            0 => Value::Null,
            1 => self.values.pop().unwrap_or(Value::Null),
            _ => Value::array(self.values),
        }
    }
}

/// What a loop does after one iteration.
#[derive(Debug)]
pub enum LoopAction {
    /// The iteration produced a value.
    Yield(Value),
    /// `skip`: nothing collected, continue.
    Skip,
    /// `stop`: nothing collected, leave the loop.
    Stop,
    /// `return`, a failing `check`, or an error: leave the loop and
    /// propagate.
    Exit(ControlAction),
}

/// Classify the outcome of one loop body evaluation.
pub fn to_loop_action(result: EvalResult) -> LoopAction {
    match result {
        Ok(value) => LoopAction::Yield(value),
        Err(ControlAction::Skip) => LoopAction::Skip,
        Err(ControlAction::Stop) => LoopAction::Stop,
        Err(other) => LoopAction::Exit(other),
    }
}

/// Settle a body at a function, thunk or program boundary.
///
/// `return` and `check` exits become the body's value; `stop` and `skip`
/// reached no loop and become errors.
pub fn finish_body(result: EvalResult) -> Result<Value, EvalError> {
    match result {
        Ok(value) | Err(ControlAction::Return(value) | ControlAction::CheckExit(value)) => Ok(value),
        Err(ControlAction::Stop) => Err(stop_outside_loop()),
        Err(ControlAction::Skip) => Err(skip_outside_loop()),
        Err(ControlAction::Error(err)) => Err(*err),
    }
}

/// The `(key, value)` pairs a `for` loop walks.
///
/// - arrays: `(index, element)`
/// - strings: `(index, character)`
/// - dictionaries: `(key, value)` in insertion order, thunks forced
/// - errors: their dictionary view
///
/// Arrays and dictionaries are snapshotted, so the body may mutate them.
pub fn iteration_items<F>(source: &Value, forcer: &mut F) -> Result<Vec<(Value, Value)>, ControlAction>
where
    F: ThunkForcer + ?Sized,
{
    let dict = match source {
        Value::Array(items) => {
            return Ok(items
                .borrow()
                .iter()
                .enumerate()
                .map(|(i, item)| (index_value(i), item.clone()))
                .collect());
        }
        Value::Str(s) => {
            return Ok(s
                .chars()
                .enumerate()
                .map(|(i, c)| (index_value(i), Value::string(c.to_string())))
                .collect());
        }
        Value::Dict(dict) => dict.borrow().clone(),
        Value::Error(err) => err.view(),
        other => return Err(not_iterable(other.type_name()).into()),
    };
    let mut items = Vec::with_capacity(dict.len());
    for (key, binding) in dict.iter() {
        items.push((Value::from(key), binding.force(forcer)?));
    }
    Ok(items)
}

fn index_value(i: usize) -> Value {
    Value::Int(i64::try_from(i).unwrap_or(i64::MAX))
}
