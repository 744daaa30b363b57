//! Binary operators.
//!
//! Direct enum dispatch on the operand kinds. The interpreter handles the
//! short-circuit operators before reaching this module and resolves
//! dictionaries before equality, so everything here is pure.

use pars_ir::BinaryOp;
use pars_value::{Dictionary, EvalError, Value};

use crate::errors::{division_by_zero, integer_overflow, invalid_binary_op, modulo_by_zero};

type OpResult = Result<Value, EvalError>;

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> OpResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate `left op right`.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left.equals(right))),
        BinaryOp::NotEq => return Ok(Value::Bool(!left.equals(right))),
        BinaryOp::And => return Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => return Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        BinaryOp::In => return eval_membership(left, right),
        BinaryOp::Concat => return eval_concat(left, right),
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (left.as_float(), right.as_float()) {
                (Some(a), Some(b)) => eval_float_binary(a, b, op),
                _ => Err(mismatch(left, op, right)),
            }
        }
        (Value::Str(_), _) | (_, Value::Str(_)) if op == BinaryOp::Add => Ok(Value::string(
            format!("{}{}", left.to_display_string(), right.to_display_string()),
        )),
        (Value::Str(a), Value::Str(b)) => eval_string_compare(a, b, op)
            .map(Value::Bool)
            .ok_or_else(|| mismatch(left, op, right)),
        _ => Err(mismatch(left, op, right)),
    }
}

#[cold]
fn mismatch(left: &Value, op: BinaryOp, right: &Value) -> EvalError {
    invalid_binary_op(left.type_name(), op.as_symbol(), right.type_name())
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(a.checked_rem(b), "modulo")
            }
        }
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op("integer", op.as_symbol(), "integer")),
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a / b))
            }
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                Err(modulo_by_zero())
            } else {
                Ok(Value::Float(a % b))
            }
        }
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op("float", op.as_symbol(), "float")),
    }
}

fn eval_string_compare(a: &str, b: &str, op: BinaryOp) -> Option<bool> {
    match op {
        BinaryOp::Lt => Some(a < b),
        BinaryOp::LtEq => Some(a <= b),
        BinaryOp::Gt => Some(a > b),
        BinaryOp::GtEq => Some(a >= b),
        _ => None,
    }
}

/// `needle in haystack`
fn eval_membership(needle: &Value, haystack: &Value) -> OpResult {
    let found = match (needle, haystack) {
        (_, Value::Array(items)) => items.borrow().iter().any(|item| item.equals(needle)),
        (Value::Str(sub), Value::Str(text)) => text.contains(&**sub),
        (Value::Str(key), Value::Dict(dict)) => dict.borrow().contains_key(key),
        (Value::Str(key), Value::Error(error)) => error.view().contains_key(key),
        _ => return Err(mismatch(needle, BinaryOp::In, haystack)),
    };
    Ok(Value::Bool(found))
}

/// `left ++ right`: arrays concatenate (a non-array side is appended or
/// prepended), strings join, dictionaries merge with the right side winning.
fn eval_concat(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Array(a), Value::Array(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::array(items))
        }
        (Value::Array(a), other) => {
            let mut items = a.borrow().clone();
            items.push(other.clone());
            Ok(Value::array(items))
        }
        (other, Value::Array(b)) => {
            let mut items = Vec::with_capacity(b.borrow().len() + 1);
            items.push(other.clone());
            items.extend(b.borrow().iter().cloned());
            Ok(Value::array(items))
        }
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{a}{b}"))),
        (Value::Dict(a), Value::Dict(b)) => {
            let mut merged: Dictionary = a.borrow().clone();
            for (key, binding) in b.borrow().iter() {
                merged.insert(key, binding.clone());
            }
            Ok(Value::dict(merged))
        }
        _ => Err(mismatch(left, BinaryOp::Concat, right)),
    }
}
