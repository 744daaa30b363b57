//! Binary operator semantics.

use pars_ir::BinaryOp;
use pars_value::{Dictionary, Value};
use pretty_assertions::assert_eq;

use crate::operators::evaluate_binary;

fn eval(left: Value, op: BinaryOp, right: Value) -> Option<Value> {
    evaluate_binary(&left, &right, op).ok()
}

fn error_code(left: Value, op: BinaryOp, right: Value) -> Option<String> {
    evaluate_binary(&left, &right, op)
        .err()
        .map(|e| e.code().to_string())
}

#[test]
fn integer_arithmetic() {
    assert_eq!(eval(Value::Int(2), BinaryOp::Add, Value::Int(3)), Some(Value::Int(5)));
    assert_eq!(eval(Value::Int(5), BinaryOp::Sub, Value::Int(8)), Some(Value::Int(-3)));
    assert_eq!(eval(Value::Int(7), BinaryOp::Div, Value::Int(2)), Some(Value::Int(3)));
    assert_eq!(eval(Value::Int(7), BinaryOp::Mod, Value::Int(2)), Some(Value::Int(1)));
}

#[test]
fn mixed_arithmetic_widens_to_float() {
    assert_eq!(
        eval(Value::Int(1), BinaryOp::Add, Value::Float(0.5)),
        Some(Value::Float(1.5))
    );
    assert_eq!(
        eval(Value::Float(3.0), BinaryOp::Mul, Value::Int(50)),
        Some(Value::Float(150.0))
    );
}

#[test]
fn zero_divisors_are_value_errors() {
    assert_eq!(
        error_code(Value::Int(1), BinaryOp::Div, Value::Int(0)),
        Some("OP-0002".to_string())
    );
    assert_eq!(
        error_code(Value::Int(1), BinaryOp::Mod, Value::Int(0)),
        Some("OP-0006".to_string())
    );
    assert_eq!(
        error_code(Value::Float(1.0), BinaryOp::Div, Value::Float(0.0)),
        Some("OP-0002".to_string())
    );
}

#[test]
fn overflow_is_reported() {
    assert_eq!(
        error_code(Value::Int(i64::MAX), BinaryOp::Add, Value::Int(1)),
        Some("VALUE-0004".to_string())
    );
}

#[test]
fn string_concatenation_coerces() {
    assert_eq!(
        eval(Value::string("n="), BinaryOp::Add, Value::Int(3)),
        Some(Value::string("n=3"))
    );
    assert_eq!(
        eval(Value::Float(2.0), BinaryOp::Add, Value::string("x")),
        Some(Value::string("2x"))
    );
    let error = Value::error(crate::errors::division_by_zero());
    assert_eq!(
        eval(Value::string("failed: "), BinaryOp::Add, error),
        Some(Value::string("failed: Division by zero"))
    );
}

#[test]
fn comparisons() {
    assert_eq!(eval(Value::Int(1), BinaryOp::Lt, Value::Int(2)), Some(Value::Bool(true)));
    assert_eq!(
        eval(Value::Float(2.5), BinaryOp::GtEq, Value::Int(3)),
        Some(Value::Bool(false))
    );
    assert_eq!(
        eval(Value::string("a"), BinaryOp::Lt, Value::string("b")),
        Some(Value::Bool(true))
    );
    assert_eq!(
        eval(Value::Int(1), BinaryOp::Eq, Value::Float(1.0)),
        Some(Value::Bool(true))
    );
    assert_eq!(
        eval(Value::Null, BinaryOp::NotEq, Value::Bool(false)),
        Some(Value::Bool(true))
    );
}

#[test]
fn mismatched_operands_name_both_types() {
    let err = evaluate_binary(&Value::Int(1), &Value::array(vec![]), BinaryOp::Sub).err();
    assert_eq!(
        err.map(|e| e.message),
        Some("Unknown operator: integer - array".to_string())
    );
}

#[test]
fn membership() {
    let items = Value::array(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(eval(Value::Int(2), BinaryOp::In, items.clone()), Some(Value::Bool(true)));
    assert_eq!(eval(Value::Int(3), BinaryOp::In, items), Some(Value::Bool(false)));
    assert_eq!(
        eval(Value::string("ell"), BinaryOp::In, Value::string("hello")),
        Some(Value::Bool(true))
    );
    let mut dict = Dictionary::new();
    dict.insert_value("k", Value::Null);
    assert_eq!(
        eval(Value::string("k"), BinaryOp::In, Value::dict(dict)),
        Some(Value::Bool(true))
    );
}

#[test]
fn concat() {
    let joined = eval(
        Value::array(vec![Value::Int(1)]),
        BinaryOp::Concat,
        Value::array(vec![Value::Int(2)]),
    );
    assert_eq!(joined.map(|v| v.inspect()), Some("[1, 2]".to_string()));
    let appended = eval(Value::array(vec![]), BinaryOp::Concat, Value::string("x"));
    assert_eq!(appended.map(|v| v.inspect()), Some(r#"["x"]"#.to_string()));

    let mut left = Dictionary::new();
    left.insert_value("a", Value::Int(1));
    left.insert_value("b", Value::Int(2));
    let mut right = Dictionary::new();
    right.insert_value("b", Value::Int(3));
    let merged = eval(Value::dict(left), BinaryOp::Concat, Value::dict(right));
    assert_eq!(merged.map(|v| v.inspect()), Some("{a: 1, b: 3}".to_string()));
}
