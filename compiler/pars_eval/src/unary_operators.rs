//! Prefix operators.

use pars_ir::UnaryOp;
use pars_value::{EvalError, Value};

use crate::errors::{integer_overflow, invalid_prefix_op};

/// Evaluate `op operand`. Negation needs a number; `!` works on any value
/// through truthiness.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> Result<Value, EvalError> {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Neg, value) => Err(invalid_prefix_op(op.as_symbol(), value.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pars_value::ErrorClass;
    use pretty_assertions::assert_eq;

    #[test]
    fn negation() {
        assert_eq!(evaluate_unary(&Value::Int(5), UnaryOp::Neg).ok(), Some(Value::Int(-5)));
        assert_eq!(
            evaluate_unary(&Value::Float(1.5), UnaryOp::Neg).ok(),
            Some(Value::Float(-1.5))
        );
    }

    #[test]
    fn negating_min_overflows() {
        let err = evaluate_unary(&Value::Int(i64::MIN), UnaryOp::Neg).err();
        assert_eq!(err.as_ref().map(EvalError::code), Some("VALUE-0004"));
        assert_eq!(err.map(|e| e.class()), Some(ErrorClass::Value));
    }

    #[test]
    fn not_uses_truthiness() {
        assert_eq!(evaluate_unary(&Value::Null, UnaryOp::Not).ok(), Some(Value::Bool(true)));
        assert_eq!(evaluate_unary(&Value::Int(0), UnaryOp::Not).ok(), Some(Value::Bool(false)));
        assert_eq!(
            evaluate_unary(&Value::string(""), UnaryOp::Not).ok(),
            Some(Value::Bool(false))
        );
    }

    #[test]
    fn negating_a_string_is_a_type_error() {
        let err = evaluate_unary(&Value::string("x"), UnaryOp::Neg).err();
        assert_eq!(
            err.map(|e| e.message),
            Some("Unknown prefix operator: -string".to_string())
        );
    }
}
