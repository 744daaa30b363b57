//! Ordering of values for sorting.
//!
//! Array `sort()` and table `sortBy` share one comparison so that mixed
//! data (numbers that arrived as strings, for instance) orders the same way
//! in both places.

use std::cmp::Ordering;

use pars_value::Value;

/// How strings take part in numeric comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NumericCoercion {
    /// Strings compare lexically, even when they look numeric.
    Strict,
    /// A string that parses as a number compares as that number.
    #[default]
    ParseStrings,
}

impl NumericCoercion {
    fn number(self, value: &Value) -> Option<f64> {
        match value {
            Value::Int(_) | Value::Float(_) => value.as_float(),
            Value::Str(s) if self == NumericCoercion::ParseStrings => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// Sort class of a value. Everything with a numeric view shares one class,
/// so numbers and numeric strings never interleave with other strings.
fn class_rank(value: &Value, coercion: NumericCoercion) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::Str(_) if coercion.number(value).is_some() => 2,
        Value::Str(_) => 3,
        Value::Array(_) => 4,
        Value::Dict(_) | Value::Error(_) => 5,
        Value::Function(_) | Value::Builtin(_) => 6,
        Value::Extension(_) => 7,
    }
}

/// Total order used by sorting.
///
/// Values first order by class: null, booleans, numbers (with numeric
/// strings under [`NumericCoercion::ParseStrings`]), other strings, then
/// collections and callables. Numbers compare numerically, strings
/// lexically, anything else by its rendering.
pub fn compare_values(a: &Value, b: &Value, coercion: NumericCoercion) -> Ordering {
    let (rank_a, rank_b) = (class_rank(a, coercion), class_rank(b, coercion));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }
    if let (Some(x), Some(y)) = (coercion.number(a), coercion.number(b)) {
        return x.total_cmp(&y);
    }
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.inspect().cmp(&b.inspect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn numbers_compare_numerically() {
        let c = NumericCoercion::Strict;
        assert_eq!(compare_values(&Value::Int(2), &Value::Int(10), c), Ordering::Less);
        assert_eq!(compare_values(&Value::Float(2.5), &Value::Int(2), c), Ordering::Greater);
        assert_eq!(compare_values(&Value::Int(2), &Value::Float(2.0), c), Ordering::Equal);
    }

    #[test]
    fn numeric_strings_follow_policy() {
        let ten = Value::string("10");
        let nine = Value::string("9");
        assert_eq!(
            compare_values(&ten, &nine, NumericCoercion::ParseStrings),
            Ordering::Greater
        );
        assert_eq!(compare_values(&ten, &nine, NumericCoercion::Strict), Ordering::Less);
        assert_eq!(
            compare_values(&Value::string("3"), &Value::Int(20), NumericCoercion::ParseStrings),
            Ordering::Less
        );
    }

    #[test]
    fn numeric_strings_sort_before_other_strings() {
        let c = NumericCoercion::ParseStrings;
        let (nine, ten, alpha) = (Value::string("9"), Value::string("10"), Value::string("1a"));
        assert_eq!(compare_values(&nine, &ten, c), Ordering::Less);
        assert_eq!(compare_values(&ten, &alpha, c), Ordering::Less);
        assert_eq!(compare_values(&nine, &alpha, c), Ordering::Less);
        assert_eq!(compare_values(&Value::Int(100), &alpha, c), Ordering::Less);
    }

    #[test]
    fn mixed_kinds_use_rank() {
        let c = NumericCoercion::ParseStrings;
        assert_eq!(compare_values(&Value::Null, &Value::Int(0), c), Ordering::Less);
        assert_eq!(
            compare_values(&Value::string("apple"), &Value::Int(1), c),
            Ordering::Greater
        );
    }

    proptest! {
        #[test]
        fn integer_order_matches_native(a in any::<i32>(), b in any::<i32>()) {
            let ordering = compare_values(
                &Value::Int(i64::from(a)),
                &Value::Int(i64::from(b)),
                NumericCoercion::default(),
            );
            prop_assert_eq!(ordering, a.cmp(&b));
        }

        #[test]
        fn comparison_is_transitive(
            a in "[a-z0-9]{0,3}",
            b in "[a-z0-9]{0,3}",
            c in "[a-z0-9]{0,3}",
        ) {
            let values = [Value::string(a), Value::string(b), Value::string(c)];
            let cmp = |i: usize, j: usize| {
                compare_values(&values[i], &values[j], NumericCoercion::ParseStrings)
            };
            for (i, j, k) in [(0, 1, 2), (0, 2, 1), (1, 0, 2), (1, 2, 0), (2, 0, 1), (2, 1, 0)] {
                if cmp(i, j) != Ordering::Greater && cmp(j, k) != Ordering::Greater {
                    prop_assert_ne!(cmp(i, k), Ordering::Greater);
                }
            }
        }

        #[test]
        fn comparison_is_antisymmetric(a in "[a-z0-9]{0,4}", b in "[a-z0-9]{0,4}") {
            let (x, y) = (Value::string(a), Value::string(b));
            let forward = compare_values(&x, &y, NumericCoercion::ParseStrings);
            let backward = compare_values(&y, &x, NumericCoercion::ParseStrings);
            prop_assert_eq!(forward, backward.reverse());
        }
    }
}
