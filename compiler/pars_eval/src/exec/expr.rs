//! Indexing, field access and assignment through them.

use pars_value::{ControlAction, EvalError, EvalResult, ThunkForcer, Value};

use crate::errors::{cannot_index, index_out_of_range, unknown_property, wrong_arg_type};

/// Resolve a possibly negative index against a length.
fn resolve_index(index: i64, length: usize) -> Result<usize, EvalError> {
    let len = i64::try_from(length).unwrap_or(i64::MAX);
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).map_err(|_| index_out_of_range(index, length))
    } else {
        Err(index_out_of_range(index, length))
    }
}

/// `receiver[index]`.
///
/// Arrays and strings take integer indexes, negative ones counting from
/// the end. Dictionaries (and error views) take string keys; a missing key
/// reads as `null`.
pub fn index_value<F>(receiver: &Value, index: &Value, forcer: &mut F) -> EvalResult
where
    F: ThunkForcer + ?Sized,
{
    match (receiver, index) {
        (Value::Array(items), Value::Int(i)) => {
            let items = items.borrow();
            let at = resolve_index(*i, items.len())?;
            Ok(items[at].clone())
        }
        (Value::Str(s), Value::Int(i)) => {
            let count = s.chars().count();
            let at = resolve_index(*i, count)?;
            Ok(s.chars()
                .nth(at)
                .map_or(Value::Null, |c| Value::string(c.to_string())))
        }
        (Value::Dict(dict), Value::Str(key)) => {
            let binding = dict.borrow().get(key).cloned();
            match binding {
                Some(binding) => binding.force(forcer),
                None => Ok(Value::Null),
            }
        }
        (Value::Error(err), Value::Str(key)) => Ok(err
            .view()
            .get(key)
            .and_then(|binding| binding.peek().cloned())
            .unwrap_or(Value::Null)),
        _ => Err(cannot_index(receiver.type_name(), index.type_name()).into()),
    }
}

/// `receiver.name`.
///
/// Dictionaries read the key (missing keys are `null`), errors read their
/// view, arrays and strings expose `length`, extensions answer through
/// [`pars_value::Extension::field`].
pub fn field_value<F>(receiver: &Value, name: &str, forcer: &mut F) -> EvalResult
where
    F: ThunkForcer + ?Sized,
{
    let found = match receiver {
        Value::Dict(dict) => {
            let binding = dict.borrow().get(name).cloned();
            return match binding {
                Some(binding) => binding.force(forcer),
                None => Ok(Value::Null),
            };
        }
        Value::Error(err) => {
            return Ok(err
                .view()
                .get(name)
                .and_then(|binding| binding.peek().cloned())
                .unwrap_or(Value::Null));
        }
        Value::Array(items) if name == "length" => Some(length_value(items.borrow().len())),
        Value::Str(s) if name == "length" => Some(length_value(s.chars().count())),
        Value::Extension(ext) => ext.field(name),
        _ => None,
    };
    found.ok_or_else(|| unknown_property(name, receiver.type_name()).into())
}

pub(crate) fn length_value(len: usize) -> Value {
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}

/// `receiver[index] = value`. Arrays and dictionaries are updated in
/// place, so every holder of the handle sees the change.
pub fn assign_index(receiver: &Value, index: &Value, value: Value) -> Result<(), ControlAction> {
    match (receiver, index) {
        (Value::Array(items), Value::Int(i)) => {
            let mut items = items.borrow_mut();
            let at = resolve_index(*i, items.len())?;
            items[at] = value;
            Ok(())
        }
        (Value::Dict(dict), Value::Str(key)) => {
            dict.borrow_mut().insert_value(key.as_ref(), value);
            Ok(())
        }
        (Value::Dict(_), other) => {
            Err(wrong_arg_type("dictionary key", "a string", other.type_name()).into())
        }
        _ => Err(cannot_index(receiver.type_name(), index.type_name()).into()),
    }
}

/// `receiver.name = value`. Only dictionaries have assignable fields.
pub fn assign_field(receiver: &Value, name: &str, value: Value) -> Result<(), ControlAction> {
    match receiver {
        Value::Dict(dict) => {
            dict.borrow_mut().insert_value(name, value);
            Ok(())
        }
        other => Err(unknown_property(name, other.type_name()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pars_value::{Dictionary, Thunk};
    use pretty_assertions::assert_eq;

    /// Never called: these tests only read eager bindings.
    struct NoThunks;

    impl ThunkForcer for NoThunks {
        fn force_thunk(&mut self, _thunk: &Thunk) -> EvalResult {
            Ok(Value::Null)
        }
    }

    fn code(result: EvalResult) -> Option<String> {
        match result {
            Err(ControlAction::Error(err)) => Some(err.code().to_string()),
            _ => None,
        }
    }

    #[test]
    fn array_indexes_count_from_both_ends() {
        let array = Value::array(vec![Value::Int(10), Value::Int(20), Value::Int(30)]);
        let read = |i| index_value(&array, &Value::Int(i), &mut NoThunks).ok();
        assert_eq!(read(0), Some(Value::Int(10)));
        assert_eq!(read(-1), Some(Value::Int(30)));
        assert_eq!(read(-3), Some(Value::Int(10)));
        assert_eq!(
            code(index_value(&array, &Value::Int(3), &mut NoThunks)),
            Some("INDEX-0001".to_string())
        );
        assert_eq!(
            code(index_value(&array, &Value::Int(-4), &mut NoThunks)),
            Some("INDEX-0001".to_string())
        );
    }

    #[test]
    fn string_indexes_by_character() {
        let s = Value::string("héllo");
        assert_eq!(
            index_value(&s, &Value::Int(1), &mut NoThunks).ok(),
            Some(Value::string("é"))
        );
        assert_eq!(
            field_value(&s, "length", &mut NoThunks).ok(),
            Some(Value::Int(5))
        );
    }

    #[test]
    fn missing_dictionary_key_is_null() {
        let mut dict = Dictionary::new();
        dict.insert_value("a", Value::Int(1));
        let dict = Value::dict(dict);
        assert_eq!(
            index_value(&dict, &Value::string("a"), &mut NoThunks).ok(),
            Some(Value::Int(1))
        );
        assert_eq!(
            field_value(&dict, "zzz", &mut NoThunks).ok(),
            Some(Value::Null)
        );
    }

    #[test]
    fn bad_receivers() {
        assert_eq!(
            code(index_value(&Value::Int(1), &Value::Int(0), &mut NoThunks)),
            Some("TYPE-0008".to_string())
        );
        assert_eq!(
            code(field_value(&Value::Int(1), "x", &mut NoThunks)),
            Some("UNDEF-0004".to_string())
        );
    }

    #[test]
    fn assignment_mutates_shared_handles() {
        let array = Value::array(vec![Value::Int(1), Value::Int(2)]);
        let alias = array.clone();
        assert!(assign_index(&array, &Value::Int(-1), Value::Int(9)).is_ok());
        assert_eq!(alias.inspect(), "[1, 9]");

        let dict = Value::dict(Dictionary::new());
        assert!(assign_field(&dict, "x", Value::Int(1)).is_ok());
        assert!(assign_index(&dict, &Value::string("y"), Value::Int(2)).is_ok());
        assert_eq!(dict.inspect(), "{x: 1, y: 2}");
        assert!(assign_field(&Value::Null, "x", Value::Int(1)).is_err());
    }
}
