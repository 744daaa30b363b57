//! Destructuring `let` targets.
//!
//! Both functions compute the `(name, value)` pairs to bind and leave the
//! binding itself to the caller. Missing keys and positions bind `null`.

use pars_ir::{DestructureField, Name, StringInterner};
use pars_value::{ControlAction, Dictionary, ThunkForcer, Value};

use crate::errors::destructure_mismatch;

/// `let {a, b as c, ...rest} = value`.
///
/// Thunk fields are forced once. `rest` receives the fields not named by
/// the pattern, in their original order.
pub fn destructure_dict<F>(
    fields: &[DestructureField],
    rest: Option<Name>,
    value: &Value,
    interner: &StringInterner,
    forcer: &mut F,
) -> Result<Vec<(Name, Value)>, ControlAction>
where
    F: ThunkForcer + ?Sized,
{
    let source = match value {
        Value::Dict(dict) => dict.borrow().clone(),
        Value::Error(err) => err.view(),
        other => return Err(destructure_mismatch("Dictionary", other.type_name()).into()),
    };

    let mut bindings = Vec::with_capacity(fields.len() + usize::from(rest.is_some()));
    for field in fields {
        let key = interner.lookup(field.key);
        let value = match source.get(key) {
            Some(binding) => binding.force(forcer)?,
            None => Value::Null,
        };
        bindings.push((field.binding, value));
    }

    if let Some(rest) = rest {
        let mut remaining = Dictionary::new();
        for (key, binding) in source.iter() {
            if fields.iter().any(|field| interner.lookup(field.key) == key) {
                continue;
            }
            remaining.insert_value(key, binding.force(forcer)?);
        }
        bindings.push((rest, Value::dict(remaining)));
    }
    Ok(bindings)
}

/// `let [x, y, ...rest] = value`.
pub fn destructure_array(
    fields: &[DestructureField],
    rest: Option<Name>,
    value: &Value,
) -> Result<Vec<(Name, Value)>, ControlAction> {
    let Value::Array(items) = value else {
        return Err(destructure_mismatch("Array", value.type_name()).into());
    };
    let items = items.borrow();

    let mut bindings: Vec<(Name, Value)> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| (field.binding, items.get(i).cloned().unwrap_or(Value::Null)))
        .collect();
    if let Some(rest) = rest {
        let tail = items.iter().skip(fields.len()).cloned().collect();
        bindings.push((rest, Value::array(tail)));
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pars_ir::Span;
    use pars_value::{EvalResult, Thunk};
    use pretty_assertions::assert_eq;

    struct NoThunks;

    impl ThunkForcer for NoThunks {
        fn force_thunk(&mut self, _thunk: &Thunk) -> EvalResult {
            Ok(Value::Null)
        }
    }

    fn field(interner: &StringInterner, key: &str, binding: &str) -> DestructureField {
        DestructureField {
            key: interner.intern(key),
            binding: interner.intern(binding),
            span: Span::new(0, 0),
        }
    }

    fn render(interner: &StringInterner, bindings: &[(Name, Value)]) -> Vec<String> {
        bindings
            .iter()
            .map(|(name, value)| format!("{}={}", interner.lookup(*name), value.inspect()))
            .collect()
    }

    #[test]
    fn dictionary_pattern_with_rename_and_rest() {
        let interner = StringInterner::new();
        let mut dict = Dictionary::new();
        dict.insert_value("a", Value::Int(1));
        dict.insert_value("b", Value::Int(2));
        dict.insert_value("c", Value::Int(3));
        let fields = [field(&interner, "a", "a"), field(&interner, "b", "bee"), field(&interner, "z", "z")];
        let bindings = destructure_dict(
            &fields,
            Some(interner.intern("rest")),
            &Value::dict(dict),
            &interner,
            &mut NoThunks,
        )
        .unwrap_or_default();
        assert_eq!(
            render(&interner, &bindings),
            vec!["a=1", "bee=2", "z=null", "rest={c: 3}"]
        );
    }

    #[test]
    fn array_pattern_with_rest() {
        let interner = StringInterner::new();
        let fields = [field(&interner, "x", "x"), field(&interner, "y", "y")];
        let array = Value::array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let bindings =
            destructure_array(&fields, Some(interner.intern("more")), &array).unwrap_or_default();
        assert_eq!(render(&interner, &bindings), vec!["x=1", "y=2", "more=[3]"]);

        let short = Value::array(vec![Value::Int(1)]);
        let bindings = destructure_array(&fields, None, &short).unwrap_or_default();
        assert_eq!(render(&interner, &bindings), vec!["x=1", "y=null"]);
    }

    #[test]
    fn mismatched_values() {
        let interner = StringInterner::new();
        let fields = [field(&interner, "x", "x")];
        let err = destructure_array(&fields, None, &Value::Int(1)).err();
        assert!(matches!(
            err,
            Some(ControlAction::Error(e)) if e.message == "Array destructuring requires a array value, got integer"
        ));
        let err = destructure_dict(&fields, None, &Value::Null, &interner, &mut NoThunks).err();
        assert!(matches!(err, Some(ControlAction::Error(e)) if e.code() == "DEST-0001"));
    }
}
