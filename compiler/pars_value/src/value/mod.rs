//! Runtime values.
//!
//! Scalars are stored inline. Strings are immutable `Rc<str>`; arrays and
//! dictionaries are [`Shared`] handles, so every holder observes in-place
//! mutation (`push`, index assignment). Construct heap values through the
//! factory methods (`Value::string`, `Value::array`, `Value::dict`, ...).

mod dictionary;
mod extension;
mod format;
mod function;

use std::fmt;
use std::rc::Rc;

pub use dictionary::Dictionary;
pub use extension::Extension;
pub use format::format_float;
pub use function::{BuiltinValue, FunctionValue};

use crate::{EvalError, Shared};

/// Nesting depth past which `inspect` and `equals` stop descending.
/// Cycles are cut separately, on the first repeated handle.
const MAX_NESTING: usize = 64;

/// Runtime value in the Parsley evaluator.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Array(Shared<Vec<Value>>),
    Dict(Shared<Dictionary>),
    Function(FunctionValue),
    Builtin(BuiltinValue),
    /// An error caught by `try`. Presents as its dictionary view.
    Error(Rc<EvalError>),
    Extension(Rc<dyn Extension>),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Rc::from(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Shared::new(items))
    }

    #[inline]
    pub fn dict(dict: Dictionary) -> Self {
        Value::Dict(Shared::new(dict))
    }

    #[inline]
    pub fn error(error: EvalError) -> Self {
        Value::Error(Rc::new(error))
    }

    pub fn extension(extension: impl Extension + 'static) -> Self {
        Value::Extension(Rc::new(extension))
    }

    #[inline]
    pub fn builtin(key: &'static str) -> Self {
        Value::Builtin(BuiltinValue::new(key))
    }
}

impl Value {
    /// Only `null` and `false` are falsy. Empty strings and collections
    /// are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Extension(ext) => ext.is_truthy(),
            _ => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Integers widen to floats.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integer operands of float arithmetic widen like the language does"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Tag used by `type()` and in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Dict(_) => "dictionary",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Error(_) => "error",
            Value::Extension(ext) => ext.type_name(),
        }
    }

    /// Source-like rendering. Strings are quoted, unresolved thunks render
    /// as `<computed>`. Never evaluates anything.
    pub fn inspect(&self) -> String {
        let mut out = String::new();
        self.inspect_into(&mut out, &mut Vec::new());
        out
    }

    /// Rendering for string coercion: strings raw, errors as their
    /// message, everything else as [`Value::inspect`].
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            Value::Error(error) => error.message.clone(),
            _ => self.inspect(),
        }
    }

    fn inspect_into(&self, out: &mut String, open: &mut Vec<*const ()>) {
        if open.len() > MAX_NESTING {
            out.push_str("...");
            return;
        }
        match self {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Float(f) => out.push_str(&format_float(*f)),
            Value::Str(s) => out.push_str(&format::quote(s)),
            Value::Array(items) => {
                if open.contains(&items.addr()) {
                    out.push_str("[...]");
                    return;
                }
                open.push(items.addr());
                out.push('[');
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.inspect_into(out, open);
                }
                out.push(']');
                open.pop();
            }
            Value::Dict(dict) => {
                if open.contains(&dict.addr()) {
                    out.push_str("{...}");
                    return;
                }
                open.push(dict.addr());
                inspect_dict(&dict.borrow(), out, open);
                open.pop();
            }
            Value::Function(func) => {
                out.push_str("fn(");
                out.push_str(func.labels());
                out.push(')');
            }
            Value::Builtin(builtin) => {
                out.push_str("builtin ");
                out.push_str(builtin.name());
            }
            Value::Error(error) => inspect_dict(&error.view(), out, open),
            Value::Extension(ext) => out.push_str(&ext.inspect()),
        }
    }

    /// Language equality: structural for collections, numeric across
    /// Integer and Float, `false` across other kinds.
    ///
    /// Thunk entries compare unequal to everything; callers resolve
    /// dictionaries before comparing them.
    pub fn equals(&self, other: &Value) -> bool {
        self.equals_at(other, &mut Vec::new())
    }

    /// `open` holds the collection pairs being compared further up. A pair
    /// met again is a cycle and counts as equal so far.
    #[expect(
        clippy::float_cmp,
        clippy::cast_precision_loss,
        reason = "language equality is exact numeric comparison"
    )]
    fn equals_at(&self, other: &Value, open: &mut Vec<(*const (), *const ())>) -> bool {
        if open.len() > MAX_NESTING {
            return false;
        }
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                let pair = (a.addr(), b.addr());
                if a.ptr_eq(b) || open.contains(&pair) {
                    return true;
                }
                open.push(pair);
                let equal = {
                    let (a, b) = (a.borrow(), b.borrow());
                    a.len() == b.len()
                        && a.iter().zip(b.iter()).all(|(x, y)| x.equals_at(y, open))
                };
                open.pop();
                equal
            }
            (Value::Dict(a), Value::Dict(b)) => {
                let pair = (a.addr(), b.addr());
                if a.ptr_eq(b) || open.contains(&pair) {
                    return true;
                }
                open.push(pair);
                let equal = dicts_equal(&a.borrow(), &b.borrow(), open);
                open.pop();
                equal
            }
            (Value::Error(a), Value::Error(b)) => dicts_equal(&a.view(), &b.view(), open),
            (Value::Function(a), Value::Function(b)) => a.same_closure(b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Extension(a), Value::Extension(b)) => a.equals(b.as_ref()),
            _ => false,
        }
    }
}

fn inspect_dict(dict: &Dictionary, out: &mut String, open: &mut Vec<*const ()>) {
    out.push('{');
    for (i, (key, binding)) in dict.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(key);
        out.push_str(": ");
        match binding.peek() {
            Some(value) => value.inspect_into(out, open),
            None => out.push_str("<computed>"),
        }
    }
    out.push('}');
}

fn dicts_equal(a: &Dictionary, b: &Dictionary, open: &mut Vec<(*const (), *const ())>) -> bool {
    a.len() == b.len()
        && a.iter().all(|(key, left)| {
            match (left.peek(), b.get(key).and_then(|right| right.peek())) {
                (Some(left), Some(right)) => left.equals_at(right, open),
                _ => false,
            }
        })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}
