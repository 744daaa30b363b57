//! Opaque values defined outside the core value model.

use std::any::Any;
use std::fmt;

use crate::{EvalError, Value};

/// A value kind the evaluator treats as a leaf.
///
/// Extensions render themselves, compare themselves and answer field and
/// method lookups; everything else the evaluator does with them goes
/// through these hooks. `@std/table` is the in-tree example.
pub trait Extension: fmt::Debug {
    /// Tag reported by `type()` and in error messages.
    fn type_name(&self) -> &'static str;

    /// Total, side-effect-free rendering.
    fn inspect(&self) -> String;

    /// Equality against another extension. Implementations usually
    /// downcast `other` through [`Extension::as_any`].
    fn equals(&self, other: &dyn Extension) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn is_truthy(&self) -> bool {
        true
    }

    /// `value.name` lookup. `None` means unknown property.
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }

    /// `value.method(args)`. `None` means unknown method. Arguments are
    /// already forced.
    fn call_method(&self, _method: &str, _args: &[Value]) -> Option<Result<Value, EvalError>> {
        None
    }
}
