//! Callable values.

use std::rc::Rc;

use pars_ir::{ExprId, Param};

use crate::{CodeUnit, Environment};

/// A closure: parameters, body and the environment it was created in.
///
/// Calling it opens a Function scope whose parent is `env`.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    params: Rc<[Param]>,
    /// Parameter list as written, for `fn(a, b)` rendering.
    labels: Rc<str>,
    body: ExprId,
    env: Environment,
    unit: CodeUnit,
}

impl FunctionValue {
    pub fn new(
        params: Rc<[Param]>,
        labels: Rc<str>,
        body: ExprId,
        env: Environment,
        unit: CodeUnit,
    ) -> Self {
        FunctionValue {
            params,
            labels,
            body,
            env,
            unit,
        }
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn labels(&self) -> &str {
        &self.labels
    }

    #[inline]
    pub fn body(&self) -> ExprId {
        self.body
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn unit(&self) -> &CodeUnit {
        &self.unit
    }

    /// Same body closing over the same environment.
    pub fn same_closure(&self, other: &FunctionValue) -> bool {
        self.body == other.body && self.env.ptr_eq(&other.env)
    }
}

/// Reference to a native function, e.g. `len` or `math.floor`.
///
/// The key is resolved to an implementation by the evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BuiltinValue {
    key: &'static str,
}

impl BuiltinValue {
    pub const fn new(key: &'static str) -> Self {
        BuiltinValue { key }
    }

    #[inline]
    pub const fn key(self) -> &'static str {
        self.key
    }

    /// Name as the user sees it: the key without its module prefix.
    pub fn name(self) -> &'static str {
        match self.key.rfind('.') {
            Some(dot) => &self.key[dot + 1..],
            None => self.key,
        }
    }
}
