//! Bindings: eager values and re-evaluated thunks.

use std::fmt;

use pars_ir::ExprId;

use crate::{CodeUnit, Environment, EvalResult, Value};

/// Evaluates thunk bodies. Implemented by the interpreter.
pub trait ThunkForcer {
    fn force_thunk(&mut self, thunk: &Thunk) -> EvalResult;
}

/// A variable or dictionary entry.
///
/// Reading goes through [`Binding::force`]: an eager binding returns its
/// value, a thunk evaluates its body again on every read.
#[derive(Clone)]
pub struct Binding(Repr);

#[derive(Clone)]
enum Repr {
    Eager(Value),
    Thunk(Thunk),
}

impl Binding {
    #[inline]
    pub fn eager(value: Value) -> Self {
        Binding(Repr::Eager(value))
    }

    #[inline]
    pub fn thunk(thunk: Thunk) -> Self {
        Binding(Repr::Thunk(thunk))
    }

    pub fn is_thunk(&self) -> bool {
        matches!(self.0, Repr::Thunk(_))
    }

    /// Read the binding, evaluating a thunk through `forcer`.
    #[inline]
    pub fn force<F: ThunkForcer + ?Sized>(&self, forcer: &mut F) -> EvalResult {
        match &self.0 {
            Repr::Eager(value) => Ok(value.clone()),
            Repr::Thunk(thunk) => forcer.force_thunk(thunk),
        }
    }

    /// The stored value of an eager binding. Never forces.
    pub fn peek(&self) -> Option<&Value> {
        match &self.0 {
            Repr::Eager(value) => Some(value),
            Repr::Thunk(_) => None,
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Eager(value) => write!(f, "Eager({value:?})"),
            Repr::Thunk(thunk) => write!(f, "Thunk({:?})", thunk.body),
        }
    }
}

/// Deferred expression: body, the unit it lives in, and the environment
/// it closes over. All thunks built in one scope share that scope.
#[derive(Clone)]
pub struct Thunk {
    body: ExprId,
    unit: CodeUnit,
    env: Environment,
}

impl Thunk {
    pub fn new(body: ExprId, unit: CodeUnit, env: Environment) -> Self {
        Thunk { body, unit, env }
    }

    #[inline]
    pub fn body(&self) -> ExprId {
        self.body
    }

    #[inline]
    pub fn unit(&self) -> &CodeUnit {
        &self.unit
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScopeKind;
    use pars_ir::{ExprArena, SharedArena};
    use pretty_assertions::assert_eq;

    /// Counts how often thunks are forced and returns the count.
    struct CountingForcer {
        forced: i64,
    }

    impl ThunkForcer for CountingForcer {
        fn force_thunk(&mut self, _thunk: &Thunk) -> EvalResult {
            self.forced += 1;
            Ok(Value::Int(self.forced))
        }
    }

    fn sample_thunk() -> Thunk {
        let unit = CodeUnit::new(SharedArena::new(ExprArena::new()), None);
        Thunk::new(ExprId::new(0), unit, Environment::new(ScopeKind::Module))
    }

    #[test]
    fn eager_reads_do_not_force() {
        let mut forcer = CountingForcer { forced: 0 };
        let binding = Binding::eager(Value::Int(7));
        assert_eq!(binding.force(&mut forcer).ok(), Some(Value::Int(7)));
        assert_eq!(forcer.forced, 0);
        assert_eq!(binding.peek(), Some(&Value::Int(7)));
    }

    #[test]
    fn thunk_is_forced_on_every_read() {
        let mut forcer = CountingForcer { forced: 0 };
        let binding = Binding::thunk(sample_thunk());
        assert!(binding.is_thunk());
        assert!(binding.peek().is_none());
        assert_eq!(binding.force(&mut forcer).ok(), Some(Value::Int(1)));
        assert_eq!(binding.force(&mut forcer).ok(), Some(Value::Int(2)));
        assert_eq!(binding.force(&mut forcer).ok(), Some(Value::Int(3)));
    }
}
