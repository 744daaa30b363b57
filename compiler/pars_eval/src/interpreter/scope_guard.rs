//! RAII scope guards for the interpreter's current environment.
//!
//! The interpreter evaluates against `self.env` (and `self.unit` for the
//! arena). A [`ScopedInterpreter`] replaces them for the duration of a
//! block, call or thunk and puts the previous ones back when dropped, even
//! during unwinding or an early `?` return.
//!
//! ```text
//! self.with_env_scope(ScopeKind::Block, |scoped| scoped.eval_statements(stmts))
//! ```

use std::ops::{Deref, DerefMut};

use pars_ir::Name;
use pars_value::{Binding, CodeUnit, Environment, Mutability, ScopeKind, Value};

use super::Interpreter;

/// Guard holding `&mut Interpreter`. Derefs to the interpreter, so code
/// inside a scope reads exactly like code outside it.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    saved_env: Option<Environment>,
    saved_unit: Option<CodeUnit>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        if let Some(env) = self.saved_env.take() {
            self.interpreter.env = env;
        }
        if let Some(unit) = self.saved_unit.take() {
            self.interpreter.unit = unit;
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Open a child of the current environment.
    pub fn scoped(&mut self, kind: ScopeKind) -> ScopedInterpreter<'_> {
        let child = self.env.child(kind);
        self.entered(child, None)
    }

    /// Switch to `env`, and to `unit` when given. Used for calls, thunks
    /// and module bodies, which run in the environment and arena they were
    /// defined in rather than the caller's.
    pub fn entered(&mut self, env: Environment, unit: Option<CodeUnit>) -> ScopedInterpreter<'_> {
        let saved_env = std::mem::replace(&mut self.env, env);
        let saved_unit = unit.map(|unit| std::mem::replace(&mut self.unit, unit));
        ScopedInterpreter {
            interpreter: self,
            saved_env: Some(saved_env),
            saved_unit,
        }
    }

    /// Run `f` in a fresh child scope.
    pub fn with_env_scope<T, F>(&mut self, kind: ScopeKind, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped(kind);
        f(&mut scoped)
    }

    /// Run `f` in a fresh block scope holding the given eager bindings.
    /// `_` is never bound.
    pub fn with_bindings<T, F, I>(&mut self, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
        I: IntoIterator<Item = (Name, Value)>,
    {
        let underscore = self.names.underscore;
        self.with_env_scope(ScopeKind::Block, |scoped| {
            for (name, value) in bindings {
                if name != underscore {
                    scoped
                        .env
                        .define_fresh(name, Binding::eager(value), Mutability::Mutable);
                }
            }
            f(scoped)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InterpreterBuilder;
    use pars_ir::SharedInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn scope_is_restored_after_guard() {
        let interner = SharedInterner::new();
        let x = interner.intern("x");
        let mut interp = InterpreterBuilder::new(interner).build();
        let outer = interp.env.clone();
        interp.with_bindings([(x, Value::Int(1))], |scoped| {
            assert!(scoped.env.has_local(x));
            assert!(!scoped.env.ptr_eq(&outer));
        });
        assert!(interp.env.ptr_eq(&outer));
        assert!(!interp.env.has_local(x));
    }

    #[test]
    fn scope_is_restored_on_early_return() {
        let interner = SharedInterner::new();
        let mut interp = InterpreterBuilder::new(interner).build();
        let outer = interp.env.clone();
        let result: Result<(), ()> = interp.with_env_scope(ScopeKind::Function, |scoped| {
            assert_eq!(scoped.env.kind(), ScopeKind::Function);
            Err(())
        });
        assert!(result.is_err());
        assert!(interp.env.ptr_eq(&outer));
    }

    #[test]
    fn underscore_is_not_bound() {
        let interner = SharedInterner::new();
        let underscore = interner.intern("_");
        let mut interp = InterpreterBuilder::new(interner).build();
        interp.with_bindings([(underscore, Value::Int(1))], |scoped| {
            assert!(!scoped.env.has_local(underscore));
        });
    }
}
