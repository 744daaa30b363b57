//! Lexical environments.
//!
//! An [`Environment`] is a reference-counted scope node: local bindings, an
//! optional parent and a [`ScopeKind`]. Closures keep their defining
//! environment alive by holding a clone of the handle, and mutations through
//! any handle are visible to every holder.

use std::fmt;

use pars_ir::Name;
use rustc_hash::FxHashMap;

use crate::{Binding, Shared, Value};

/// What kind of construct opened a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Program or imported module top level (also the builtin prelude).
    Module,
    /// One function invocation.
    Function,
    /// Block, loop iteration or thunk evaluation.
    Block,
}

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    Mutable,
    /// Builtins and import bindings: neither reassignable nor redefinable
    /// in the same scope.
    Protected,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Error returned by [`Environment::define`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefineError {
    /// The scope already holds a protected binding of that name.
    AlreadyDefined,
}

/// Error returned by [`Environment::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The nearest binding is protected.
    Protected,
    /// No binding exists and the current scope is not a module scope.
    Undeclared,
}

#[derive(Clone)]
struct Slot {
    binding: Binding,
    mutability: Mutability,
}

struct Scope {
    bindings: FxHashMap<Name, Slot>,
    parent: Option<Environment>,
    kind: ScopeKind,
}

/// Handle to a scope node.
#[derive(Clone)]
pub struct Environment(Shared<Scope>);

impl Environment {
    /// Root scope with no parent.
    pub fn new(kind: ScopeKind) -> Self {
        Environment(Shared::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
            kind,
        }))
    }

    /// New scope enclosed by `self`.
    pub fn child(&self, kind: ScopeKind) -> Self {
        Environment(Shared::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
            kind,
        }))
    }

    pub fn kind(&self) -> ScopeKind {
        self.0.borrow().kind
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Install a binding in this scope. Re-declaring a mutable name
    /// replaces it; a protected name cannot be replaced.
    pub fn define(
        &self,
        name: Name,
        binding: Binding,
        mutability: Mutability,
    ) -> Result<(), DefineError> {
        let mut scope = self.0.borrow_mut();
        if let Some(existing) = scope.bindings.get(&name) {
            if !existing.mutability.is_mutable() {
                return Err(DefineError::AlreadyDefined);
            }
        }
        scope.bindings.insert(
            name,
            Slot {
                binding,
                mutability,
            },
        );
        Ok(())
    }

    /// Install a binding in a scope that holds no protected name yet, such
    /// as one just created. Cannot fail; replacing a protected binding is a
    /// logic error caught in debug builds.
    pub fn define_fresh(&self, name: Name, binding: Binding, mutability: Mutability) {
        let previous = self.0.borrow_mut().bindings.insert(
            name,
            Slot {
                binding,
                mutability,
            },
        );
        debug_assert!(
            !matches!(
                previous,
                Some(Slot {
                    mutability: Mutability::Protected,
                    ..
                })
            ),
            "define_fresh replaced a protected binding"
        );
    }

    /// Nearest binding of `name`, walking outward. Thunks are not forced.
    pub fn lookup(&self, name: Name) -> Option<Binding> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.0.borrow();
                if let Some(slot) = scope.bindings.get(&name) {
                    return Some(slot.binding.clone());
                }
                scope.parent.clone()
            };
            current = parent?;
        }
    }

    /// Whether this scope itself binds `name`.
    pub fn has_local(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    /// Replace the nearest binding of `name` with an eager value.
    ///
    /// With no binding anywhere, a module scope gains a new mutable binding;
    /// any other scope reports [`AssignError::Undeclared`].
    pub fn assign(&self, name: Name, value: Value) -> Result<(), AssignError> {
        let mut current = self.clone();
        loop {
            let parent = {
                let mut scope = current.0.borrow_mut();
                if let Some(slot) = scope.bindings.get_mut(&name) {
                    if !slot.mutability.is_mutable() {
                        return Err(AssignError::Protected);
                    }
                    slot.binding = Binding::eager(value);
                    return Ok(());
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        if self.kind() == ScopeKind::Module {
            self.0.borrow_mut().bindings.insert(
                name,
                Slot {
                    binding: Binding::eager(value),
                    mutability: Mutability::Mutable,
                },
            );
            Ok(())
        } else {
            Err(AssignError::Undeclared)
        }
    }

    /// Every name visible from this scope, innermost first, without
    /// duplicates. Used for "did you mean" hints.
    pub fn visible_names(&self) -> Vec<Name> {
        let mut names = Vec::new();
        let mut current = Some(self.clone());
        while let Some(env) = current {
            let scope = env.0.borrow();
            for name in scope.bindings.keys() {
                if !names.contains(name) {
                    names.push(*name);
                }
            }
            current = scope.parent.clone();
        }
        names
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Some(scope) => f
                .debug_struct("Environment")
                .field("kind", &scope.kind)
                .field("locals", &scope.bindings.len())
                .finish(),
            None => f.write_str("Environment(<borrowed>)"),
        }
    }
}
