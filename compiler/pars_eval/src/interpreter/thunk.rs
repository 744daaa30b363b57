//! Forcing computed bindings and resolving lazy dictionaries.

use pars_value::{
    ControlAction, Dictionary, EvalResult, ScopeKind, Thunk, ThunkForcer, Value,
};
use rustc_hash::FxHashSet;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::exec::control;

/// Dictionaries nested deeper than this are returned as they are.
const MAX_RESOLVE_DEPTH: usize = 64;

impl ThunkForcer for Interpreter {
    /// Evaluate the thunk body afresh in a new block scope under the
    /// environment it closed over, reading the arena it was defined in.
    #[tracing::instrument(level = "debug", skip_all, fields(body = ?thunk.body()))]
    fn force_thunk(&mut self, thunk: &Thunk) -> EvalResult {
        // Counts toward the call depth so self-referencing bindings stop.
        self.call_stack.push(CallFrame {
            name: None,
            call_span: None,
        })?;
        let env = thunk.env().child(ScopeKind::Block);
        let result = pars_stack::ensure_sufficient_stack(|| {
            let mut scoped = self.entered(env, Some(thunk.unit().clone()));
            control::finish_body(scoped.eval_body(thunk.body()))
        });
        self.call_stack.pop();
        result.map_err(Into::into)
    }
}

impl Interpreter {
    /// Copy of `value` with every thunk inside dictionaries forced.
    ///
    /// Used before comparing or displaying values. Collections without
    /// thunks are returned as the same handle.
    pub fn resolve_deep(&mut self, value: &Value) -> EvalResult {
        self.resolve_at(value, &mut Vec::new())
    }

    /// `open` holds the collections being copied further up; a handle met
    /// again is left as it is.
    fn resolve_at(&mut self, value: &Value, open: &mut Vec<*const ()>) -> EvalResult {
        if open.len() > MAX_RESOLVE_DEPTH {
            tracing::warn!(depth = open.len(), "value nested too deeply to resolve, left as is");
            return Ok(value.clone());
        }
        if !needs_resolving(value, &mut FxHashSet::default(), 0) {
            return Ok(value.clone());
        }
        match value {
            Value::Array(items) if !open.contains(&items.addr()) => {
                open.push(items.addr());
                let snapshot = items.borrow().clone();
                let mut resolved = Vec::with_capacity(snapshot.len());
                for item in &snapshot {
                    match self.resolve_at(item, open) {
                        Ok(item) => resolved.push(item),
                        Err(err) => {
                            open.pop();
                            return Err(err);
                        }
                    }
                }
                open.pop();
                Ok(Value::array(resolved))
            }
            Value::Dict(dict) if !open.contains(&dict.addr()) => {
                open.push(dict.addr());
                let snapshot = dict.borrow().clone();
                let resolved = self.resolve_entries(&snapshot, open);
                open.pop();
                resolved.map(Value::dict)
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_entries(
        &mut self,
        dict: &Dictionary,
        open: &mut Vec<*const ()>,
    ) -> Result<Dictionary, ControlAction> {
        let mut resolved = Dictionary::new();
        for (key, binding) in dict.iter() {
            let forced = binding.force(self)?;
            resolved.insert_value(key, self.resolve_at(&forced, open)?);
        }
        Ok(resolved)
    }
}

/// Whether a value holds a thunk anywhere within reach. Each collection
/// is visited once.
fn needs_resolving(value: &Value, seen: &mut FxHashSet<*const ()>, depth: usize) -> bool {
    if depth > MAX_RESOLVE_DEPTH {
        return false;
    }
    match value {
        Value::Array(items) => {
            seen.insert(items.addr())
                && items.try_borrow().is_some_and(|items| {
                    items.iter().any(|item| needs_resolving(item, seen, depth + 1))
                })
        }
        Value::Dict(dict) => {
            seen.insert(dict.addr())
                && dict.try_borrow().is_some_and(|dict| {
                    dict.has_thunks()
                        || dict.iter().any(|(_, binding)| {
                            binding
                                .peek()
                                .is_some_and(|value| needs_resolving(value, seen, depth + 1))
                        })
                })
        }
        _ => false,
    }
}
