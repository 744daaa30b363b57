//! Insertion-ordered dictionary of bindings.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{Binding, Value};

/// String-keyed map whose entries are [`Binding`]s.
///
/// Iteration follows insertion order. Re-inserting an existing key replaces
/// its binding but keeps its position.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: IndexMap<String, Binding, FxBuildHasher>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, binding: Binding) {
        self.entries.insert(key.into(), binding);
    }

    #[inline]
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) {
        self.insert(key, Binding::eager(value));
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Binding> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> + '_ {
        self.entries.iter().map(|(key, binding)| (key.as_str(), binding))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry is still a thunk.
    pub fn has_thunks(&self) -> bool {
        self.entries.values().any(Binding::is_thunk)
    }
}

impl FromIterator<(String, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Dictionary {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key, Binding::eager(value)))
                .collect(),
        }
    }
}
