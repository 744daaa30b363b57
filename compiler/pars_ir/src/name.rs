//! Interned string identifier.

use std::fmt;

/// Interned string: an index into the owning [`StringInterner`](crate::StringInterner).
///
/// Used for identifiers, dictionary keys written as bare words, string
/// literals and module paths. Equality is a single `u32` compare.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub(crate) const fn from_index(index: u32) -> Self {
        Name(index)
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_index_zero() {
        assert_eq!(Name::EMPTY.index(), 0);
        assert_eq!(Name::default(), Name::EMPTY);
    }

    #[test]
    fn names_order_by_index() {
        assert!(Name::from_index(1) < Name::from_index(2));
        assert_eq!(Name::from_index(7).raw(), 7);
    }
}
