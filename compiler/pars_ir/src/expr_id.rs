//! Expression IDs and arena ranges for the flat AST.

use std::fmt;

/// Index into [`ExprArena`](crate::ExprArena) expressions.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Sentinel for "no expression".
    pub const INVALID: ExprId = ExprId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Defines `(start, len)` range types over one arena side table.
macro_rules! define_range {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            /// Slice bounds in the side table.
            #[inline]
            pub const fn bounds(&self) -> (usize, usize) {
                (self.start as usize, self.start as usize + self.len as usize)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}..{})", stringify!($name), self.start, self.start + self.len)
            }
        }
    )* };
}

define_range!(
    /// Expression list: array elements, call arguments.
    ExprRange,
    /// Statements of a block or program.
    StmtRange,
    /// Function parameters.
    ParamRange,
    /// Dictionary literal entries.
    DictEntryRange,
    /// Fields of a destructuring `let`.
    DestructureRange,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_is_default() {
        assert!(!ExprId::default().is_valid());
        assert!(ExprId::new(3).is_valid());
        assert_eq!(format!("{:?}", ExprId::INVALID), "ExprId::INVALID");
    }

    #[test]
    fn range_bounds() {
        let range = StmtRange::new(4, 3);
        assert_eq!(range.bounds(), (4, 7));
        assert_eq!(range.len(), 3);
        assert!(ExprRange::EMPTY.is_empty());
        assert_eq!(format!("{range:?}"), "StmtRange(4..7)");
    }
}
