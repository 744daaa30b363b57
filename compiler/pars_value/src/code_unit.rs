//! The arena and source a piece of code belongs to.

use std::fmt;
use std::sync::Arc;

use pars_diagnostic::SourceFile;
use pars_ir::{SharedArena, Span};

/// A parsed module: its expression arena plus, when known, the source text
/// for turning spans into line and column numbers.
///
/// Functions and thunks carry the unit they were defined in, so a body
/// evaluated from another module still reads its own arena.
#[derive(Clone)]
pub struct CodeUnit {
    arena: SharedArena,
    source: Option<Arc<SourceFile>>,
}

impl CodeUnit {
    pub fn new(arena: SharedArena, source: Option<Arc<SourceFile>>) -> Self {
        CodeUnit { arena, source }
    }

    #[inline]
    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    pub fn source(&self) -> Option<&Arc<SourceFile>> {
        self.source.as_ref()
    }

    /// 1-based `(line, column)` of a span in this unit's source.
    pub fn position(&self, span: Span) -> Option<(u32, u32)> {
        self.source.as_ref().map(|source| source.position(span))
    }
}

impl fmt::Debug for CodeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeUnit")
            .field("exprs", &self.arena.expr_count())
            .field("source", &self.source.as_ref().map(|source| source.name()))
            .finish()
    }
}
