//! Statement nodes.

use crate::{DestructureRange, ExprId, ImportPath, Name, Span};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub const fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Statement variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Expression whose value joins the block's result stream.
    Expr(ExprId),
    /// `let target = value`, `export let target = value`, `export name = value`
    Let {
        target: LetTarget,
        value: ExprId,
        export: bool,
    },
    /// `target = value` where target is an identifier, index or field expression.
    Assign { target: ExprId, value: ExprId },
    /// `computed name = expr` / `computed name { block }`, optionally exported.
    Computed {
        name: Name,
        body: ExprId,
        export: bool,
    },
    /// `export name` for an existing binding.
    Export(Name),
    /// `return` / `return expr`
    Return(Option<ExprId>),
    /// `stop`
    Stop,
    /// `skip`
    Skip,
    /// `check cond else otherwise`
    Check { cond: ExprId, otherwise: ExprId },
    /// `import @path` / `import @path as alias` as a statement: binds a name.
    Import {
        path: ImportPath,
        alias: Option<Name>,
    },
}

/// Left-hand side of `let`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LetTarget {
    /// `let x = ...`
    Name(Name),
    /// `let {a, b as c, ...rest} = ...`
    Dict {
        fields: DestructureRange,
        rest: Option<Name>,
    },
    /// `let [x, y, ...rest] = ...`
    Array {
        fields: DestructureRange,
        rest: Option<Name>,
    },
}

/// One field of a destructuring `let`.
///
/// For dictionaries `key` is the looked-up key and `binding` the bound name
/// (equal unless `as` renames). For arrays both are the bound name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DestructureField {
    pub key: Name,
    pub binding: Name,
    pub span: Span,
}
