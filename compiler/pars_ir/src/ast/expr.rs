//! Expression nodes.

use crate::{
    BinaryOp, DictEntryRange, ExprId, ExprRange, LetTarget, Name, ParamRange, Span, StmtRange,
    UnaryOp,
};

/// Expression node. Children are arena indices, so the node is `Copy`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// `42`
    Int(i64),
    /// `1.5`, stored as `f64::to_bits`
    Float(u64),
    /// `"text"` (escapes already resolved)
    Str(Name),
    /// `true` / `false`
    Bool(bool),
    /// `null`
    Null,
    /// Variable reference.
    Ident(Name),
    /// `[a, b, c]`
    Array(ExprRange),
    /// `{key: value, "key": value, [expr]: value, ...spread}`
    Dict(DictEntryRange),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// `receiver[index]`
    Index {
        receiver: ExprId,
        index: ExprId,
    },
    /// `receiver.field`
    Field {
        receiver: ExprId,
        field: Name,
    },
    /// `func(args)`
    Call {
        func: ExprId,
        args: ExprRange,
    },
    /// `receiver.method(args)`
    MethodCall {
        receiver: ExprId,
        method: Name,
        args: ExprRange,
    },
    /// `fn(a, {b, c}, [d, ...e]) { body }`; `body` is a `Block`.
    Function {
        params: ParamRange,
        body: ExprId,
    },
    /// `{ stmt; stmt }` in statement position.
    Block(StmtRange),
    /// `if (cond) then else otherwise`
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    /// `for (value in iterable) body` or `for (key, value in iterable) body`
    For {
        key: Option<Name>,
        value: Name,
        iterable: ExprId,
        body: ExprId,
    },
    /// `try expr`
    Try(ExprId),
    /// `import @std/math` used as a value.
    Import(ImportPath),
}

impl ExprKind {
    /// Float literal value.
    pub fn float(value: f64) -> Self {
        ExprKind::Float(value.to_bits())
    }
}

/// Function parameter: a name or a destructuring pattern, bound from the
/// argument at its position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub target: LetTarget,
    pub span: Span,
}

/// Key of a dictionary literal entry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DictKey {
    /// `name: value` or `"name": value`
    Named(Name),
    /// `[expr]: value`
    Computed(ExprId),
    /// `...expr`: the value is a dictionary whose entries are copied in.
    Spread,
}

/// Dictionary literal entry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DictEntry {
    pub key: DictKey,
    pub value: ExprId,
    pub span: Span,
}

/// Where an import path points.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ImportKind {
    /// `@std/name`
    Std,
    /// `@./relative/file.pars` or `@../file.pars`
    Local,
}

/// Parsed `@...` module path.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImportPath {
    pub kind: ImportKind,
    /// Path text after the `@std/` prefix, or the relative path for local imports.
    pub path: Name,
    pub span: Span,
}
