//! Arena storage for one parsed source file.
//!
//! Expressions and statements live in contiguous vectors addressed by
//! `ExprId` and range types. Lists are pushed in one call so their elements
//! stay contiguous even when the parser recurses while building them.

use std::ops::Deref;
use std::sync::Arc;

use crate::{
    DestructureField, DestructureRange, DictEntry, DictEntryRange, Expr, ExprId, ExprRange,
    Param, ParamRange, Stmt, StmtRange,
};

/// Flat storage for a parsed module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    stmts: Vec<Stmt>,
    params: Vec<Param>,
    dict_entries: Vec<DictEntry>,
    destructure_fields: Vec<DestructureField>,
}

fn to_u32(n: usize, table: &str) -> u32 {
    u32::try_from(n).unwrap_or_else(|_| panic!("{table} table exceeded u32::MAX entries"))
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expression"));
        self.exprs.push(expr);
        id
    }

    /// Get an expression by ID.
    ///
    /// # Panics
    /// Panics if `id` was not allocated in this arena.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len();
        self.expr_lists.extend(ids);
        ExprRange::new(
            to_u32(start, "expression list"),
            to_u32(self.expr_lists.len() - start, "expression list"),
        )
    }

    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let (start, end) = range.bounds();
        &self.expr_lists[start..end]
    }

    pub fn alloc_stmts(&mut self, stmts: impl IntoIterator<Item = Stmt>) -> StmtRange {
        let start = self.stmts.len();
        self.stmts.extend(stmts);
        StmtRange::new(
            to_u32(start, "statement"),
            to_u32(self.stmts.len() - start, "statement"),
        )
    }

    pub fn get_stmts(&self, range: StmtRange) -> &[Stmt] {
        let (start, end) = range.bounds();
        &self.stmts[start..end]
    }

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Param>) -> ParamRange {
        let start = self.params.len();
        self.params.extend(params);
        ParamRange::new(
            to_u32(start, "parameter"),
            to_u32(self.params.len() - start, "parameter"),
        )
    }

    pub fn get_params(&self, range: ParamRange) -> &[Param] {
        let (start, end) = range.bounds();
        &self.params[start..end]
    }

    pub fn alloc_dict_entries(
        &mut self,
        entries: impl IntoIterator<Item = DictEntry>,
    ) -> DictEntryRange {
        let start = self.dict_entries.len();
        self.dict_entries.extend(entries);
        DictEntryRange::new(
            to_u32(start, "dictionary entry"),
            to_u32(self.dict_entries.len() - start, "dictionary entry"),
        )
    }

    pub fn get_dict_entries(&self, range: DictEntryRange) -> &[DictEntry] {
        let (start, end) = range.bounds();
        &self.dict_entries[start..end]
    }

    pub fn alloc_destructure_fields(
        &mut self,
        fields: impl IntoIterator<Item = DestructureField>,
    ) -> DestructureRange {
        let start = self.destructure_fields.len();
        self.destructure_fields.extend(fields);
        DestructureRange::new(
            to_u32(start, "destructure field"),
            to_u32(self.destructure_fields.len() - start, "destructure field"),
        )
    }

    pub fn get_destructure_fields(&self, range: DestructureRange) -> &[DestructureField] {
        let (start, end) = range.bounds();
        &self.destructure_fields[start..end]
    }
}

/// Shared, immutable handle to a finished arena.
///
/// Closures and thunks keep the arena their body was parsed into, so a
/// function exported from one module can be called from another.
#[derive(Clone, Debug)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether both handles point at the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExprKind, Name, Span, StmtKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn expressions_are_addressed_by_id() {
        let mut arena = ExprArena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::new(0, 1)));
        let b = arena.alloc_expr(Expr::new(ExprKind::Null, Span::new(2, 6)));
        assert_eq!(arena.get_expr(a).kind, ExprKind::Int(1));
        assert_eq!(arena.get_expr(b).span, Span::new(2, 6));
        assert_eq!(arena.expr_count(), 2);
    }

    #[test]
    fn lists_stay_contiguous() {
        let mut arena = ExprArena::new();
        let one = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::DUMMY));
        let two = arena.alloc_expr(Expr::new(ExprKind::Int(2), Span::DUMMY));
        let first = arena.alloc_expr_list([one, two]);
        let second = arena.alloc_expr_list([two]);
        assert_eq!(arena.get_expr_list(first), &[one, two]);
        assert_eq!(arena.get_expr_list(second), &[two]);
    }

    #[test]
    fn statements_round_through_ranges() {
        let mut arena = ExprArena::new();
        let range = arena.alloc_stmts([
            Stmt::new(StmtKind::Stop, Span::new(0, 4)),
            Stmt::new(StmtKind::Export(Name::EMPTY), Span::new(5, 11)),
        ]);
        let stmts = arena.get_stmts(range);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].kind, StmtKind::Stop);
    }

    #[test]
    fn shared_arena_identity() {
        let shared = SharedArena::new(ExprArena::new());
        let other = SharedArena::new(ExprArena::new());
        assert!(shared.ptr_eq(&shared.clone()));
        assert!(!shared.ptr_eq(&other));
    }
}
