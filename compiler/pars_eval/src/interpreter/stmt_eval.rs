//! Statement evaluation.
//!
//! Every statement yields a value for the enclosing block's result stream.
//! Binding statements (`let`, assignment, `computed`, `export`, `import`)
//! yield `null`.

use pars_ir::{DestructureField, ExprId, ExprKind, ImportPath, LetTarget, Name, Stmt, StmtKind};
use pars_value::{
    AssignError, Binding, ControlAction, DefineError, EvalError, EvalResult, Mutability, Thunk,
    Value,
};

use super::Interpreter;
use crate::errors::{
    already_defined, invalid_assignment_target, missing_export, protected_reassignment,
    undeclared_assignment, undefined_variable,
};
use crate::exec::destructure::{destructure_array, destructure_dict};
use crate::exec::expr::{assign_field, assign_index};

impl Interpreter {
    pub(super) fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult {
        let result = match stmt.kind {
            StmtKind::Expr(expr) => self.eval(expr),
            StmtKind::Let {
                target,
                value,
                export,
            } => self.eval_let(target, value, export).map(|()| Value::Null),
            StmtKind::Assign { target, value } => {
                self.eval_assign(target, value).map(|()| Value::Null)
            }
            StmtKind::Computed { name, body, export } => {
                self.define_computed(name, body, export).map(|()| Value::Null)
            }
            StmtKind::Export(name) => self.export_existing(name).map(|()| Value::Null),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                Err(ControlAction::Return(value))
            }
            StmtKind::Stop => Err(ControlAction::Stop),
            StmtKind::Skip => Err(ControlAction::Skip),
            StmtKind::Check { cond, otherwise } => {
                if self.eval(cond)?.is_truthy() {
                    Ok(Value::Null)
                } else {
                    Err(ControlAction::CheckExit(self.eval(otherwise)?))
                }
            }
            StmtKind::Import { path, alias } => {
                self.import_statement(path, alias).map(|()| Value::Null)
            }
        };
        result.map_err(|action| self.locate(action, stmt.span))
    }

    /// Bind `name` in the current scope. `_` discards.
    fn bind_local(&mut self, name: Name, binding: Binding, mutability: Mutability) -> Result<(), EvalError> {
        if name == self.names.underscore {
            return Ok(());
        }
        self.env
            .define(name, binding, mutability)
            .map_err(|DefineError::AlreadyDefined| already_defined(self.interner.lookup(name)))
    }

    fn export_binding(&self, name: Name, binding: Binding) {
        if name == self.names.underscore {
            return;
        }
        self.exports
            .borrow_mut()
            .insert(self.interner.lookup(name), binding);
    }

    fn eval_let(&mut self, target: LetTarget, value_expr: ExprId, export: bool) -> Result<(), ControlAction> {
        let value = self.eval(value_expr)?;
        let bindings = match target {
            LetTarget::Name(name) => vec![(name, value)],
            LetTarget::Dict { fields, rest } => {
                let arena = self.arena();
                let fields = arena.get_destructure_fields(fields);
                if matches!(arena.get_expr(value_expr).kind, ExprKind::Import(_)) {
                    self.require_exports(fields, &value)?;
                }
                let interner = self.interner.clone();
                destructure_dict(fields, rest, &value, &interner, self)?
            }
            LetTarget::Array { fields, rest } => {
                let arena = self.arena();
                destructure_array(arena.get_destructure_fields(fields), rest, &value)?
            }
        };
        for (name, value) in bindings {
            if export {
                self.export_binding(name, Binding::eager(value.clone()));
            }
            self.bind_local(name, Binding::eager(value), Mutability::Mutable)?;
        }
        Ok(())
    }

    /// Names pulled out of an `import` must be exported by the module.
    fn require_exports(&self, fields: &[DestructureField], module: &Value) -> Result<(), EvalError> {
        let Value::Dict(exports) = module else {
            return Ok(());
        };
        let exports = exports.borrow();
        match fields
            .iter()
            .map(|field| self.interner.lookup(field.key))
            .find(|key| !exports.contains_key(key))
        {
            Some(missing) => Err(missing_export(missing)),
            None => Ok(()),
        }
    }

    /// `name = v`, `a[i] = v`, `a.f = v`.
    fn eval_assign(&mut self, target: ExprId, value: ExprId) -> Result<(), ControlAction> {
        let target = *self.unit.arena().get_expr(target);
        match target.kind {
            ExprKind::Ident(name) => {
                let value = self.eval(value)?;
                if name == self.names.underscore {
                    return Ok(());
                }
                self.env.assign(name, value).map_err(|err| {
                    let text = self.interner.lookup(name);
                    let err = match err {
                        AssignError::Protected => protected_reassignment(text),
                        AssignError::Undeclared => undeclared_assignment(text),
                    };
                    self.locate_error(err, target.span).into()
                })
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval(receiver)?;
                let index = self.eval(index)?;
                let value = self.eval(value)?;
                assign_index(&receiver, &index, value).map_err(|a| self.locate(a, target.span))
            }
            ExprKind::Field { receiver, field } => {
                let receiver = self.eval(receiver)?;
                let value = self.eval(value)?;
                assign_field(&receiver, self.interner.lookup(field), value)
                    .map_err(|a| self.locate(a, target.span))
            }
            _ => Err(self.locate_error(invalid_assignment_target(), target.span).into()),
        }
    }

    /// `computed name = body`: a thunk over the current scope, forced on
    /// every read.
    fn define_computed(&mut self, name: Name, body: ExprId, export: bool) -> Result<(), ControlAction> {
        let thunk = Binding::thunk(Thunk::new(body, self.unit.clone(), self.env.clone()));
        tracing::trace!(name = self.interner.lookup(name), "computed binding");
        if export {
            self.export_binding(name, thunk.clone());
        }
        Ok(self.bind_local(name, thunk, Mutability::Mutable)?)
    }

    /// `export name`: re-expose an existing binding as is, so a computed
    /// binding stays lazy in the export table.
    fn export_existing(&mut self, name: Name) -> Result<(), ControlAction> {
        match self.env.lookup(name) {
            Some(binding) => {
                self.export_binding(name, binding);
                Ok(())
            }
            None => Err(undefined_variable(self.interner.lookup(name)).into()),
        }
    }

    /// `import PATH [as alias]`: binds the module under the alias, or the
    /// last path segment without its extension, as a protected name.
    fn import_statement(&mut self, path: ImportPath, alias: Option<Name>) -> Result<(), ControlAction> {
        let module = self.import_module(path)?;
        let name = match alias {
            Some(alias) => alias,
            None => {
                let text = self.interner.lookup(path.path);
                let segment = text.rsplit('/').next().unwrap_or(text);
                let stem = segment.split_once('.').map_or(segment, |(stem, _)| stem);
                self.interner.intern(stem)
            }
        };
        Ok(self.bind_local(name, Binding::eager(module), Mutability::Protected)?)
    }
}
