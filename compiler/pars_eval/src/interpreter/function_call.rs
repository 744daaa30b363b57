//! Calls: argument evaluation, user functions and builtins.

use pars_ir::{ExprId, ExprKind, ExprRange, LetTarget, Name, Span};
use pars_value::{
    Binding, ControlAction, Dictionary, EvalResult, FunctionValue, Mutability, ScopeKind, Value,
};
use smallvec::SmallVec;

use super::Interpreter;
use crate::builtins;
use crate::diagnostics::CallFrame;
use crate::errors::not_callable;
use crate::exec::control;
use crate::exec::destructure::{destructure_array, destructure_dict};

/// Evaluated call arguments. Most calls take few.
pub(crate) type Args = SmallVec<[Value; 4]>;

impl Interpreter {
    /// `func(args)`.
    pub(super) fn eval_call(&mut self, func: ExprId, args: ExprRange, span: Span) -> EvalResult {
        let name = match self.unit.arena().get_expr(func).kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        };
        let callee = self.eval(func)?;
        let args = self.eval_args(args)?;
        self.call_value(&callee, &args, span, name, None)
    }

    /// Evaluate arguments left to right. Each is forced once.
    pub(super) fn eval_args(&mut self, args: ExprRange) -> Result<Args, ControlAction> {
        let arena = self.arena();
        let ids = arena.get_expr_list(args);
        let mut values = Args::with_capacity(ids.len());
        for id in ids {
            values.push(self.eval(*id)?);
        }
        Ok(values)
    }

    /// Call any callable value.
    ///
    /// `name` labels the backtrace frame; `this` is bound when a dictionary
    /// function is called as a method.
    pub(crate) fn call_value(
        &mut self,
        callee: &Value,
        args: &[Value],
        span: Span,
        name: Option<Name>,
        this: Option<Value>,
    ) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args, span, name, this),
            Value::Builtin(builtin) => match builtins::resolve(builtin.key()) {
                Some(call) => call(self, args, span),
                None => Err(not_callable(callee.type_name()).into()),
            },
            other => Err(not_callable(other.type_name()).into()),
        }
    }

    /// Invoke a user function in a fresh scope under its closure.
    ///
    /// Missing arguments bind `null`; extra arguments are ignored.
    #[tracing::instrument(level = "debug", skip_all, fields(depth = self.call_stack.depth()))]
    fn call_function(
        &mut self,
        func: &FunctionValue,
        args: &[Value],
        span: Span,
        name: Option<Name>,
        this: Option<Value>,
    ) -> EvalResult {
        let bindings = self.param_bindings(func, args)?;
        self.call_stack.push(CallFrame {
            name,
            call_span: Some(span),
        })?;

        let env = func.env().child(ScopeKind::Function);
        for (param, value) in bindings {
            if param != self.names.underscore {
                env.define_fresh(param, Binding::eager(value), Mutability::Mutable);
            }
        }
        if let Some(this) = this {
            env.define_fresh(self.names.this, Binding::eager(this), Mutability::Mutable);
        }

        let result = pars_stack::ensure_sufficient_stack(|| {
            let mut scoped = self.entered(env, Some(func.unit().clone()));
            control::finish_body(scoped.eval_body(func.body()))
        });
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err, &self.interner));
        self.call_stack.pop();
        result.map_err(ControlAction::from)
    }

    /// Pair each parameter name with its argument. Patterns destructure
    /// like `let`; a missing argument leaves every pattern name `null`, and
    /// a non-array argument to an array pattern counts as one element.
    fn param_bindings(
        &mut self,
        func: &FunctionValue,
        args: &[Value],
    ) -> Result<Vec<(Name, Value)>, ControlAction> {
        let arena = func.unit().arena().clone();
        let interner = self.interner.clone();
        let mut bindings = Vec::with_capacity(func.params().len());
        for (i, param) in func.params().iter().enumerate() {
            let arg = args.get(i);
            match param.target {
                LetTarget::Name(name) => {
                    bindings.push((name, arg.cloned().unwrap_or(Value::Null)));
                }
                LetTarget::Dict { fields, rest } => {
                    let value = arg.cloned().unwrap_or_else(|| Value::dict(Dictionary::new()));
                    let fields = arena.get_destructure_fields(fields);
                    bindings.extend(destructure_dict(fields, rest, &value, &interner, self)?);
                }
                LetTarget::Array { fields, rest } => {
                    let value = match arg {
                        Some(items @ Value::Array(_)) => items.clone(),
                        Some(single) => Value::array(vec![single.clone()]),
                        None => Value::array(Vec::new()),
                    };
                    let fields = arena.get_destructure_fields(fields);
                    bindings.extend(destructure_array(fields, rest, &value)?);
                }
            }
        }
        Ok(bindings)
    }

    /// Evaluate a function or thunk body in the current scope. A block body
    /// runs its statements directly rather than opening another scope.
    pub(super) fn eval_body(&mut self, body: ExprId) -> EvalResult {
        match self.unit.arena().get_expr(body).kind {
            ExprKind::Block(stmts) => self.eval_statements(stmts),
            _ => self.eval(body),
        }
    }
}
