//! Tree-walking interpreter for Parsley.
//!
//! All expression evaluation goes through [`Interpreter::eval`], one match
//! arm per node kind. Statement sequences, calls, thunks, methods and
//! modules live in the sibling modules; shared helpers that do not need the
//! interpreter live in `crate::exec`.
//!
//! # Environment and arena threading
//!
//! The interpreter evaluates against a current environment (`env`) and a
//! current code unit (`unit`, the arena plus source text). Functions and
//! thunks carry the unit they were defined in, so a call switches both for
//! the duration of the body through a [`ScopedInterpreter`] guard. Errors
//! receive their span and line/column from the unit active where they were
//! raised.
//!
//! # Early exits
//!
//! `return`, `stop`, `skip` and failing `check`s travel as
//! [`ControlAction`]s on the error side of [`EvalResult`]. Blocks pass them
//! through, loops consume `stop`/`skip`, and function, thunk and program
//! boundaries consume `return`/`check` (see `exec::control`).

mod builder;
mod function_call;
mod method_dispatch;
mod module;
mod scope_guard;
mod stmt_eval;
mod thunk;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use module::{FsLoader, MemoryLoader, ModuleLoader};
pub use scope_guard::ScopedInterpreter;

use std::sync::Arc;

use pars_diagnostic::SourceFile;
use pars_ir::{
    BinaryOp, DictEntryRange, DictKey, ExprId, ExprKind, ExprRange, LetTarget, Name,
    ParamRange, SharedArena, SharedInterner, Span, StmtRange, StringInterner,
};
use pars_parse::ParseError;
use pars_value::{
    CodeUnit, ControlAction, Dictionary, Environment, EvalError, EvalNote, EvalResult,
    FunctionValue, ScopeKind, Shared, Value,
};

use self::module::ModuleRegistry;
use crate::diagnostics::{closest_match, CallStack};
use crate::errors::{undefined_variable, wrong_arg_type};
use crate::exec::control::{self, LoopAction, ResultStream};
use crate::exec::expr::{field_value, index_value};
use crate::print_handler::SharedPrintHandler;
use crate::{evaluate_binary, evaluate_unary};

/// Names the evaluator compares against on hot paths.
#[derive(Clone, Copy)]
pub(crate) struct InternedNames {
    /// `_`: binding it discards the value, reading it yields `null`.
    pub(crate) underscore: Name,
    /// `this`: bound when a dictionary function is called as a method.
    pub(crate) this: Name,
}

impl InternedNames {
    fn new(interner: &StringInterner) -> Self {
        Self {
            underscore: interner.intern("_"),
            this: interner.intern("this"),
        }
    }
}

/// Failure of [`Interpreter::run_source`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The source did not parse. Nothing was evaluated.
    #[error("{} parse error(s) in {}", errors.len(), file.name())]
    Parse {
        file: Arc<SourceFile>,
        errors: Vec<ParseError>,
    },
    /// Evaluation raised an uncaught error.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Tree-walking interpreter.
///
/// Built by [`InterpreterBuilder`]. One interpreter can run several
/// programs; each gets a fresh module scope under the shared builtin
/// prelude, while loaded modules stay cached.
pub struct Interpreter {
    pub(crate) interner: SharedInterner,
    /// Current scope.
    pub(crate) env: Environment,
    /// Arena and source of the code being evaluated.
    pub(crate) unit: CodeUnit,
    /// Protected builtins; root of every module scope.
    pub(crate) prelude: Environment,
    pub(crate) names: InternedNames,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) modules: ModuleRegistry,
    /// Export table of the module being evaluated.
    pub(crate) exports: Shared<Dictionary>,
}

impl Interpreter {
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Parse and run a whole program.
    ///
    /// `name` labels the source in positions and diagnostics.
    pub fn run_source(&mut self, name: &str, text: &str) -> Result<Value, RunError> {
        let source = Arc::new(SourceFile::new(name, text));
        let parsed = pars_parse::parse(text, &self.interner);
        if parsed.has_errors() {
            return Err(RunError::Parse {
                file: source,
                errors: parsed.errors,
            });
        }
        let unit = CodeUnit::new(SharedArena::new(parsed.arena), Some(source));
        Ok(self.run_program(unit, parsed.program)?)
    }

    /// Run an already parsed program in a fresh module scope.
    ///
    /// The top level is the outermost function boundary: `return` and
    /// `check` exits become the program's value, `stop`/`skip` are errors.
    /// The value is fully resolved (no thunks left inside dictionaries).
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_program(&mut self, unit: CodeUnit, program: StmtRange) -> Result<Value, EvalError> {
        let env = self.prelude.child(ScopeKind::Module);
        let exports = std::mem::replace(&mut self.exports, Shared::new(Dictionary::new()));
        let result = {
            let mut scoped = self.entered(env, Some(unit));
            control::finish_body(scoped.eval_statements(program))
                .and_then(|value| control::finish_body(scoped.resolve_deep(&value)))
        };
        self.exports = exports;
        result
    }

    /// Evaluate an expression of the current unit.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn eval(&mut self, id: ExprId) -> EvalResult {
        let expr = *self.unit.arena().get_expr(id);
        pars_stack::ensure_sufficient_stack(|| self.eval_kind(expr.kind, expr.span))
            .map_err(|action| self.locate(action, expr.span))
    }

    /// Give an error the span (and position) of the innermost node that
    /// raised it.
    pub(crate) fn locate(&self, action: ControlAction, span: Span) -> ControlAction {
        match action {
            ControlAction::Error(err) if err.span.is_none() => {
                ControlAction::from(self.locate_error(*err, span))
            }
            other => other,
        }
    }

    pub(crate) fn locate_error(&self, err: EvalError, span: Span) -> EvalError {
        if err.span.is_some() {
            return err;
        }
        let err = err.with_span(span);
        match self.unit.position(span) {
            Some((line, column)) => err.with_position(line, column),
            None => err,
        }
    }

    fn eval_kind(&mut self, kind: ExprKind, span: Span) -> EvalResult {
        match kind {
            ExprKind::Int(n) => Ok(Value::Int(n)),
            ExprKind::Float(bits) => Ok(Value::Float(f64::from_bits(bits))),
            ExprKind::Str(name) => Ok(Value::from(self.interner.lookup(name))),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Ident(name) => self.eval_ident(name),
            ExprKind::Array(items) => self.eval_array_literal(items),
            ExprKind::Dict(entries) => self.eval_dict_literal(entries),
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(evaluate_unary(&value, op)?)
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(op, left, right),
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval(receiver)?;
                let index = self.eval(index)?;
                index_value(&receiver, &index, self)
            }
            ExprKind::Field { receiver, field } => {
                let receiver = self.eval(receiver)?;
                field_value(&receiver, self.interner.lookup(field), self)
            }
            ExprKind::Call { func, args } => self.eval_call(func, args, span),
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => self.eval_method_call(receiver, method, args, span),
            ExprKind::Function { params, body } => Ok(self.eval_function_literal(params, body)),
            ExprKind::Block(stmts) => {
                self.with_env_scope(ScopeKind::Block, |scoped| scoped.eval_statements(stmts))
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(then_branch)
                } else if let Some(otherwise) = else_branch {
                    self.eval(otherwise)
                } else {
                    Ok(Value::Null)
                }
            }
            ExprKind::For {
                key,
                value,
                iterable,
                body,
            } => self.eval_for(key, value, iterable, body),
            ExprKind::Try(inner) => self.eval_try(inner),
            ExprKind::Import(path) => self.import_module(path),
        }
    }

    /// Resolve a name, forcing thunks. `_` reads as `null`.
    fn eval_ident(&mut self, name: Name) -> EvalResult {
        if name == self.names.underscore {
            return Ok(Value::Null);
        }
        match self.env.lookup(name) {
            Some(binding) => binding.force(self),
            None => Err(self.undefined(name).into()),
        }
    }

    /// Identifier-not-found error with a suggestion when a visible name is
    /// close enough.
    #[cold]
    fn undefined(&self, name: Name) -> EvalError {
        let text = self.interner.lookup(name);
        let visible = self.env.visible_names();
        let err = undefined_variable(text);
        match closest_match(text, visible.iter().map(|n| self.interner.lookup(*n))) {
            Some(suggestion) => err.with_note(EvalNote::new(format!("did you mean `{suggestion}`?"))),
            None => err,
        }
    }

    fn eval_array_literal(&mut self, items: ExprRange) -> EvalResult {
        let arena = self.arena();
        let ids = arena.get_expr_list(items);
        let mut values = Vec::with_capacity(ids.len());
        for id in ids {
            values.push(self.eval(*id)?);
        }
        Ok(Value::array(values))
    }

    /// Dictionary literal. Every field is evaluated now, in order; spread
    /// entries copy (and force) the fields of another dictionary.
    fn eval_dict_literal(&mut self, entries: DictEntryRange) -> EvalResult {
        let arena = self.arena();
        let mut dict = Dictionary::new();
        for entry in arena.get_dict_entries(entries) {
            match entry.key {
                DictKey::Named(name) => {
                    let value = self.eval(entry.value)?;
                    dict.insert_value(self.interner.lookup(name), value);
                }
                DictKey::Computed(key_expr) => {
                    let key = match self.eval(key_expr)? {
                        Value::Str(s) => s.to_string(),
                        key @ (Value::Int(_) | Value::Float(_) | Value::Bool(_)) => {
                            key.to_display_string()
                        }
                        other => {
                            let err = wrong_arg_type(
                                "dictionary key",
                                "a string or number",
                                other.type_name(),
                            );
                            return Err(self.locate_error(err, entry.span).into());
                        }
                    };
                    let value = self.eval(entry.value)?;
                    dict.insert_value(key, value);
                }
                DictKey::Spread => {
                    let source = self.eval(entry.value)?;
                    let fields = match &source {
                        Value::Dict(other) => other.borrow().clone(),
                        Value::Error(err) => err.view(),
                        Value::Null => continue,
                        other => {
                            let err =
                                wrong_arg_type("...", "a dictionary", other.type_name());
                            return Err(self.locate_error(err, entry.span).into());
                        }
                    };
                    for (key, binding) in fields.iter() {
                        let value = binding.force(self)?;
                        dict.insert_value(key, value);
                    }
                }
            }
        }
        Ok(Value::dict(dict))
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult {
        if op.is_short_circuit() {
            let left = self.eval(left)?.is_truthy();
            let result = match op {
                BinaryOp::And => left && self.eval(right)?.is_truthy(),
                _ => left || self.eval(right)?.is_truthy(),
            };
            return Ok(Value::Bool(result));
        }
        let mut left = self.eval(left)?;
        let mut right = self.eval(right)?;
        if matches!(op, BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::Add) {
            left = self.resolve_deep(&left)?;
            right = self.resolve_deep(&right)?;
        }
        Ok(evaluate_binary(&left, &right, op)?)
    }

    fn eval_function_literal(&mut self, params: ParamRange, body: ExprId) -> Value {
        let arena = self.arena();
        let params = arena.get_params(params);
        let labels = params
            .iter()
            .map(|param| self.target_label(param.target))
            .collect::<Vec<_>>()
            .join(", ");
        Value::Function(FunctionValue::new(
            params.into(),
            labels.into(),
            body,
            self.env.clone(),
            self.unit.clone(),
        ))
    }

    /// A parameter as written: `a`, `{a, b as c, ...rest}`, `[x, ...rest]`.
    fn target_label(&self, target: LetTarget) -> String {
        let (fields, rest, open, close) = match target {
            LetTarget::Name(name) => return self.interner.lookup(name).to_string(),
            LetTarget::Dict { fields, rest } => (fields, rest, '{', '}'),
            LetTarget::Array { fields, rest } => (fields, rest, '[', ']'),
        };
        let arena = self.arena();
        let mut parts: Vec<String> = arena
            .get_destructure_fields(fields)
            .iter()
            .map(|field| {
                let key = self.interner.lookup(field.key);
                if field.key == field.binding {
                    key.to_string()
                } else {
                    format!("{key} as {}", self.interner.lookup(field.binding))
                }
            })
            .collect();
        if let Some(rest) = rest {
            parts.push(format!("...{}", self.interner.lookup(rest)));
        }
        format!("{open}{}{close}", parts.join(", "))
    }

    /// `for (value in iterable) body` / `for (key, value in iterable) body`.
    ///
    /// Each iteration runs in its own block scope. Non-null iteration
    /// values are collected into the resulting array.
    fn eval_for(
        &mut self,
        key: Option<Name>,
        value: Name,
        iterable: ExprId,
        body: ExprId,
    ) -> EvalResult {
        let iterable_span = self.unit.arena().get_expr(iterable).span;
        let source = self.eval(iterable)?;
        let items = control::iteration_items(&source, self)
            .map_err(|action| self.locate(action, iterable_span))?;
        let body_stmts = match self.unit.arena().get_expr(body).kind {
            ExprKind::Block(stmts) => Some(stmts),
            _ => None,
        };

        let mut collected = Vec::new();
        for (item_key, item) in items {
            let bindings = match key {
                Some(key_name) => vec![(key_name, item_key), (value, item)],
                None => vec![(value, item)],
            };
            let result = self.with_bindings(bindings, |scoped| match body_stmts {
                Some(stmts) => scoped.eval_statements(stmts),
                None => scoped.eval(body),
            });
            match control::to_loop_action(result) {
                LoopAction::Yield(v) => {
                    if !v.is_null() {
                        collected.push(v);
                    }
                }
                LoopAction::Skip => {}
                LoopAction::Stop => break,
                LoopAction::Exit(action) => return Err(action),
            }
        }
        Ok(Value::array(collected))
    }

    /// `try expr`: catchable errors become `{result: null, error: e}`,
    /// success becomes `{result: v, error: null}`. Type and Arity errors,
    /// and all early exits, pass through.
    fn eval_try(&mut self, inner: ExprId) -> EvalResult {
        let (result, error) = match self.eval(inner) {
            Ok(value) => (value, Value::Null),
            Err(ControlAction::Error(err)) if err.is_catchable() => {
                tracing::debug!(code = err.code(), "try caught error");
                (Value::Null, Value::error(*err))
            }
            Err(other) => return Err(other),
        };
        let mut dict = Dictionary::new();
        dict.insert_value("result", result);
        dict.insert_value("error", error);
        Ok(Value::dict(dict))
    }

    /// Statement block result: the collected non-null statement values.
    fn eval_statements(&mut self, stmts: StmtRange) -> EvalResult {
        let arena = self.arena();
        let mut stream = ResultStream::default();
        for stmt in arena.get_stmts(stmts) {
            let value = self.eval_stmt(stmt)?;
            stream.push(value);
        }
        Ok(stream.finish())
    }

    /// Handle to the current arena, cloned so it can be read while `self`
    /// is borrowed mutably.
    #[inline]
    pub(crate) fn arena(&self) -> SharedArena {
        self.unit.arena().clone()
    }
}
