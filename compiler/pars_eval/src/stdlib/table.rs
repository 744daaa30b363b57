//! `@std/table`: row tables as an opaque extension value.

use std::any::Any;
use std::rc::Rc;

use pars_ir::Span;
use pars_value::{Binding, Dictionary, EvalError, EvalResult, Extension, Value};

use crate::builtins::BuiltinFn;
use crate::coerce::{compare_values, NumericCoercion};
use crate::errors::wrong_arg_type;
use crate::exec::expr::length_value;
use crate::methods::helpers::{require_args, require_str_arg};
use crate::Interpreter;

pub(super) fn exports() -> Dictionary {
    let mut exports = Dictionary::new();
    exports.insert_value("table", Value::builtin("table.table"));
    exports
}

pub(super) fn resolve(name: &str) -> Option<BuiltinFn> {
    match name {
        "table" => Some(table),
        _ => None,
    }
}

/// `table(rows)`: rows are dictionaries, resolved when the table is built.
fn table(interp: &mut Interpreter, args: &[Value], _: Span) -> EvalResult {
    require_args("table.table", 1, args)?;
    let Value::Array(items) = &args[0] else {
        return Err(wrong_arg_type("table.table", "an array of dictionaries", args[0].type_name()).into());
    };
    let items = items.borrow().clone();
    let mut rows = Vec::with_capacity(items.len());
    for item in &items {
        match interp.resolve_deep(item)? {
            Value::Dict(row) => rows.push(row.borrow().clone()),
            other => {
                return Err(
                    wrong_arg_type("table.table", "an array of dictionaries", other.type_name()).into(),
                )
            }
        }
    }
    Ok(Value::extension(Table::new(rows)))
}

/// Immutable list of rows. `sortBy` returns a new table.
#[derive(Debug)]
pub struct Table {
    rows: Rc<[Dictionary]>,
}

impl Table {
    fn new(rows: Vec<Dictionary>) -> Self {
        Self { rows: rows.into() }
    }

    fn cell(row: &Dictionary, column: &str) -> Value {
        row.get(column)
            .and_then(Binding::peek)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn column(&self, name: &str) -> Value {
        Value::array(self.rows.iter().map(|row| Self::cell(row, name)).collect())
    }

    fn sort_by(&self, name: &str) -> Table {
        let mut rows = self.rows.to_vec();
        rows.sort_by(|a, b| {
            compare_values(
                &Self::cell(a, name),
                &Self::cell(b, name),
                NumericCoercion::ParseStrings,
            )
        });
        Table::new(rows)
    }

    fn rows(&self) -> Value {
        Value::array(
            self.rows
                .iter()
                .map(|row| Value::dict(row.clone()))
                .collect(),
        )
    }
}

impl Extension for Table {
    fn type_name(&self) -> &'static str {
        "table"
    }

    fn inspect(&self) -> String {
        format!("<table rows={}>", self.rows.len())
    }

    fn equals(&self, other: &dyn Extension) -> bool {
        other.as_any().downcast_ref::<Table>().is_some_and(|other| {
            self.rows.len() == other.rows.len()
                && self
                    .rows
                    .iter()
                    .zip(other.rows.iter())
                    .all(|(a, b)| Value::dict(a.clone()).equals(&Value::dict(b.clone())))
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "length" => Some(length_value(self.rows.len())),
            _ => None,
        }
    }

    fn call_method(&self, method: &str, args: &[Value]) -> Option<Result<Value, EvalError>> {
        let result = match method {
            "count" => require_args("count", 0, args).map(|()| length_value(self.rows.len())),
            "column" => require_args("column", 1, args)
                .and_then(|()| require_str_arg("column", args, 0))
                .map(|name| self.column(name)),
            "sortBy" => require_args("sortBy", 1, args)
                .and_then(|()| require_str_arg("sortBy", args, 0))
                .map(|name| Value::extension(self.sort_by(name))),
            "rows" => require_args("rows", 0, args).map(|()| self.rows()),
            _ => return None,
        };
        Some(result)
    }
}
