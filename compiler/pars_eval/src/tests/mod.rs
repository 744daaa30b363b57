//! End-to-end evaluator tests: source text in, value or error out.

mod computed_tests;
mod control_tests;
mod methods_tests;
mod operators_tests;

use pars_ir::SharedInterner;
use pars_value::{EvalError, Value};

use crate::{buffer_handler, InterpreterBuilder, MemoryLoader, RunError};

/// Outcome of one program run plus everything it printed.
pub(crate) struct Run {
    pub result: Result<Value, EvalError>,
    pub output: String,
}

/// Run `source` with `loader` as the module source.
pub(crate) fn run_with(loader: MemoryLoader, source: &str) -> Run {
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new(SharedInterner::new())
        .print_handler(handler.clone())
        .loader(loader)
        .build();
    let result = match interp.run_source("test.pars", source) {
        Ok(value) => Ok(value),
        Err(RunError::Eval(err)) => Err(err),
        Err(RunError::Parse { errors, .. }) => panic!("parse errors: {errors:?}"),
    };
    Run {
        result,
        output: handler.get_output(),
    }
}

pub(crate) fn run(source: &str) -> Run {
    run_with(MemoryLoader::new(), source)
}

/// Inspected program result; errors render as `CODE: message`.
pub(crate) fn inspect(source: &str) -> String {
    match run(source).result {
        Ok(value) => value.inspect(),
        Err(err) => format!("{}: {}", err.code(), err.message),
    }
}

pub(crate) fn error_code(source: &str) -> Option<String> {
    run(source).result.err().map(|err| err.code().to_string())
}
