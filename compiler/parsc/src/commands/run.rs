//! The `run` and `eval` commands: evaluate a program and print its result.

use pars_eval::{stdout_handler, InterpreterBuilder, RunError, Value};
use pars_ir::SharedInterner;

use super::{eval_report, read_file, report_parse_errors, RunOptions};
use crate::CliError;

/// Run a source file. Local imports resolve next to it.
pub fn run_file(path: &str, options: RunOptions) -> Result<(), CliError> {
    let source = read_file(path)?;
    let builder = InterpreterBuilder::new(SharedInterner::new()).source_path(path);
    execute(builder, options, path, &source)
}

/// Run source text given on the command line. Local imports resolve
/// against the working directory.
pub fn eval_source(source: &str, options: RunOptions) -> Result<(), CliError> {
    let builder = InterpreterBuilder::new(SharedInterner::new()).module_root(".");
    execute(builder, options, "<eval>", source)
}

#[tracing::instrument(level = "debug", skip(builder, source))]
fn execute(
    builder: InterpreterBuilder,
    options: RunOptions,
    name: &str,
    source: &str,
) -> Result<(), CliError> {
    let builder = builder.print_handler(stdout_handler());
    let builder = match options.max_depth {
        Some(depth) => builder.max_call_depth(depth),
        None => builder,
    };
    let mut interp = builder.build();

    match interp.run_source(name, source) {
        Ok(Value::Null) => Ok(()),
        Ok(value) => {
            println!("{}", value.to_display_string());
            Ok(())
        }
        Err(RunError::Parse { file, errors }) => {
            Err(report_parse_errors(file.name(), file.text(), &errors))
        }
        Err(RunError::Eval(error)) => {
            eprint!("{}", eval_report(&error));
            Err(CliError::Reported { count: 1 })
        }
    }
}
