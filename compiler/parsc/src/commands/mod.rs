//! Command handlers for the `pars` CLI.
//!
//! Each submodule implements one command. Reading files, option parsing
//! and problem rendering are shared here.

use std::fmt::Write as _;

use pars_diagnostic::{render_problem, Problem};
use pars_eval::EvalError;
use pars_parse::ParseError;

use crate::CliError;

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{eval_source, run_file};

/// Options shared by `run` and `eval`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Call depth limit; `None` keeps the interpreter default.
    pub max_depth: Option<usize>,
}

/// Split `args` into run options and the first positional argument.
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, Option<&str>), CliError> {
    let mut options = RunOptions::default();
    let mut positional = None;
    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse()
                .map_err(|_| CliError::InvalidOption(arg.clone()))?;
            options.max_depth = Some(depth);
        } else if arg.starts_with('-') {
            return Err(CliError::InvalidOption(arg.clone()));
        } else if positional.is_none() {
            positional = Some(arg.as_str());
        }
    }
    Ok((options, positional))
}

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

fn parse_problem(error: &ParseError) -> Problem {
    Problem::new(error.to_string(), error.span())
}

/// Render every parse error to stderr.
pub(crate) fn report_parse_errors(name: &str, source: &str, errors: &[ParseError]) -> CliError {
    for error in errors {
        eprint!("{}", render_problem(&parse_problem(error), name, source));
    }
    CliError::Reported {
        count: errors.len(),
    }
}

/// Text report of an uncaught evaluation error: code, position, message,
/// notes and the call backtrace.
pub fn eval_report(error: &EvalError) -> String {
    let mut out = format!("error[{}]: {error}\n", error.code());
    for note in &error.notes {
        let _ = writeln!(out, "  note: {}", note.message);
    }
    if let Some(backtrace) = &error.backtrace {
        out.push_str(&backtrace.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pars_eval::errors::{division_by_zero, undefined_variable, EvalNote};
    use pars_ir::Span;
    use pretty_assertions::assert_eq;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn run_options_take_max_depth_and_a_path() {
        let args = args(&["--max-depth=50", "main.pars", "extra"]);
        let parsed = parse_run_options(&args).ok();
        assert_eq!(
            parsed,
            Some((
                RunOptions {
                    max_depth: Some(50)
                },
                Some("main.pars")
            ))
        );
    }

    #[test]
    fn bad_options_are_rejected() {
        assert!(matches!(
            parse_run_options(&args(&["--max-depth=lots"])),
            Err(CliError::InvalidOption(_))
        ));
        assert!(matches!(
            parse_run_options(&args(&["--fast"])),
            Err(CliError::InvalidOption(_))
        ));
    }

    #[test]
    fn eval_report_has_code_and_position() {
        let error = division_by_zero().with_span(Span::new(8, 13)).with_position(2, 9);
        assert_eq!(
            eval_report(&error),
            "error[OP-0002]: line 2, column 9: Division by zero\n"
        );
    }

    #[test]
    fn eval_report_lists_notes() {
        let error = undefined_variable("totl")
            .with_note(EvalNote::new("did you mean `total`?"));
        let report = eval_report(&error);
        assert!(report.starts_with("error[UNDEF-0001]: Identifier not found: totl"));
        assert!(report.contains("note: did you mean `total`?"));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(CliError::Reported { count: 2 }.exit_code(), 1);
        assert_eq!(CliError::MissingArgument("file path").exit_code(), 2);
    }
}
