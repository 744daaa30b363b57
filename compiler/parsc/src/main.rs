//! Parsley CLI

use parsc::commands::{eval_source, lex_file, parse_file, parse_run_options, run_file};
use parsc::{init_tracing, CliError};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let result = match command.as_str() {
        "run" => run_command(&args[2..]),
        "eval" => eval_command(&args[2..]),
        "lex" => match args.get(2) {
            Some(path) => lex_file(path),
            None => {
                eprintln!("Usage: pars lex <file.pars>");
                std::process::exit(2);
            }
        },
        "parse" => match args.get(2) {
            Some(path) => parse_file(path),
            None => {
                eprintln!("Usage: pars parse <file.pars>");
                std::process::exit(2);
            }
        },
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("Parsley {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            // A bare source file runs directly.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pars"))
            {
                run_command(&args[1..])
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(2);
            }
        }
    };

    if let Err(err) = result {
        if !matches!(err, CliError::Reported { .. }) {
            eprintln!("error: {err}");
        }
        std::process::exit(err.exit_code());
    }
}

fn run_command(args: &[String]) -> Result<(), CliError> {
    let (options, path) = parse_run_options(args)?;
    let path = path.ok_or(CliError::MissingArgument("file path"))?;
    run_file(path, options)
}

fn eval_command(args: &[String]) -> Result<(), CliError> {
    let (options, source) = parse_run_options(args)?;
    let source = source.ok_or(CliError::MissingArgument("source text"))?;
    eval_source(source, options)
}

fn print_usage() {
    println!("Parsley interpreter");
    println!();
    println!("Usage: pars <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.pars>      Run a Parsley program");
    println!("  eval <source>        Evaluate source text");
    println!("  lex <file.pars>      Tokenize and display tokens");
    println!("  parse <file.pars>    Parse and display statements");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=<n>      Call depth limit (default 10000)");
    println!();
    println!("Environment:");
    println!("  PARS_LOG=<filter>    Trace output, e.g. PARS_LOG=pars_eval=debug");
    println!();
    println!("Examples:");
    println!("  pars run main.pars");
    println!("  pars main.pars --max-depth=500");
    println!("  pars eval 'let {{floor}} = import @std/math; floor(2.5)'");
}
