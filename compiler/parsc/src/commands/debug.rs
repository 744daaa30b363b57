//! Debug commands: `lex` and `parse` for inspecting the front end.

use pars_ir::StringInterner;
use pars_parse::ParseError;

use super::{read_file, report_parse_errors};
use crate::CliError;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) -> Result<(), CliError> {
    let content = read_file(path)?;
    let interner = StringInterner::new();
    let lexed = pars_lexer::lex(&content, &interner);

    println!("Tokens for '{}' ({} tokens):", path, lexed.tokens.len());
    for tok in &lexed.tokens {
        println!("  {} @ {}..{}", tok.kind, tok.span.start, tok.span.end);
    }
    if lexed.errors.is_empty() {
        Ok(())
    } else {
        let errors: Vec<ParseError> = lexed.errors.into_iter().map(Into::into).collect();
        Err(report_parse_errors(path, &content, &errors))
    }
}

/// Parse a file and display a summary of the tree.
pub fn parse_file(path: &str) -> Result<(), CliError> {
    let content = read_file(path)?;
    let interner = StringInterner::new();
    let parsed = pars_parse::parse(&content, &interner);
    let statements = parsed.arena.get_stmts(parsed.program);

    println!("Parse result for '{path}':");
    println!("  Statements: {}", statements.len());
    println!("  Expressions: {}", parsed.arena.expr_count());
    println!("  Errors: {}", parsed.errors.len());

    if !statements.is_empty() {
        println!();
        println!("Statements:");
        for stmt in statements {
            println!("  {}..{} {:?}", stmt.span.start, stmt.span.end, stmt.kind);
        }
    }

    if parsed.has_errors() {
        Err(report_parse_errors(path, &content, &parsed.errors))
    } else {
        Ok(())
    }
}
