//! Terminal rendering of problems with source excerpts.

use std::io::Cursor;

use ariadne::{Config, Label, Report, ReportKind, Source};
use pars_ir::Span;

/// A reportable problem: parse errors and uncaught evaluation errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub code: Option<String>,
    pub message: String,
    pub span: Span,
    pub label: Option<String>,
    pub notes: Vec<String>,
}

impl Problem {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Problem {
            code: None,
            message: message.into(),
            span,
            label: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Render a problem against its source file, without color.
///
/// Falls back to a plain `error: message` line if the report cannot be
/// written.
pub fn render_problem(problem: &Problem, filename: &str, source: &str) -> String {
    let end = (problem.span.end as usize).min(source.len());
    let start = (problem.span.start as usize).min(end);
    let range = start..end;

    let mut builder = Report::build(ReportKind::Error, (filename, range.clone()))
        .with_config(Config::default().with_color(false))
        .with_message(&problem.message)
        .with_label(
            Label::new((filename, range))
                .with_message(problem.label.as_deref().unwrap_or(&problem.message)),
        );
    if let Some(code) = &problem.code {
        builder = builder.with_code(code);
    }
    for note in &problem.notes {
        builder = builder.with_note(note);
    }

    let mut bytes = Cursor::new(Vec::new());
    match builder
        .finish()
        .write((filename, Source::from(source)), &mut bytes)
    {
        Ok(()) => String::from_utf8_lossy(&bytes.into_inner()).into_owned(),
        Err(_) => format!("error: {}\n", problem.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_mentions_message_and_code() {
        let problem = Problem::new("Identifier not found: missing", Span::new(8, 15))
            .with_code("UNDEF-0001")
            .with_note("define it with `let`");
        let rendered = render_problem(&problem, "main.pars", "let a = missing");
        assert!(rendered.contains("Identifier not found: missing"));
        assert!(rendered.contains("UNDEF-0001"));
        assert!(rendered.contains("define it with `let`"));
        assert!(rendered.contains("main.pars"));
    }

    #[test]
    fn out_of_range_span_is_clamped() {
        let problem = Problem::new("unexpected end of input", Span::new(40, 50));
        let rendered = render_problem(&problem, "x.pars", "let");
        assert!(rendered.contains("unexpected end of input"));
    }

    #[test]
    fn builder_collects_notes() {
        let problem = Problem::new("m", Span::DUMMY)
            .with_label("here")
            .with_note("a")
            .with_note("b");
        assert_eq!(problem.notes, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(problem.label.as_deref(), Some("here"));
    }
}
