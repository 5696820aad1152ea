//! Source-context rendering for diagnostics.
//!
//! Turns a (source, message, span) triple into a printable block with the
//! offending line and a caret label, using miette's graphical handler
//! without colours so output is stable across terminals.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, SourceSpan};
use thiserror::Error;

use super::Span;

const RENDER_WIDTH: usize = 100;

/// Anything that can be located in the source and described in one line.
pub trait Reportable: fmt::Display {
    fn span(&self) -> Span;
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
struct SourceDiagnostic {
    message: String,
    #[source_code]
    src: String,
    #[label("here")]
    span: SourceSpan,
}

/// Render one diagnostic block for `message` at `span` within `source`.
pub fn render(source: &str, message: &str, span: Span) -> String {
    let start = span.start.min(source.len());
    let end = span.end.clamp(start, source.len());

    let diagnostic = SourceDiagnostic {
        message: message.to_owned(),
        src: source.to_owned(),
        span: Span::new(start, end).into(),
    };

    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .with_width(RENDER_WIDTH);

    let mut out = String::new();
    match handler.render_report(&mut out, &diagnostic) {
        Ok(()) => out.trim_end().to_owned(),
        Err(_) => format!("{} (at {}..{})", message, start, end),
    }
}

/// Render every diagnostic, one block each, separated by newlines.
pub fn render_all<'a, E, I>(source: &str, diagnostics: I) -> String
where
    E: Reportable + 'a,
    I: IntoIterator<Item = &'a E>,
{
    diagnostics
        .into_iter()
        .map(|diagnostic| render(source, &diagnostic.to_string(), diagnostic.span()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note(&'static str, Span);

    impl fmt::Display for Note {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl Reportable for Note {
        fn span(&self) -> Span {
            self.1
        }
    }

    #[test]
    fn render_shows_message_and_line() {
        let out = render("let x = @;", "unexpected character '@'", Span::new(8, 9));

        assert!(out.contains("unexpected character '@'"), "{}", out);
        assert!(out.contains("let x = @;"), "{}", out);
        assert!(out.contains("here"), "{}", out);
    }

    #[test]
    fn render_clamps_out_of_range_spans() {
        let out = render("1 +", "expected expression", Span::new(40, 50));

        assert!(out.contains("expected expression"), "{}", out);
    }

    #[test]
    fn render_all_joins_blocks() {
        let source = "@\n#";
        let notes = [
            Note("first problem", Span::new(0, 1)),
            Note("second problem", Span::new(2, 3)),
        ];

        let out = render_all(source, &notes);
        let first = out.find("first problem").expect("first block");
        let second = out.find("second problem").expect("second block");

        assert!(first < second);
        assert!(out[first..second].contains('\n'));
    }

    #[test]
    fn render_all_of_nothing_is_empty() {
        let notes: [Note; 0] = [];

        assert_eq!(render_all("x", &notes), "");
    }
}
