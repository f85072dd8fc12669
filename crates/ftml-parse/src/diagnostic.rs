//! Diagnostic rendering for parser errors.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::{ParseError, ParseErrorKind};

impl ParseError {
    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source
    /// context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let range = self.span.start as usize..(self.span.end as usize).min(source.len());
        let label = match self.kind {
            ParseErrorKind::Lex => "invalid token",
            ParseErrorKind::DuplicateKey => "already defined in this object",
            ParseErrorKind::MissingSeparator => "expected a separator before this",
            ParseErrorKind::RootComma => "commas do not separate root-level pairs",
            ParseErrorKind::RootSeparator => "expected a newline before this",
            ParseErrorKind::UnclosedContainer => "opened here",
            ParseErrorKind::ExpectedKey => "expected a key here",
            ParseErrorKind::ExpectedEquals => "expected `=` here",
            ParseErrorKind::ExpectedValue => "expected a value here",
            ParseErrorKind::UnexpectedToken => "unexpected",
        };

        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(&self.message)
            .with_label(
                Label::new((filename, range))
                    .with_message(label)
                    .with_color(Color::Red),
            );

        let report = match self.kind {
            ParseErrorKind::RootComma => report.with_help(
                "root-level key-value pairs are separated by newlines, not commas",
            ),
            ParseErrorKind::MissingSeparator => {
                report.with_help("items inside `{}` and `[]` are comma-separated")
            }
            ParseErrorKind::DuplicateKey => {
                report.with_help("each key must appear only once in an object")
            }
            _ => report,
        };

        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }
}
