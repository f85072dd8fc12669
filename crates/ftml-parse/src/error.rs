//! Parse error types.

use ftml_tokenizer::{LexError, Span};

/// The kind of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The tokenizer rejected the input (unterminated string, bad number,
    /// unrecognized character).
    Lex,
    /// A token appeared where it makes no sense.
    UnexpectedToken,
    /// Expected a key (identifier or quoted string).
    ExpectedKey,
    /// Expected `=` after a key.
    ExpectedEquals,
    /// Expected a value after `=` (also raised when a container opener is
    /// pushed to the next line).
    ExpectedValue,
    /// Missing `,` between container items.
    MissingSeparator,
    /// The same key appeared twice in one object.
    DuplicateKey,
    /// Comma between root-level key-value pairs.
    RootComma,
    /// Two root-level pairs on one line.
    RootSeparator,
    /// A container was never closed.
    UnclosedContainer,
}

/// A fatal parse error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Human-readable message.
    pub message: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub col: u32,
    /// Source range, for diagnostic rendering.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        line: u32,
        col: u32,
        span: Span,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            col,
            span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}, col {}", self.message, self.line, self.col)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::Lex,
            message: err.message,
            line: err.line,
            col: err.col,
            span: err.span,
        }
    }
}
