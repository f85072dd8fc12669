//! Schema and validation error types.

/// A fatal error in a schema expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Human-readable message.
    pub message: String,
    /// 1-based line, or 0 when the error has no single source position
    /// (e.g. a default failing its own type check).
    pub line: u32,
    /// 1-based column, or 0.
    pub col: u32,
}

impl SchemaError {
    /// Create an error with a source position.
    pub fn at(message: impl Into<String>, line: u32, col: u32) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }

    /// Create an error without a source position.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: 0,
            col: 0,
        }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line > 0 {
            write!(f, "{} at line {}, col {}", self.message, self.line, self.col)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for SchemaError {}

/// One validation failure.
///
/// Validation collects rather than raises, so a run reports every failing
/// field at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the failing value, `parent.child[index]` style.
    /// Empty for document-level errors.
    pub path: String,
    /// Human-readable message (already includes the path where useful).
    pub message: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}
