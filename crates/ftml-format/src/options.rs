//! Formatting options for FTML serialization.

/// Options for FTML serialization.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Indentation string per nesting level (default: four spaces).
    pub indent: &'static str,

    /// Emit comments from the AST (default: true).
    pub include_comments: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: "    ",
            include_comments: true,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip all comment slots when emitting.
    pub fn without_comments(mut self) -> Self {
        self.include_comments = false;
        self
    }
}
