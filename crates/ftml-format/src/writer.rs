//! Low-level FTML output writer.
//!
//! Tracks nesting depth and indentation; the emission walk in
//! [`crate::format_document`] drives it.

use crate::FormatOptions;

/// Low-level FTML output writer.
pub struct FtmlWriter {
    out: String,
    depth: usize,
    options: FormatOptions,
}

impl FtmlWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Create a new writer with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            options,
        }
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether comments should be emitted.
    pub fn include_comments(&self) -> bool {
        self.options.include_comments
    }

    /// Enter one nesting level.
    pub fn begin(&mut self) {
        self.depth += 1;
    }

    /// Leave one nesting level.
    pub fn end(&mut self) {
        debug_assert!(self.depth > 0, "unbalanced writer depth");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write indentation for the current depth.
    pub fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(self.options.indent);
        }
    }

    /// Write a raw string.
    pub fn write_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Terminate the current line.
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Write a full line at the current indent.
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.out.push_str(s);
        self.out.push('\n');
    }
}

impl Default for FtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
