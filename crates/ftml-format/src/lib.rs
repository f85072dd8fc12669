//! Canonical serializer for FTML.
//!
//! Emits FTML text from a commented AST, preserving every comment slot so
//! that parse → dump round-trips keep authorial commentary intact.

mod options;
pub use options::FormatOptions;

mod scalar;
pub use scalar::{escape_double_quoted, format_key, format_scalar, is_bare_key};

mod writer;
pub use writer::FtmlWriter;

mod ast_format;
pub use ast_format::format_document;
