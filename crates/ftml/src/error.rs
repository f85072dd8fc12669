//! Unified error type for the public API.

use ftml_parse::ParseError;
use ftml_schema::{SchemaError, ValidationError};

use crate::encoding::EncodingError;
use crate::version::VersionError;

/// Any error the public API can return.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document failed to lex or parse.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// The schema expression failed to parse.
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Validation failed; every error from the run is included.
    #[error("Validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The document declares a version this engine cannot honor.
    #[error("{0}")]
    Version(#[from] VersionError),

    /// The document declares an unknown or malformed encoding.
    #[error("{0}")]
    Encoding(#[from] EncodingError),

    /// File I/O failed in `load_file` / `dump_file`.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
