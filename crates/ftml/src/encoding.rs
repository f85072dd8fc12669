//! The `ftml_encoding` reserved key.
//!
//! Encoding names normalize by lowercasing and stripping everything that
//! isn't a letter or digit, so `UTF-8`, `utf8`, and `utf_8` all name the
//! same encoding.

use ftml_tree::{Map, Value};

/// An unsupported or malformed `ftml_encoding`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingError {
    /// Human-readable message.
    pub message: String,
}

impl EncodingError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EncodingError {}

/// Normalized names of the encodings the engine recognizes.
const KNOWN_ENCODINGS: &[&str] = &[
    "utf8",
    "utf16",
    "utf16le",
    "utf16be",
    "utf32",
    "ascii",
    "latin1",
    "iso88591",
    "cp1252",
    "windows1252",
];

/// Normalize an encoding name: lowercase, strip non-alphanumerics.
pub(crate) fn normalize_encoding(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Enforce the encoding policy on a document's value map.
pub(crate) fn check_document_encoding(root: &Map) -> Result<(), EncodingError> {
    let value = match root.get("ftml_encoding") {
        None => return Ok(()),
        Some(v) => v,
    };

    let Value::String(name) = value else {
        return Err(EncodingError::new(format!(
            "Invalid encoding: Encoding must be a string, got {}",
            value.type_name()
        )));
    };

    if !KNOWN_ENCODINGS.contains(&normalize_encoding(name).as_str()) {
        return Err(EncodingError::new(format!("Unsupported encoding '{name}'")));
    }

    Ok(())
}
