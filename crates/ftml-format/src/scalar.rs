//! Scalar and key rendering for FTML output.

use std::borrow::Cow;

use ftml_parse::Scalar;

/// Check if a key can be written without quotes.
///
/// Bare keys are identifiers that don't collide with a literal keyword;
/// `null = 1` would re-lex as the null literal, so the key gets quoted.
pub fn is_bare_key(key: &str) -> bool {
    if key.is_empty() || matches!(key, "true" | "false" | "null") {
        return false;
    }
    let mut chars = key.chars();
    let first = chars.next().unwrap();
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render a key, quoting it when it isn't a valid identifier.
pub fn format_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        format!("\"{}\"", escape_double_quoted(key))
    }
}

/// Escape string content for double-quoted output.
///
/// Non-ASCII characters pass through verbatim.
pub fn escape_double_quoted(s: &str) -> Cow<'_, str> {
    if !s
        .chars()
        .any(|c| matches!(c, '"' | '\\' | '\n' | '\t' | '\r' | '\x07' | '\x08' | '\x0C' | '\x0B'))
    {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\x07' => result.push_str("\\a"),
            '\x08' => result.push_str("\\b"),
            '\x0C' => result.push_str("\\f"),
            '\x0B' => result.push_str("\\v"),
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Render a scalar literal.
pub fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(true) => "true".to_string(),
        Scalar::Bool(false) => "false".to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => {
            // Display for f64 never uses exponent notation; only make sure
            // the output re-lexes as a FLOAT rather than an INT.
            let s = format!("{f}");
            if s.contains('.') { s } else { format!("{s}.0") }
        }
        Scalar::String(s) => format!("\"{}\"", escape_double_quoted(s)),
    }
}
