//! The `ftml_version` reserved key.
//!
//! Version strings are `MAJOR.MINOR` with an optional pre-release suffix
//! `aN`, `bN`, or `rcN`. Ordering is numeric on major, minor, and the
//! pre-release counter, with release > rc > b > a at equal major.minor.

use std::sync::OnceLock;

use ftml_tree::{Map, Value};
use regex::Regex;

/// The FTML language version this engine implements.
pub const FTML_VERSION: &str = "1.0a1";

/// An incompatible or malformed `ftml_version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionError {
    /// Human-readable message.
    pub message: String,
}

impl VersionError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for VersionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for VersionError {}

/// Pre-release stage, ordered by maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Alpha,
    Beta,
    Rc,
    Release,
}

/// A parsed FTML version, ordered by (major, minor, stage, stage number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FtmlVersion {
    major: u32,
    minor: u32,
    stage: Stage,
    stage_num: u32,
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)(?:(a|b|rc)(\d+))?$").expect("valid regex"))
}

fn parse_version(s: &str) -> Result<FtmlVersion, VersionError> {
    let caps = version_regex().captures(s).ok_or_else(|| {
        VersionError::new(format!(
            "Invalid FTML version format: '{s}' (expected MAJOR.MINOR with optional aN/bN/rcN suffix)"
        ))
    })?;

    let major: u32 = caps[1].parse().map_err(|_| {
        VersionError::new(format!("Invalid FTML version format: '{s}'"))
    })?;
    let minor: u32 = caps[2].parse().map_err(|_| {
        VersionError::new(format!("Invalid FTML version format: '{s}'"))
    })?;

    let (stage, stage_num) = match (caps.get(3), caps.get(4)) {
        (Some(stage), Some(num)) => {
            let stage = match stage.as_str() {
                "a" => Stage::Alpha,
                "b" => Stage::Beta,
                "rc" => Stage::Rc,
                _ => unreachable!("regex only admits a/b/rc"),
            };
            let num: u32 = num.as_str().parse().map_err(|_| {
                VersionError::new(format!("Invalid FTML version format: '{s}'"))
            })?;
            (stage, num)
        }
        _ => (Stage::Release, 0),
    };

    Ok(FtmlVersion {
        major,
        minor,
        stage,
        stage_num,
    })
}

/// Enforce the version policy on a freshly parsed document.
///
/// Absent `ftml_version` is fine; a non-string one is an error; a version
/// newer than the engine's is an error.
pub(crate) fn check_document_version(root: &Map) -> Result<(), VersionError> {
    let value = match root.get("ftml_version") {
        None => return Ok(()),
        Some(v) => v,
    };

    let Value::String(doc_version) = value else {
        return Err(VersionError::new(format!(
            "Invalid FTML version: Version must be a string, got {}",
            value.type_name()
        )));
    };

    let parsed = parse_version(doc_version)?;
    let current = parse_version(FTML_VERSION).expect("engine version is well-formed");

    if parsed > current {
        return Err(VersionError::new(format!(
            "Document requires FTML version {doc_version}, but this parser supports {FTML_VERSION}. Please update your parser."
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> FtmlVersion {
        parse_version(s).unwrap()
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!(
            v("1.0"),
            FtmlVersion {
                major: 1,
                minor: 0,
                stage: Stage::Release,
                stage_num: 0
            }
        );
        assert_eq!(v("1.0a1").stage, Stage::Alpha);
        assert_eq!(v("2.3rc4").stage_num, 4);

        assert!(parse_version("1.0.0").is_err());
        assert!(parse_version("1").is_err());
        assert!(parse_version("1.0beta1").is_err());
        assert!(parse_version("v1.0").is_err());
    }

    #[test]
    fn test_version_ordering() {
        assert!(v("1.0a1") < v("1.0a2"));
        assert!(v("1.0a2") < v("1.0b1"));
        assert!(v("1.0b1") < v("1.0rc1"));
        assert!(v("1.0rc1") < v("1.0"));
        assert!(v("1.0") < v("1.1a1"));
        assert!(v("1.9") < v("2.0"));
    }

    #[test]
    fn test_check_document_version() {
        let mut root = Map::new();
        assert!(check_document_version(&root).is_ok());

        root.insert("ftml_version".into(), Value::from(FTML_VERSION));
        assert!(check_document_version(&root).is_ok());

        root.insert("ftml_version".into(), Value::from("99.0"));
        let err = check_document_version(&root).unwrap_err();
        assert!(err.message.contains("Document requires FTML version"));
        assert!(err.message.contains("Please update your parser"));

        root.insert("ftml_version".into(), Value::Float(1.0));
        let err = check_document_version(&root).unwrap_err();
        assert!(err.message.contains("Version must be a string"));
    }
}
