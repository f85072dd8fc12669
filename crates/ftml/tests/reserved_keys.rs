//! Version and encoding gate behavior for the reserved top-level keys.

use ftml::{Error, LoadOptions, Value};

#[test]
fn test_load_no_version() {
    let doc = ftml::load("key = \"value\"").unwrap();
    assert_eq!(doc["key"], Value::from("value"));
}

#[test]
fn test_load_matching_version() {
    let current = ftml::get_ftml_version();
    let doc = ftml::load(&format!("ftml_version = \"{current}\"\nkey = \"value\"\n")).unwrap();
    assert_eq!(doc["ftml_version"], Value::from(current));
    assert_eq!(doc["key"], Value::from("value"));
}

/// Produce a version strictly newer than `current`, whatever its stage.
fn bump_version(current: &str) -> String {
    for stage in ["rc", "b", "a"] {
        if let Some((base, suffix)) = current.split_once(stage)
            && !suffix.is_empty()
            && suffix.chars().all(|c| c.is_ascii_digit())
        {
            let n: u32 = suffix.parse().unwrap();
            return format!("{base}{stage}{}", n + 1);
        }
    }
    let (major, minor) = current.split_once('.').unwrap();
    let minor: u32 = minor.parse().unwrap();
    format!("{major}.{}", minor + 1)
}

#[test]
fn test_load_newer_version_fails() {
    let newer = bump_version(ftml::get_ftml_version());
    let err = ftml::load(&format!("ftml_version = \"{newer}\"\nkey = \"value\"\n")).unwrap_err();
    let Error::Version(err) = err else {
        panic!("expected version error, got {err:?}")
    };
    assert!(err.message.contains("Document requires FTML version"));
    assert!(err.message.contains("Please update your parser"));
}

#[test]
fn test_load_newer_major_version_fails() {
    let major: u32 = ftml::get_ftml_version()
        .split('.')
        .next()
        .unwrap()
        .parse()
        .unwrap();
    let newer = format!("{}.0", major + 1);
    let err = ftml::load(&format!("ftml_version = \"{newer}\"\nkey = \"value\"\n")).unwrap_err();
    assert!(matches!(err, Error::Version(_)));
}

#[test]
fn test_load_invalid_version_format() {
    let err = ftml::load("ftml_version = \"1.0.0\"\nkey = \"value\"\n").unwrap_err();
    let Error::Version(err) = err else {
        panic!("expected version error")
    };
    assert!(err.message.contains("Invalid FTML version format"));
}

#[test]
fn test_load_non_string_version() {
    let err = ftml::load("ftml_version = 1.0\nkey = \"value\"\n").unwrap_err();
    let Error::Version(err) = err else {
        panic!("expected version error")
    };
    assert!(err.message.contains("Version must be a string"));
}

#[test]
fn test_version_check_disabled() {
    let major: u32 = ftml::get_ftml_version()
        .split('.')
        .next()
        .unwrap()
        .parse()
        .unwrap();
    let newer = format!("{}.0", major + 1);
    let doc = ftml::load_with(
        &format!("ftml_version = \"{newer}\"\nkey = \"value\"\n"),
        None,
        LoadOptions {
            check_version: false,
            ..LoadOptions::default()
        },
    )
    .unwrap();
    assert_eq!(doc["ftml_version"], Value::from(newer.as_str()));
}

#[test]
fn test_reserved_version_key_stays_visible() {
    let current = ftml::get_ftml_version();
    let doc = ftml::load(&format!(
        "ftml_version = \"{current}\"\nversion = \"app-1.2.3\"\nkey = \"value\"\n"
    ))
    .unwrap();
    assert!(doc.contains_key("ftml_version"));
    assert_eq!(doc["version"], Value::from("app-1.2.3"));
}

#[test]
fn test_load_known_encodings() {
    for name in ["utf-8", "utf8", "UTF-8", "UTF8", "utf_8", "latin-1"] {
        let doc = ftml::load(&format!("ftml_encoding = \"{name}\"\nkey = \"value\"\n")).unwrap();
        assert_eq!(doc["ftml_encoding"], Value::from(name));
    }
}

#[test]
fn test_load_unsupported_encoding() {
    let err = ftml::load("ftml_encoding = \"unsupported\"\nkey = \"value\"\n").unwrap_err();
    let Error::Encoding(err) = err else {
        panic!("expected encoding error")
    };
    assert!(err.message.contains("Unsupported encoding"));
}

#[test]
fn test_load_non_string_encoding() {
    let err = ftml::load("ftml_encoding = 123\nkey = \"value\"\n").unwrap_err();
    let Error::Encoding(err) = err else {
        panic!("expected encoding error")
    };
    assert!(err.message.contains("Invalid encoding"));
    assert!(err.message.contains("Encoding must be a string"));
}

#[test]
fn test_dump_checks_encoding() {
    let mut map = ftml::Map::new();
    map.insert("ftml_encoding".into(), Value::from("invalid-encoding"));
    map.insert("value".into(), Value::from("test"));
    let doc = ftml::FtmlDocument::from_map(map);
    assert!(matches!(ftml::dump(&doc), Err(Error::Encoding(_))));

    let mut map = ftml::Map::new();
    map.insert("ftml_encoding".into(), Value::from("utf-8"));
    map.insert("value".into(), Value::from("test"));
    let doc = ftml::FtmlDocument::from_map(map);
    let out = ftml::dump(&doc).unwrap();
    assert!(out.contains("ftml_encoding = \"utf-8\""));
}

#[test]
fn test_reserved_encoding_key_stays_visible() {
    let doc =
        ftml::load("ftml_encoding = \"utf-8\"\nencoding = \"custom\"\nkey = \"value\"\n").unwrap();
    assert_eq!(doc["ftml_encoding"], Value::from("utf-8"));
    assert_eq!(doc["encoding"], Value::from("custom"));
}
