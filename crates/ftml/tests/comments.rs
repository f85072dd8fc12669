//! Comment preservation across load → dump round trips.

use ftml::{CommentKind, Value};
use pretty_assertions::assert_eq;

fn roundtrip(source: &str) -> String {
    let doc = ftml::load(source).unwrap();
    ftml::dump(&doc).unwrap()
}

#[test]
fn test_doc_comment_scenario() {
    // Inner doc comments stay on the document, the trailing regular
    // comment lands in end_leading_comments, and both survive a dump.
    let source = "//! doc\n//! doc2\nkey = 1\n// trailing\n";
    let doc = ftml::load(source).unwrap();

    let ast = doc.ast();
    assert_eq!(ast.inner_doc_comments.len(), 2);
    assert_eq!(ast.inner_doc_comments[0].text, "doc");
    assert_eq!(ast.inner_doc_comments[1].text, "doc2");
    assert_eq!(ast.end_leading_comments.len(), 1);
    assert_eq!(ast.end_leading_comments[0].text, "trailing");
    assert_eq!(ast.end_leading_comments[0].kind, CommentKind::Regular);

    let dumped = ftml::dump(&doc).unwrap();
    assert!(dumped.contains("//! doc\n"));
    assert!(dumped.contains("//! doc2\n"));
    assert!(dumped.contains("// trailing\n"));
}

#[test]
fn test_full_comment_roundtrip_is_stable() {
    let source = "//! Document-level inner doc comment\n// Regular leading comment for key1\n/// Outer doc comment for key1\nkey1 = \"value1\"  // Inline comment for key1\n/// Outer doc comment for list\nmy_list = [  // list inline\n    //! Inner doc comment for list\n    /// Outer doc comment for item\n    \"first\",  // item inline\n    \"second\"\n]\nmy_obj = {  // obj inline\n    //! Inner doc comment for object\n    /// Outer doc comment for property\n    prop1 = \"value1\"  // prop inline\n    // end of object\n}\n// after everything\n";

    let once = roundtrip(source);
    // The canonical form is a fixed point: dumping it again changes nothing.
    let twice = roundtrip(&once);
    assert_eq!(once, twice);

    for fragment in [
        "//! Document-level inner doc comment",
        "// Regular leading comment for key1",
        "/// Outer doc comment for key1",
        "// Inline comment for key1",
        "/// Outer doc comment for list",
        "// list inline",
        "//! Inner doc comment for list",
        "/// Outer doc comment for item",
        "// item inline",
        "// obj inline",
        "//! Inner doc comment for object",
        "/// Outer doc comment for property",
        "// prop inline",
        "// end of object",
        "// after everything",
    ] {
        assert!(once.contains(fragment), "missing {fragment:?} in:\n{once}");
    }
}

#[test]
fn test_comment_only_document_roundtrip() {
    let doc = ftml::load("// Comment 1\n// Comment 2").unwrap();
    assert!(doc.is_empty());
    let dumped = ftml::dump(&doc).unwrap();
    assert_eq!(dumped, "// Comment 1\n// Comment 2\n");
}

#[test]
fn test_values_equal_after_roundtrip() {
    let source = "// config\nconfig = {\n    theme = \"dark\",  // theme choice\n    levels = [1, 2, 3]\n}\nname = \"app\"\n";
    let doc = ftml::load(source).unwrap();
    let reloaded = ftml::load(&roundtrip(source)).unwrap();
    assert_eq!(doc.as_map(), reloaded.as_map());
}

#[test]
fn test_dump_without_comments() {
    let source = "// leading\nkey = 1  // inline\nobj = {  // open\n    //! inner\n    a = 2\n}\n";
    let doc = ftml::load(source).unwrap();
    let out = ftml::dump_with(
        &doc,
        None,
        ftml::DumpOptions {
            include_comments: false,
            ..ftml::DumpOptions::default()
        },
    )
    .unwrap();
    assert_eq!(out, "key = 1\nobj = {\n    a = 2\n}\n");
}

#[test]
fn test_load_without_preserving_comments() {
    let doc = ftml::load_with(
        "// note\nkey = 1  // inline\n",
        None,
        ftml::LoadOptions {
            preserve_comments: false,
            ..ftml::LoadOptions::default()
        },
    )
    .unwrap();
    assert_eq!(doc["key"], Value::Int(1));
    assert_eq!(ftml::dump(&doc).unwrap(), "key = 1\n");
}

#[test]
fn test_comment_ownership_is_exclusive() {
    // Every comment in the source appears exactly once in the dump.
    let source = "// one\nkey1 = 1\n// two\nkey2 = 2\n";
    let dumped = roundtrip(source);
    assert_eq!(dumped.matches("// one").count(), 1);
    assert_eq!(dumped.matches("// two").count(), 1);
}
