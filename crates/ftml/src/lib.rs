//! FTML ("FlexTag Markup Language"): a human-authored configuration format
//! with a first-class, inline type schema.
//!
//! The two halves of the engine are (a) a comment-preserving document
//! parser whose output round-trips byte-for-byte interesting content, and
//! (b) a schema language with constraints, unions, and defaults that
//! validates and coerces the parsed values.
//!
//! ```
//! let doc = ftml::load("name = \"John\"\nage = 30\n").unwrap();
//! assert_eq!(doc["name"], ftml::Value::from("John"));
//!
//! let schema = ftml::Schema::parse("name: str\nage: int<min=0> = 18\n").unwrap();
//! assert!(ftml::validate(doc.as_map(), &schema).is_empty());
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

mod document;
mod encoding;
mod error;
mod version;

pub use document::FtmlDocument;
pub use encoding::EncodingError;
pub use error::Error;
pub use version::{FTML_VERSION, VersionError};

pub use ftml_format::FormatOptions;
pub use ftml_parse::{Comment, CommentKind, DocumentNode, ParseError, ParseErrorKind};
pub use ftml_schema::{
    Schema, SchemaError, SchemaValidator, TypeNode, ValidationError, apply_coercion,
    apply_defaults,
};
pub use ftml_tree::{Map, Value};

/// Options for [`load_with`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Fail on validation errors when a schema is given. When false, errors
    /// are collected on the returned document instead and defaults still
    /// apply.
    pub validate: bool,
    /// Keep comments in the attached AST for round-trip dumping.
    pub preserve_comments: bool,
    /// Enforce the `ftml_version` policy.
    pub check_version: bool,
    /// Reject unknown fields (overridable per-object with `ext=true`).
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            validate: true,
            preserve_comments: true,
            check_version: true,
            strict: true,
        }
    }
}

/// Options for [`dump_with`].
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// Validate against the schema (if given) before emitting.
    pub validate: bool,
    /// Emit comments from the AST.
    pub include_comments: bool,
    /// Reject unknown fields during the pre-dump validation.
    pub strict: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            validate: true,
            include_comments: true,
            strict: true,
        }
    }
}

/// The FTML language version this engine implements.
pub fn get_ftml_version() -> &'static str {
    FTML_VERSION
}

/// Load an FTML document with default options and no schema.
pub fn load(source: &str) -> Result<FtmlDocument, Error> {
    load_with(source, None, LoadOptions::default())
}

/// Load an FTML document, optionally validating against a schema.
pub fn load_with(
    source: &str,
    schema: Option<&Schema>,
    options: LoadOptions,
) -> Result<FtmlDocument, Error> {
    let source = normalize_source(source)?;

    let mut ast = ftml_parse::parse(&source)?;
    if !options.preserve_comments {
        strip_comments(&mut ast);
    }

    let root = ftml_tree::document_to_map(&ast);
    debug!("loaded document with {} root keys", root.len());

    if options.check_version {
        version::check_document_version(&root)?;
    }
    encoding::check_document_encoding(&root)?;

    let mut doc = FtmlDocument {
        root,
        ast,
        validation_errors: Vec::new(),
    };

    if let Some(schema) = schema {
        let errors = SchemaValidator::with_strict(schema, options.strict).validate(&doc.root);
        if options.validate && !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        apply_defaults(&mut doc.root, schema);
        apply_coercion(&mut doc.root, schema);
        doc.validation_errors = errors;
    }

    Ok(doc)
}

/// Load an FTML document from a file.
pub fn load_file(path: impl AsRef<Path>) -> Result<FtmlDocument, Error> {
    load_file_with(path, None, LoadOptions::default())
}

/// Load an FTML document from a file, optionally validating.
pub fn load_file_with(
    path: impl AsRef<Path>,
    schema: Option<&Schema>,
    options: LoadOptions,
) -> Result<FtmlDocument, Error> {
    let source = fs::read_to_string(path)?;
    load_with(&source, schema, options)
}

/// Serialize a document with default options and no schema.
pub fn dump(doc: &FtmlDocument) -> Result<String, Error> {
    dump_with(doc, None, DumpOptions::default())
}

/// Serialize a document, optionally validating against a schema first.
///
/// The AST is re-synced from the value map before emission: keys added to
/// the map get fresh nodes, removed keys lose theirs, surviving nodes keep
/// their comments.
pub fn dump_with(
    doc: &FtmlDocument,
    schema: Option<&Schema>,
    options: DumpOptions,
) -> Result<String, Error> {
    if let Some(schema) = schema
        && options.validate
    {
        let errors = SchemaValidator::with_strict(schema, options.strict).validate(&doc.root);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
    }
    encoding::check_document_encoding(&doc.root)?;

    let mut ast = doc.ast.clone();
    ftml_tree::sync_document(&doc.root, &mut ast);

    let format_options = FormatOptions {
        include_comments: options.include_comments,
        ..FormatOptions::default()
    };
    Ok(ftml_format::format_document(&ast, format_options))
}

/// Serialize a document to a file.
pub fn dump_file(doc: &FtmlDocument, path: impl AsRef<Path>) -> Result<(), Error> {
    dump_file_with(doc, path, None, DumpOptions::default())
}

/// Serialize a document to a file, optionally validating first.
pub fn dump_file_with(
    doc: &FtmlDocument,
    path: impl AsRef<Path>,
    schema: Option<&Schema>,
    options: DumpOptions,
) -> Result<(), Error> {
    let text = dump_with(doc, schema, options)?;
    fs::write(path, text)?;
    Ok(())
}

/// Validate a value map against a schema in strict mode.
pub fn validate(data: &Map, schema: &Schema) -> Vec<ValidationError> {
    SchemaValidator::new(schema).validate(data)
}

/// Reject a BOM and normalize line endings to LF.
fn normalize_source(source: &str) -> Result<String, Error> {
    if source.starts_with('\u{feff}') {
        return Err(Error::Encoding(EncodingError::new(
            "Invalid encoding: byte order mark is not permitted",
        )));
    }
    Ok(source.replace("\r\n", "\n"))
}

/// Drop every comment from an AST (for `preserve_comments: false`).
fn strip_comments(doc: &mut DocumentNode) {
    doc.inner_doc_comments.clear();
    doc.end_leading_comments.clear();
    for kv in doc.items.values_mut() {
        strip_kv(kv);
    }
}

fn strip_kv(kv: &mut ftml_parse::KeyValueNode) {
    kv.leading_comments.clear();
    kv.outer_doc_comments.clear();
    kv.inline_comment = None;
    strip_node(&mut kv.value);
}

fn strip_node(node: &mut ftml_parse::Node) {
    match node {
        ftml_parse::Node::Scalar(s) => {
            s.leading_comments.clear();
            s.outer_doc_comments.clear();
            s.inline_comment = None;
        }
        ftml_parse::Node::Object(o) => {
            o.leading_comments.clear();
            o.outer_doc_comments.clear();
            o.inner_doc_comments.clear();
            o.inline_comment = None;
            o.end_leading_comments.clear();
            for kv in o.items.values_mut() {
                strip_kv(kv);
            }
        }
        ftml_parse::Node::List(l) => {
            l.leading_comments.clear();
            l.outer_doc_comments.clear();
            l.inner_doc_comments.clear();
            l.inline_comment = None;
            l.end_leading_comments.clear();
            for elem in &mut l.elements {
                strip_node(elem);
            }
        }
    }
}
