//! AST node types for FTML documents.
//!
//! Nodes carry their comments in dedicated slots. Comment ownership is
//! exclusive: a comment instance lives in exactly one slot of one node.

use ftml_tokenizer::CommentKind;
use indexmap::IndexMap;

/// A comment attached to an AST node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Which comment syntax was used.
    pub kind: CommentKind,
    /// The trimmed comment text, without the `//` / `///` / `//!` prefix.
    pub text: String,
}

impl Comment {
    /// Create a comment of the given kind.
    pub fn new(kind: CommentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A raw scalar literal as it appears in a document.
///
/// Schema-driven coercion into dates, times, and timestamps happens on the
/// value tree, never here; the AST keeps what was written.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// A scalar value with its comments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScalarNode {
    pub value: Scalar,
    pub leading_comments: Vec<Comment>,
    pub outer_doc_comments: Vec<Comment>,
    pub inline_comment: Option<Comment>,
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Null
    }
}

impl ScalarNode {
    /// Create a bare scalar node with no comments.
    pub fn new(value: Scalar) -> Self {
        Self {
            value,
            leading_comments: Vec::new(),
            outer_doc_comments: Vec::new(),
            inline_comment: None,
        }
    }
}

/// An object `{ key = value, ... }` with its comments.
///
/// `items` preserves source order; duplicate keys are rejected at parse
/// time, so each key maps to exactly one entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
    pub items: IndexMap<String, KeyValueNode>,
    pub leading_comments: Vec<Comment>,
    pub outer_doc_comments: Vec<Comment>,
    /// `//!` comments found inside the braces.
    pub inner_doc_comments: Vec<Comment>,
    pub inline_comment: Option<Comment>,
    /// Comments between the last item and the closing `}`.
    pub end_leading_comments: Vec<Comment>,
}

/// A list `[ a, b, ... ]` with its comments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListNode {
    pub elements: Vec<Node>,
    pub leading_comments: Vec<Comment>,
    pub outer_doc_comments: Vec<Comment>,
    /// `//!` comments found inside the brackets.
    pub inner_doc_comments: Vec<Comment>,
    pub inline_comment: Option<Comment>,
    /// Comments between the last element and the closing `]`.
    pub end_leading_comments: Vec<Comment>,
}

/// One `key = value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueNode {
    pub key: String,
    pub value: Node,
    pub leading_comments: Vec<Comment>,
    pub outer_doc_comments: Vec<Comment>,
    pub inline_comment: Option<Comment>,
}

impl KeyValueNode {
    /// Create a pair with no comments.
    pub fn new(key: impl Into<String>, value: Node) -> Self {
        Self {
            key: key.into(),
            value,
            leading_comments: Vec::new(),
            outer_doc_comments: Vec::new(),
            inline_comment: None,
        }
    }
}

/// Any FTML value position in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(ScalarNode),
    Object(ObjectNode),
    List(ListNode),
}

impl Node {
    /// Get as a scalar node.
    pub fn as_scalar(&self) -> Option<&ScalarNode> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get as an object node.
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Node::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as a list node.
    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            Node::List(l) => Some(l),
            _ => None,
        }
    }

    /// Leading comments of this node, whatever its shape.
    pub fn leading_comments(&self) -> &[Comment] {
        match self {
            Node::Scalar(s) => &s.leading_comments,
            Node::Object(o) => &o.leading_comments,
            Node::List(l) => &l.leading_comments,
        }
    }

    pub(crate) fn leading_comments_mut(&mut self) -> &mut Vec<Comment> {
        match self {
            Node::Scalar(s) => &mut s.leading_comments,
            Node::Object(o) => &mut o.leading_comments,
            Node::List(l) => &mut l.leading_comments,
        }
    }

    /// Outer doc comments (`///`) of this node.
    pub fn outer_doc_comments(&self) -> &[Comment] {
        match self {
            Node::Scalar(s) => &s.outer_doc_comments,
            Node::Object(o) => &o.outer_doc_comments,
            Node::List(l) => &l.outer_doc_comments,
        }
    }

    pub(crate) fn outer_doc_comments_mut(&mut self) -> &mut Vec<Comment> {
        match self {
            Node::Scalar(s) => &mut s.outer_doc_comments,
            Node::Object(o) => &mut o.outer_doc_comments,
            Node::List(l) => &mut l.outer_doc_comments,
        }
    }

    /// Inline comment of this node.
    pub fn inline_comment(&self) -> Option<&Comment> {
        match self {
            Node::Scalar(s) => s.inline_comment.as_ref(),
            Node::Object(o) => o.inline_comment.as_ref(),
            Node::List(l) => l.inline_comment.as_ref(),
        }
    }

    pub(crate) fn inline_comment_mut(&mut self) -> &mut Option<Comment> {
        match self {
            Node::Scalar(s) => &mut s.inline_comment,
            Node::Object(o) => &mut o.inline_comment,
            Node::List(l) => &mut l.inline_comment,
        }
    }
}

/// The top-level node of a parsed document.
///
/// The root of an FTML document is always a sequence of key-value pairs,
/// possibly empty. A document containing only comments is legal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentNode {
    pub items: IndexMap<String, KeyValueNode>,
    /// `//!` comments at document level.
    pub inner_doc_comments: Vec<Comment>,
    /// Comments after the last key-value pair.
    pub end_leading_comments: Vec<Comment>,
}
