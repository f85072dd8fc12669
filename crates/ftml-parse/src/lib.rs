//! Comment-preserving document parser for FTML.
//!
//! This crate turns FTML source text into a commented AST. Every comment in
//! the source survives in one (and only one) slot of the tree, which is what
//! makes round-trip serialization possible.

pub use ftml_tokenizer::{CommentKind, LexError, Span, Token, TokenKind, TokenValue};

mod ast;
pub use ast::{
    Comment, DocumentNode, KeyValueNode, ListNode, Node, ObjectNode, Scalar, ScalarNode,
};

mod error;
pub use error::{ParseError, ParseErrorKind};

mod diagnostic;

mod parser;
pub use parser::Parser;

/// Parse an FTML document into a commented AST.
pub fn parse(source: &str) -> Result<DocumentNode, ParseError> {
    Parser::new(source)?.parse_document()
}
