//! A tokenizer for FTML documents and schema expressions.

mod span;
pub use span::Span;

mod token;
pub use token::{CommentKind, Token, TokenKind, TokenValue};

mod tokenizer;
pub use tokenizer::{LexError, Tokenizer};
