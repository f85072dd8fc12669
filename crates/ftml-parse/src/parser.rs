//! Recursive-descent parser for FTML documents.
//!
//! The parser owns the full token stream and builds the commented AST in a
//! single pass. Comments accumulate in a pending buffer until the next
//! syntactic token decides where they belong:
//!
//! - regular comments on their own line lead the next node,
//! - `///` comments doc the next node,
//! - `//!` comments attach to the enclosing container,
//! - a comment on the same line as a value becomes its inline comment,
//! - whatever is still pending when a container closes becomes its
//!   `end_leading_comments`.

use ftml_tokenizer::{CommentKind, Token, TokenKind, TokenValue, Tokenizer};
use indexmap::IndexMap;
use tracing::trace;

use crate::ast::{
    Comment, DocumentNode, KeyValueNode, ListNode, Node, ObjectNode, Scalar, ScalarNode,
};
use crate::error::{ParseError, ParseErrorKind};

/// Parser for FTML documents.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Line of the most recently consumed non-newline token, for same-line
    /// inline comment detection.
    last_line: u32,
}

impl Parser {
    /// Tokenize the source and create a parser.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let tokens = Tokenizer::new(source).tokenize()?;
        Ok(Self {
            tokens,
            pos: 0,
            last_line: 0,
        })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        if tok.kind != TokenKind::Newline {
            self.last_line = tok.line;
        }
        tok
    }

    fn err(&self, kind: ParseErrorKind, message: impl Into<String>, tok: &Token) -> ParseError {
        ParseError::new(kind, message, tok.line, tok.col, tok.span)
    }

    /// Parse a complete document.
    pub fn parse_document(mut self) -> Result<DocumentNode, ParseError> {
        let mut doc = DocumentNode::default();
        let mut pending: Vec<Comment> = Vec::new();

        loop {
            self.collect_trivia(&mut pending, &mut doc.inner_doc_comments);

            if self.peek().kind == TokenKind::Eof {
                doc.end_leading_comments.append(&mut pending);
                break;
            }

            let kv = self.parse_key_value(&mut pending, &doc.items)?;
            trace!("root pair '{}'", kv.key);

            // Root pairs are newline-separated; commas and same-line pairs
            // are rejected.
            match self.peek().kind {
                TokenKind::Newline | TokenKind::Eof => {}
                TokenKind::Comma => {
                    let tok = self.peek().clone();
                    return Err(self.err(
                        ParseErrorKind::RootComma,
                        "Commas are not allowed between root-level key-value pairs",
                        &tok,
                    ));
                }
                _ => {
                    let tok = self.peek().clone();
                    return Err(self.err(
                        ParseErrorKind::RootSeparator,
                        "Expected newline between root-level key-value pairs",
                        &tok,
                    ));
                }
            }

            doc.items.insert(kv.key.clone(), kv);
        }

        Ok(doc)
    }

    /// Skip newlines and buffer comments. `//!` comments go straight to the
    /// enclosing container; everything else stays pending.
    fn collect_trivia(&mut self, pending: &mut Vec<Comment>, inner_doc: &mut Vec<Comment>) {
        loop {
            match self.peek().kind {
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::Comment(CommentKind::InnerDoc) => {
                    let tok = self.advance();
                    inner_doc.push(Comment::new(CommentKind::InnerDoc, tok.into_string()));
                }
                TokenKind::Comment(kind) => {
                    let tok = self.advance();
                    pending.push(Comment::new(kind, tok.into_string()));
                }
                _ => break,
            }
        }
    }

    /// If the next token is a comment on the same line as the last consumed
    /// token, claim it for `slot`.
    fn take_inline(&mut self, slot: &mut Option<Comment>) {
        if slot.is_some() {
            return;
        }
        if let TokenKind::Comment(kind) = self.peek().kind
            && self.peek().line == self.last_line
        {
            let tok = self.advance();
            *slot = Some(Comment::new(kind, tok.into_string()));
        }
    }

    /// Parse one `key = value` pair, attaching pending comments to it.
    fn parse_key_value(
        &mut self,
        pending: &mut Vec<Comment>,
        existing: &IndexMap<String, KeyValueNode>,
    ) -> Result<KeyValueNode, ParseError> {
        let key_tok = self.peek().clone();
        let key = match key_tok.kind {
            TokenKind::Ident | TokenKind::String => {
                self.advance();
                key_tok.clone().into_string()
            }
            _ => {
                return Err(self.err(
                    ParseErrorKind::ExpectedKey,
                    format!(
                        "Expected identifier or quoted key, got {}",
                        token_desc(&key_tok)
                    ),
                    &key_tok,
                ));
            }
        };

        if existing.contains_key(&key) {
            return Err(self.err(
                ParseErrorKind::DuplicateKey,
                format!("Duplicate key '{key}'"),
                &key_tok,
            ));
        }

        let mut leading_comments = Vec::new();
        let mut outer_doc_comments = Vec::new();
        for comment in pending.drain(..) {
            match comment.kind {
                CommentKind::OuterDoc => outer_doc_comments.push(comment),
                _ => leading_comments.push(comment),
            }
        }

        let eq = self.peek().clone();
        if eq.kind != TokenKind::Equal {
            return Err(self.err(
                ParseErrorKind::ExpectedEquals,
                format!("Expected '=' after key '{key}', got {}", token_desc(&eq)),
                &eq,
            ));
        }
        self.advance();

        let mut value = self.parse_value()?;

        let mut kv = KeyValueNode {
            key,
            value: Node::Scalar(ScalarNode::new(Scalar::Null)),
            leading_comments,
            outer_doc_comments,
            inline_comment: None,
        };

        // A comment after a container's opening delimiter belongs to the
        // pair, not the container node.
        kv.inline_comment = value.inline_comment_mut().take();
        kv.value = value;
        self.take_inline(&mut kv.inline_comment);

        Ok(kv)
    }

    /// Parse a value: scalar literal, object, or list.
    ///
    /// The value must begin on the current line; a newline after `=` is a
    /// parse error, which also forbids container openers on their own line.
    fn parse_value(&mut self) -> Result<Node, ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::LBrace => self.parse_object().map(Node::Object),
            TokenKind::LBracket => self.parse_list().map(Node::List),
            TokenKind::String => {
                let tok = self.advance();
                Ok(Node::Scalar(ScalarNode::new(Scalar::String(
                    tok.into_string(),
                ))))
            }
            TokenKind::Int => {
                let tok = self.advance();
                let TokenValue::Int(v) = tok.value else {
                    unreachable!("int token without int payload")
                };
                Ok(Node::Scalar(ScalarNode::new(Scalar::Int(v))))
            }
            TokenKind::Float => {
                let tok = self.advance();
                let TokenValue::Float(v) = tok.value else {
                    unreachable!("float token without float payload")
                };
                Ok(Node::Scalar(ScalarNode::new(Scalar::Float(v))))
            }
            TokenKind::Bool => {
                let tok = self.advance();
                let TokenValue::Bool(v) = tok.value else {
                    unreachable!("bool token without bool payload")
                };
                Ok(Node::Scalar(ScalarNode::new(Scalar::Bool(v))))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Node::Scalar(ScalarNode::new(Scalar::Null)))
            }
            TokenKind::Ident => Err(self.err(
                ParseErrorKind::UnexpectedToken,
                format!(
                    "Unquoted string '{}' is not a valid value",
                    tok.as_str().unwrap_or_default()
                ),
                &tok,
            )),
            _ => Err(self.err(
                ParseErrorKind::ExpectedValue,
                format!("Expected value, got {}", token_desc(&tok)),
                &tok,
            )),
        }
    }

    /// Parse an object body after having peeked `{`.
    fn parse_object(&mut self) -> Result<ObjectNode, ParseError> {
        let open = self.advance();
        let mut node = ObjectNode::default();
        self.take_inline(&mut node.inline_comment);

        let mut pending: Vec<Comment> = Vec::new();
        let mut needs_separator = false;

        loop {
            self.collect_trivia(&mut pending, &mut node.inner_doc_comments);

            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::RBrace => {
                    node.end_leading_comments.append(&mut pending);
                    self.advance();
                    return Ok(node);
                }
                TokenKind::Eof => {
                    return Err(self.err(
                        ParseErrorKind::UnclosedContainer,
                        "Unclosed '{': reached end of input",
                        &open,
                    ));
                }
                _ => {}
            }

            if needs_separator {
                return Err(self.err(
                    ParseErrorKind::MissingSeparator,
                    "Expected ',' or '}' after object item",
                    &tok,
                ));
            }

            let mut kv = self.parse_key_value(&mut pending, &node.items)?;

            if self.peek().kind == TokenKind::Comma {
                self.advance();
                self.take_inline(&mut kv.inline_comment);
            } else {
                needs_separator = true;
            }

            node.items.insert(kv.key.clone(), kv);
        }
    }

    /// Parse a list body after having peeked `[`.
    fn parse_list(&mut self) -> Result<ListNode, ParseError> {
        let open = self.advance();
        let mut node = ListNode::default();
        self.take_inline(&mut node.inline_comment);

        let mut pending: Vec<Comment> = Vec::new();
        let mut needs_separator = false;

        loop {
            self.collect_trivia(&mut pending, &mut node.inner_doc_comments);

            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::RBracket => {
                    node.end_leading_comments.append(&mut pending);
                    self.advance();
                    return Ok(node);
                }
                TokenKind::Eof => {
                    return Err(self.err(
                        ParseErrorKind::UnclosedContainer,
                        "Unclosed '[': reached end of input",
                        &open,
                    ));
                }
                _ => {}
            }

            if needs_separator {
                return Err(self.err(
                    ParseErrorKind::MissingSeparator,
                    "Expected ',' or ']' after list element",
                    &tok,
                ));
            }

            let mut elem = self.parse_value()?;

            for comment in pending.drain(..) {
                match comment.kind {
                    CommentKind::OuterDoc => elem.outer_doc_comments_mut().push(comment),
                    _ => elem.leading_comments_mut().push(comment),
                }
            }

            self.take_inline(elem.inline_comment_mut());

            if self.peek().kind == TokenKind::Comma {
                self.advance();
                self.take_inline(elem.inline_comment_mut());
            } else {
                needs_separator = true;
            }

            node.elements.push(elem);
        }
    }
}

/// Describe a token for error messages.
fn token_desc(tok: &Token) -> String {
    match tok.kind {
        TokenKind::Ident => format!("identifier '{}'", tok.as_str().unwrap_or_default()),
        TokenKind::String => "string".to_string(),
        TokenKind::Int => "integer".to_string(),
        TokenKind::Float => "float".to_string(),
        TokenKind::Bool => "boolean".to_string(),
        TokenKind::Null => "'null'".to_string(),
        TokenKind::LBrace => "'{'".to_string(),
        TokenKind::RBrace => "'}'".to_string(),
        TokenKind::LBracket => "'['".to_string(),
        TokenKind::RBracket => "']'".to_string(),
        TokenKind::Equal => "'='".to_string(),
        TokenKind::Comma => "','".to_string(),
        TokenKind::Colon => "':'".to_string(),
        TokenKind::Pipe => "'|'".to_string(),
        TokenKind::Question => "'?'".to_string(),
        TokenKind::LAngle => "'<'".to_string(),
        TokenKind::RAngle => "'>'".to_string(),
        TokenKind::Comment(_) => "comment".to_string(),
        TokenKind::Newline => "end of line".to_string(),
        TokenKind::Eof => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    fn scalar(node: &Node) -> &Scalar {
        &node.as_scalar().expect("scalar node").value
    }

    #[test]
    fn test_parse_scalars() {
        let doc = parse(
            "string_value = \"test\"\nsingle = 'test'\nint_value = 42\nfloat_value = 3.14\nyes = true\nno = false\nnothing = null\n",
        )
        .unwrap();
        assert_eq!(
            scalar(&doc.items["string_value"].value),
            &Scalar::String("test".into())
        );
        assert_eq!(
            scalar(&doc.items["single"].value),
            &Scalar::String("test".into())
        );
        assert_eq!(scalar(&doc.items["int_value"].value), &Scalar::Int(42));
        assert_eq!(scalar(&doc.items["float_value"].value), &Scalar::Float(3.14));
        assert_eq!(scalar(&doc.items["yes"].value), &Scalar::Bool(true));
        assert_eq!(scalar(&doc.items["no"].value), &Scalar::Bool(false));
        assert_eq!(scalar(&doc.items["nothing"].value), &Scalar::Null);
    }

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert!(parse("").unwrap().items.is_empty());
        assert!(parse("  \n  \t  ").unwrap().items.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let doc = parse("zebra = 1\napple = 2\nmango = 3\n").unwrap();
        let keys: Vec<_> = doc.items.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_nested_containers() {
        let doc = parse("config = { theme = \"dark\", sizes = [1, 2, 3] }").unwrap();
        let config = doc.items["config"].value.as_object().unwrap();
        assert_eq!(
            scalar(&config.items["theme"].value),
            &Scalar::String("dark".into())
        );
        let sizes = config.items["sizes"].value.as_list().unwrap();
        assert_eq!(sizes.elements.len(), 3);
        assert_eq!(scalar(&sizes.elements[0]), &Scalar::Int(1));
    }

    #[test]
    fn test_trailing_comma_allowed_in_containers() {
        let doc = parse("config = { theme = \"dark\", log_level = \"info\", }").unwrap();
        let config = doc.items["config"].value.as_object().unwrap();
        assert_eq!(config.items.len(), 2);

        let doc = parse("array = [1, 2,]").unwrap();
        assert_eq!(doc.items["array"].value.as_list().unwrap().elements.len(), 2);
    }

    #[test]
    fn test_root_comma_rejected() {
        let err = parse("key1 = \"v1\", key2 = \"v2\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::RootComma);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_root_missing_newline_rejected() {
        let err = parse("key1 = \"v1\" key2 = \"v2\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::RootSeparator);
    }

    #[test]
    fn test_root_bare_scalar_rejected() {
        assert!(parse("42").is_err());
        assert!(parse("\"just a string\"").is_err());
        assert!(parse("{ key = \"value\" }").is_err());
    }

    #[test]
    fn test_missing_comma_in_object() {
        let err = parse("config = { theme = \"dark\" log_level = \"info\" }").unwrap_err();
        assert!(
            err.message.contains("Expected ',' or '}' after object item"),
            "{err}"
        );
    }

    #[test]
    fn test_missing_comma_in_list() {
        let err = parse("items = [1 2]").unwrap_err();
        assert!(
            err.message.contains("Expected ',' or ']' after list element"),
            "{err}"
        );
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = parse("a = 1\na = 2\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateKey);
        assert!(err.message.contains("Duplicate key 'a'"));

        // Also inside nested objects.
        let err = parse("obj = { x = 1, x = 2 }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateKey);

        // Keys are case-sensitive, so this is fine.
        assert!(parse("a = 1\nA = 2\n").is_ok());
    }

    #[test]
    fn test_unclosed_containers() {
        assert_eq!(
            parse("list = [1, 2").unwrap_err().kind,
            ParseErrorKind::UnclosedContainer
        );
        assert_eq!(
            parse("obj = { key = \"v\"").unwrap_err().kind,
            ParseErrorKind::UnclosedContainer
        );
    }

    #[test]
    fn test_missing_value() {
        assert!(parse("name = ").is_err());
        assert!(parse("name = \nvalue").is_err());
    }

    #[test]
    fn test_colon_at_root_rejected() {
        let err = parse("name : \"value\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedEquals);
    }

    #[test]
    fn test_unquoted_value_rejected() {
        let err = parse("name = bare_word").unwrap_err();
        assert!(err.message.contains("Unquoted string"), "{err}");
    }

    #[test]
    fn test_quoted_keys() {
        let doc = parse("\"key with spaces\" = 1\n'single quoted' = 2\n").unwrap();
        assert!(doc.items.contains_key("key with spaces"));
        assert!(doc.items.contains_key("single quoted"));
    }

    #[test]
    fn test_leading_comments() {
        let doc = parse(
            "// key1 leading comment\nkey1 = \"value1\"\n\n// key2 leading comment 1\n// key2 leading comment 2\nkey2 = \"value2\"\n",
        )
        .unwrap();

        let key1 = &doc.items["key1"];
        assert_eq!(key1.leading_comments.len(), 1);
        assert_eq!(key1.leading_comments[0].text, "key1 leading comment");

        let key2 = &doc.items["key2"];
        assert_eq!(key2.leading_comments.len(), 2);
        assert_eq!(key2.leading_comments[0].text, "key2 leading comment 1");
        assert_eq!(key2.leading_comments[1].text, "key2 leading comment 2");
    }

    #[test]
    fn test_inline_comments() {
        let doc =
            parse("key1 = \"value1\"  // key1 inline comment\nkey2 = \"value2\"  // key2 inline comment\n")
                .unwrap();
        assert_eq!(
            doc.items["key1"].inline_comment.as_ref().unwrap().text,
            "key1 inline comment"
        );
        assert_eq!(
            doc.items["key2"].inline_comment.as_ref().unwrap().text,
            "key2 inline comment"
        );
    }

    #[test]
    fn test_outer_doc_comments() {
        let doc = parse(
            "/// Documentation for key1\n/// More details about key1\nkey1 = \"value1\"\n\n/// Documentation for key2\nkey2 = \"value2\"\n",
        )
        .unwrap();
        let key1 = &doc.items["key1"];
        assert_eq!(key1.outer_doc_comments.len(), 2);
        assert_eq!(key1.outer_doc_comments[0].text, "Documentation for key1");
        assert_eq!(key1.outer_doc_comments[1].text, "More details about key1");
        assert_eq!(doc.items["key2"].outer_doc_comments.len(), 1);
    }

    #[test]
    fn test_document_inner_doc_comments() {
        let doc = parse("//! Document-level inner doc comment\n//! Second document-level comment\n\nkey1 = \"value1\"\n").unwrap();
        assert_eq!(doc.inner_doc_comments.len(), 2);
        assert_eq!(
            doc.inner_doc_comments[0].text,
            "Document-level inner doc comment"
        );
        assert_eq!(
            doc.inner_doc_comments[1].text,
            "Second document-level comment"
        );
    }

    #[test]
    fn test_comment_only_document() {
        let doc = parse("// Comment 1\n// Comment 2").unwrap();
        assert!(doc.items.is_empty());
        assert_eq!(doc.end_leading_comments.len(), 2);

        let doc = parse("//! Doc comment 1\n//! Doc comment 2").unwrap();
        assert!(doc.items.is_empty());
        assert_eq!(doc.inner_doc_comments.len(), 2);
    }

    #[test]
    fn test_container_inner_doc_comments() {
        let doc = parse(
            "list = [\n    //! Inner documentation for the list\n    //! Second line of list docs\n    \"item1\",\n    \"item2\"\n]\n\nobj = {\n    //! Inner documentation for the object\n    key1 = \"value1\"\n}\n",
        )
        .unwrap();

        let list = doc.items["list"].value.as_list().unwrap();
        assert_eq!(list.inner_doc_comments.len(), 2);
        assert_eq!(
            list.inner_doc_comments[0].text,
            "Inner documentation for the list"
        );

        let obj = doc.items["obj"].value.as_object().unwrap();
        assert_eq!(obj.inner_doc_comments.len(), 1);
    }

    #[test]
    fn test_container_open_inline_comment_belongs_to_pair() {
        let doc = parse(
            "// my_obj leading comment\nmy_obj = {  // my_obj inline comment\n    prop1 = \"value1\",  // prop1 inline comment\n    prop2 = \"value2\"  // prop2 inline comment\n}\n",
        )
        .unwrap();

        let my_obj = &doc.items["my_obj"];
        assert_eq!(my_obj.leading_comments[0].text, "my_obj leading comment");
        assert_eq!(
            my_obj.inline_comment.as_ref().unwrap().text,
            "my_obj inline comment"
        );

        let obj = my_obj.value.as_object().unwrap();
        assert_eq!(
            obj.items["prop1"].inline_comment.as_ref().unwrap().text,
            "prop1 inline comment"
        );
        assert_eq!(
            obj.items["prop2"].inline_comment.as_ref().unwrap().text,
            "prop2 inline comment"
        );
    }

    #[test]
    fn test_list_element_comments() {
        let doc = parse(
            "my_list = [  // my_list inline comment\n    // first leading\n    \"first\",  // first inline\n    // second leading\n    \"second\"  // second inline\n]\n",
        )
        .unwrap();

        let kv = &doc.items["my_list"];
        assert_eq!(
            kv.inline_comment.as_ref().unwrap().text,
            "my_list inline comment"
        );

        let list = kv.value.as_list().unwrap();
        let first = &list.elements[0];
        assert_eq!(first.leading_comments()[0].text, "first leading");
        assert_eq!(first.inline_comment().unwrap().text, "first inline");

        let second = &list.elements[1];
        assert_eq!(second.leading_comments()[0].text, "second leading");
        assert_eq!(second.inline_comment().unwrap().text, "second inline");
    }

    #[test]
    fn test_nested_container_element_comments() {
        let doc = parse(
            "nested = [\n    /// Documentation for inner list\n    [  // inner list inline\n        \"a\"\n    ],\n    /// Documentation for inner object\n    {  // inner object inline\n        key = \"value\"\n    }\n]\n",
        )
        .unwrap();

        let list = doc.items["nested"].value.as_list().unwrap();
        let inner_list = &list.elements[0];
        assert_eq!(
            inner_list.outer_doc_comments()[0].text,
            "Documentation for inner list"
        );
        assert_eq!(
            inner_list.inline_comment().unwrap().text,
            "inner list inline"
        );

        let inner_obj = &list.elements[1];
        assert_eq!(
            inner_obj.outer_doc_comments()[0].text,
            "Documentation for inner object"
        );
        assert_eq!(
            inner_obj.inline_comment().unwrap().text,
            "inner object inline"
        );
    }

    #[test]
    fn test_end_leading_comments() {
        let doc = parse(
            "my_list = [\n    \"only_item\"\n    // Comment after last item\n    // Another comment after last item\n]\n// Comment after closing bracket\n",
        )
        .unwrap();

        let list = doc.items["my_list"].value.as_list().unwrap();
        assert_eq!(list.end_leading_comments.len(), 2);
        assert_eq!(
            list.end_leading_comments[0].text,
            "Comment after last item"
        );

        assert_eq!(doc.end_leading_comments.len(), 1);
        assert_eq!(
            doc.end_leading_comments[0].text,
            "Comment after closing bracket"
        );
    }

    #[test]
    fn test_deeply_nested() {
        let doc = parse(
            "deep = { l1 = { l2 = { l3 = { value = \"bottom\" } } } }\nmixed = { array = [ { list = [1, [2, 3], { value = 4 }] } ] }\n",
        )
        .unwrap();
        let l1 = doc.items["deep"].value.as_object().unwrap();
        let l2 = l1.items["l1"].value.as_object().unwrap();
        let l3 = l2.items["l2"].value.as_object().unwrap();
        let l4 = l3.items["l3"].value.as_object().unwrap();
        assert_eq!(
            scalar(&l4.items["value"].value),
            &Scalar::String("bottom".into())
        );
    }
}
