//! Parser for FTML schema expressions.
//!
//! Schemas share the document token set plus `:`, `|`, `?`, `<`, `>`. A
//! schema is a newline-separated sequence of field declarations; object
//! bodies nest comma-separated declarations.

use ftml_tokenizer::{Token, TokenKind, TokenValue, Tokenizer};
use indexmap::IndexMap;
use tracing::trace;

use ftml_tree::{Map, Value};

use crate::ast::{Constraints, ListType, ObjectType, ScalarType, TypeNode, UnionType};
use crate::constraints;
use crate::error::SchemaError;
use crate::validator::validate_one;

/// Recognized scalar type names.
const TYPE_NAMES: &[&str] = &[
    "str",
    "int",
    "float",
    "bool",
    "null",
    "any",
    "date",
    "time",
    "datetime",
    "timestamp",
];

/// Parser for schema expressions.
pub struct SchemaParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl SchemaParser {
    /// Tokenize schema source and create a parser.
    pub fn new(source: &str) -> Result<Self, SchemaError> {
        let tokens = Tokenizer::new(source)
            .tokenize()
            .map_err(|e| SchemaError::at(e.message, e.line, e.col))?;
        Ok(Self { tokens, pos: 0 })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_nth(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, message: impl Into<String>, tok: &Token) -> SchemaError {
        SchemaError::at(message, tok.line, tok.col)
    }

    /// Skip newlines and comments.
    fn skip_trivia(&mut self) {
        while matches!(
            self.peek().kind,
            TokenKind::Newline | TokenKind::Comment(_)
        ) {
            self.advance();
        }
    }

    /// Skip newlines only.
    fn skip_newlines(&mut self) {
        while self.peek().kind == TokenKind::Newline {
            self.advance();
        }
    }

    /// Skip comments on the current line (they run to end of line, so a
    /// newline still terminates the declaration).
    fn skip_line_comments(&mut self) {
        while self.peek().kind.is_comment() {
            self.advance();
        }
    }

    /// Parse a whole schema: top-level declarations separated by newlines.
    pub fn parse_schema(mut self) -> Result<IndexMap<String, TypeNode>, SchemaError> {
        let mut fields = IndexMap::new();

        loop {
            self.skip_trivia();
            if self.peek().kind == TokenKind::Eof {
                break;
            }

            let name_tok = self.peek().clone();
            let (name, ty) = self.parse_declaration()?;
            trace!("schema field '{name}'");

            if fields.contains_key(&name) {
                return Err(self.err(format!("Duplicate field '{name}' in schema"), &name_tok));
            }
            fields.insert(name, ty);

            self.skip_line_comments();
            match self.peek().kind {
                TokenKind::Newline | TokenKind::Eof => {}
                _ => {
                    let tok = self.peek().clone();
                    return Err(self.err(
                        format!(
                            "Expected newline between schema declarations, got {}",
                            token_desc(&tok)
                        ),
                        &tok,
                    ));
                }
            }
        }

        // Every declared default must satisfy its own type, constraints
        // included. Checked once here so validation never has to re-prove it.
        for (name, ty) in &fields {
            check_defaults(name, ty)?;
        }

        Ok(fields)
    }

    /// Parse one declaration: `NAME ('?')? ':' TYPE_EXPR ('=' LITERAL)?`.
    fn parse_declaration(&mut self) -> Result<(String, TypeNode), SchemaError> {
        let name_tok = self.peek().clone();
        let name = match name_tok.kind {
            TokenKind::Ident | TokenKind::String => {
                self.advance();
                name_tok.clone().into_string()
            }
            _ => {
                return Err(self.err(
                    format!("Expected field name, got {}", token_desc(&name_tok)),
                    &name_tok,
                ));
            }
        };

        let optional = if self.peek().kind == TokenKind::Question {
            self.advance();
            true
        } else {
            false
        };

        let colon = self.peek().clone();
        if colon.kind != TokenKind::Colon {
            return Err(self.err(
                format!("Expected ':' after field name '{name}', got {}", token_desc(&colon)),
                &colon,
            ));
        }
        self.advance();

        let mut ty = self.parse_type_expr()?;

        if optional {
            ty.set_optional();
        }

        if self.peek().kind == TokenKind::Equal {
            let eq = self.advance();
            if optional {
                return Err(self.err(
                    format!("Field '{name}' cannot be both optional and have a default"),
                    &eq,
                ));
            }
            let value = self.parse_literal()?;
            ty.set_default(value);
        }

        Ok((name, ty))
    }

    /// Parse a type expression: one or more constrained atoms joined by `|`.
    /// Nested unions flatten on construction.
    fn parse_type_expr(&mut self) -> Result<TypeNode, SchemaError> {
        let mut subtypes = vec![self.parse_constrained_atom()?];

        while self.peek().kind == TokenKind::Pipe {
            self.advance();
            self.skip_newlines();
            match self.parse_constrained_atom()? {
                TypeNode::Union(u) => subtypes.extend(u.subtypes),
                other => subtypes.push(other),
            }
        }

        if subtypes.len() == 1 {
            Ok(subtypes.pop().expect("one subtype"))
        } else {
            Ok(TypeNode::Union(UnionType {
                subtypes,
                default: None,
                optional: false,
            }))
        }
    }

    /// Parse an atom with an optional `<constraints>` suffix.
    fn parse_constrained_atom(&mut self) -> Result<TypeNode, SchemaError> {
        let atom_tok = self.peek().clone();
        let mut atom = self.parse_atom()?;

        if self.peek().kind == TokenKind::LAngle {
            self.advance();
            let parsed = self.parse_constraints()?;
            match &mut atom {
                TypeNode::Scalar(t) => merge_constraints(&mut t.constraints, parsed),
                TypeNode::List(t) => merge_constraints(&mut t.constraints, parsed),
                TypeNode::Object(t) => {
                    let mut parsed = parsed;
                    if let Some(ext) = parsed.shift_remove("ext") {
                        match ext {
                            Value::Bool(b) => t.ext = b,
                            other => {
                                return Err(self.err(
                                    format!(
                                        "Constraint 'ext' must be a boolean, got {}",
                                        other.type_name()
                                    ),
                                    &atom_tok,
                                ));
                            }
                        }
                    }
                    merge_constraints(&mut t.constraints, parsed);
                }
                TypeNode::Union(_) => unreachable!("atoms are never unions"),
            }
        }

        constraints::check_applicability(&atom)
            .map_err(|message| self.err(message, &atom_tok))?;

        Ok(atom)
    }

    /// Parse a type atom: scalar name, list, object, or literal-string
    /// singleton.
    fn parse_atom(&mut self) -> Result<TypeNode, SchemaError> {
        self.skip_newlines();
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Ident => {
                let name = tok.as_str().unwrap_or_default().to_string();
                if !TYPE_NAMES.contains(&name.as_str()) {
                    return Err(self.err(format!("Unknown type '{name}'"), &tok));
                }
                self.advance();
                Ok(TypeNode::Scalar(ScalarType::new(name)))
            }
            TokenKind::String => {
                // A string literal is the singleton enum `str<enum=[lit]>`.
                self.advance();
                let mut scalar = ScalarType::new("str");
                scalar.constraints.insert(
                    "enum".to_string(),
                    Value::List(vec![Value::String(tok.into_string())]),
                );
                Ok(TypeNode::Scalar(scalar))
            }
            TokenKind::LBracket => {
                self.advance();
                self.skip_trivia();
                if self.peek().kind == TokenKind::RBracket {
                    self.advance();
                    return Ok(TypeNode::List(ListType {
                        item_type: None,
                        constraints: Constraints::new(),
                        default: None,
                        optional: false,
                    }));
                }
                let item = self.parse_type_expr()?;
                self.skip_trivia();
                let close = self.peek().clone();
                if close.kind != TokenKind::RBracket {
                    return Err(self.err(
                        format!("Expected ']' to close list type, got {}", token_desc(&close)),
                        &close,
                    ));
                }
                self.advance();
                Ok(TypeNode::List(ListType {
                    item_type: Some(Box::new(item)),
                    constraints: Constraints::new(),
                    default: None,
                    optional: false,
                }))
            }
            TokenKind::LBrace => {
                self.advance();
                self.parse_object_type()
            }
            _ => Err(self.err(
                format!("Expected type expression, got {}", token_desc(&tok)),
                &tok,
            )),
        }
    }

    /// Parse an object type body after `{`.
    ///
    /// The first significant token decides the form: an identifier (or
    /// quoted name) immediately followed by `:` or `?:` means a structured
    /// object, `}` means untyped, anything else is a pattern object. This is
    /// what makes `{str: int}` a structured object with a field named `str`
    /// while `{str}` stays a pattern.
    fn parse_object_type(&mut self) -> Result<TypeNode, SchemaError> {
        self.skip_trivia();

        if self.peek().kind == TokenKind::RBrace {
            self.advance();
            return Ok(TypeNode::Object(ObjectType {
                fields: IndexMap::new(),
                pattern_value_type: None,
                ext: false,
                constraints: Constraints::new(),
                default: None,
                optional: false,
            }));
        }

        let first = self.peek();
        let structured = matches!(first.kind, TokenKind::Ident | TokenKind::String)
            && (self.peek_nth(1).kind == TokenKind::Colon
                || (self.peek_nth(1).kind == TokenKind::Question
                    && self.peek_nth(2).kind == TokenKind::Colon));

        if structured {
            let mut fields = IndexMap::new();
            let mut needs_separator = false;
            loop {
                self.skip_trivia();
                let tok = self.peek().clone();
                match tok.kind {
                    TokenKind::RBrace => {
                        self.advance();
                        break;
                    }
                    TokenKind::Eof => {
                        return Err(self.err("Unclosed '{' in object type", &tok));
                    }
                    _ => {}
                }
                if needs_separator {
                    return Err(self.err("Expected ',' or '}' in object type", &tok));
                }

                let name_tok = self.peek().clone();
                let (name, ty) = self.parse_declaration()?;
                if fields.contains_key(&name) {
                    return Err(
                        self.err(format!("Duplicate field '{name}' in object type"), &name_tok)
                    );
                }
                fields.insert(name, ty);

                self.skip_line_comments();
                if self.peek().kind == TokenKind::Comma {
                    self.advance();
                } else {
                    needs_separator = true;
                }
            }
            Ok(TypeNode::Object(ObjectType {
                fields,
                pattern_value_type: None,
                ext: false,
                constraints: Constraints::new(),
                default: None,
                optional: false,
            }))
        } else {
            let inner = self.parse_type_expr()?;
            self.skip_trivia();
            let close = self.peek().clone();
            if close.kind != TokenKind::RBrace {
                return Err(self.err(
                    format!(
                        "Expected '}}' to close pattern object, got {}",
                        token_desc(&close)
                    ),
                    &close,
                ));
            }
            self.advance();
            Ok(TypeNode::Object(ObjectType {
                fields: IndexMap::new(),
                pattern_value_type: Some(Box::new(inner)),
                ext: false,
                constraints: Constraints::new(),
                default: None,
                optional: false,
            }))
        }
    }

    /// Parse a `<name=value, ...>` constraint list; consumes through `>`.
    fn parse_constraints(&mut self) -> Result<Constraints, SchemaError> {
        let mut constraints = Constraints::new();
        loop {
            self.skip_newlines();
            let name_tok = self.peek().clone();
            let name = match name_tok.kind {
                TokenKind::Ident => {
                    self.advance();
                    name_tok.clone().into_string()
                }
                _ => {
                    return Err(self.err(
                        format!("Expected constraint name, got {}", token_desc(&name_tok)),
                        &name_tok,
                    ));
                }
            };

            let eq = self.peek().clone();
            if eq.kind != TokenKind::Equal {
                return Err(self.err(
                    format!("Expected '=' after constraint '{name}'"),
                    &eq,
                ));
            }
            self.advance();

            let value = self.parse_literal()?;
            if constraints.insert(name.clone(), value).is_some() {
                return Err(self.err(format!("Duplicate constraint '{name}'"), &name_tok));
            }

            match self.peek().kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RAngle => {
                    self.advance();
                    return Ok(constraints);
                }
                _ => {
                    let tok = self.peek().clone();
                    return Err(self.err(
                        format!("Expected ',' or '>' in constraints, got {}", token_desc(&tok)),
                        &tok,
                    ));
                }
            }
        }
    }

    /// Parse an FTML literal value: scalar, list `[...]`, or object
    /// `{k = v, ...}` in document syntax.
    fn parse_literal(&mut self) -> Result<Value, SchemaError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::String => {
                self.advance();
                Ok(Value::String(tok.into_string()))
            }
            TokenKind::Int => {
                self.advance();
                let TokenValue::Int(v) = tok.value else {
                    unreachable!("int token without int payload")
                };
                Ok(Value::Int(v))
            }
            TokenKind::Float => {
                self.advance();
                let TokenValue::Float(v) = tok.value else {
                    unreachable!("float token without float payload")
                };
                Ok(Value::Float(v))
            }
            TokenKind::Bool => {
                self.advance();
                let TokenValue::Bool(v) = tok.value else {
                    unreachable!("bool token without bool payload")
                };
                Ok(Value::Bool(v))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Value::Null)
            }
            TokenKind::LBracket => {
                self.advance();
                let mut items = Vec::new();
                loop {
                    self.skip_trivia();
                    if self.peek().kind == TokenKind::RBracket {
                        self.advance();
                        return Ok(Value::List(items));
                    }
                    items.push(self.parse_literal()?);
                    self.skip_trivia();
                    match self.peek().kind {
                        TokenKind::Comma => {
                            self.advance();
                        }
                        TokenKind::RBracket => {}
                        _ => {
                            let tok = self.peek().clone();
                            return Err(self.err(
                                format!(
                                    "Expected ',' or ']' in list literal, got {}",
                                    token_desc(&tok)
                                ),
                                &tok,
                            ));
                        }
                    }
                }
            }
            TokenKind::LBrace => {
                self.advance();
                let mut map = Map::new();
                loop {
                    self.skip_trivia();
                    if self.peek().kind == TokenKind::RBrace {
                        self.advance();
                        return Ok(Value::Object(map));
                    }
                    let key_tok = self.peek().clone();
                    let key = match key_tok.kind {
                        TokenKind::Ident | TokenKind::String => {
                            self.advance();
                            key_tok.clone().into_string()
                        }
                        _ => {
                            return Err(self.err(
                                format!(
                                    "Expected key in object literal, got {}",
                                    token_desc(&key_tok)
                                ),
                                &key_tok,
                            ));
                        }
                    };
                    if map.contains_key(&key) {
                        return Err(self.err(
                            format!("Duplicate key '{key}' in object literal"),
                            &key_tok,
                        ));
                    }
                    let eq = self.peek().clone();
                    if eq.kind != TokenKind::Equal {
                        return Err(self.err(
                            format!("Expected '=' after key '{key}' in object literal"),
                            &eq,
                        ));
                    }
                    self.advance();
                    let value = self.parse_literal()?;
                    map.insert(key, value);
                    self.skip_trivia();
                    match self.peek().kind {
                        TokenKind::Comma => {
                            self.advance();
                        }
                        TokenKind::RBrace => {}
                        _ => {
                            let tok = self.peek().clone();
                            return Err(self.err(
                                format!(
                                    "Expected ',' or '}}' in object literal, got {}",
                                    token_desc(&tok)
                                ),
                                &tok,
                            ));
                        }
                    }
                }
            }
            _ => Err(self.err(
                format!("Expected literal value, got {}", token_desc(&tok)),
                &tok,
            )),
        }
    }
}

fn merge_constraints(target: &mut Constraints, parsed: Constraints) {
    for (name, value) in parsed {
        target.insert(name, value);
    }
}

/// Recursively check that every declared default satisfies its own type.
fn check_defaults(name: &str, ty: &TypeNode) -> Result<(), SchemaError> {
    if let Some(default) = ty.default() {
        let errors = validate_one(default, ty, name, true);
        if let Some(first) = errors.first() {
            return Err(SchemaError::new(format!(
                "Default value for '{name}' does not satisfy its type: {first}"
            )));
        }
    }

    match ty {
        TypeNode::Scalar(_) => {}
        TypeNode::List(t) => {
            if let Some(item) = &t.item_type {
                check_defaults(name, item)?;
            }
        }
        TypeNode::Object(t) => {
            for (field_name, field_ty) in &t.fields {
                check_defaults(field_name, field_ty)?;
            }
            if let Some(pattern) = &t.pattern_value_type {
                check_defaults(name, pattern)?;
            }
        }
        TypeNode::Union(t) => {
            for sub in &t.subtypes {
                check_defaults(name, sub)?;
            }
        }
    }

    Ok(())
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
