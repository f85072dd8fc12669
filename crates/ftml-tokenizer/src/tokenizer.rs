//! Tokenizer for the FTML configuration language.

use crate::{CommentKind, Span, Token, TokenKind, TokenValue};
use tracing::trace;

/// An error produced while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Source range of the offending text.
    pub span: Span,
    /// 1-based line of the offending character.
    pub line: u32,
    /// 1-based column of the offending character.
    pub col: u32,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}, col {}", self.message, self.line, self.col)
    }
}

impl std::error::Error for LexError {}

/// A tokenizer that produces tokens from FTML source text.
///
/// The same token stream serves both the document grammar and the schema
/// grammar; `:`, `|`, `?`, `<`, `>` only ever appear in schema source but
/// are lexed unconditionally.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    /// The source text being tokenized.
    source: &'src str,
    /// The remaining source text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,
    /// Current 1-based line.
    line: u32,
    /// Current 1-based column.
    col: u32,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            remaining: source,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Peek at the next character without consuming it.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Peek at the nth character (0-indexed) without consuming.
    #[inline]
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining.chars().nth(n)
    }

    /// Advance by one character and return it.
    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        self.remaining = &self.remaining[c.len_utf8()..];
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Check if the remaining text starts with the given prefix.
    #[inline]
    fn starts_with(&self, prefix: &str) -> bool {
        self.remaining.starts_with(prefix)
    }

    /// Create a token spanning from `start` to the current position.
    fn token(
        &self,
        kind: TokenKind,
        value: TokenValue,
        start: u32,
        line: u32,
        col: u32,
    ) -> Token {
        let span = Span::new(start, self.pos);
        trace!("token {:?} at {}:{} {:?}", kind, line, col, span);
        Token::new(kind, value, span, line, col)
    }

    fn error(&self, line: u32, col: u32, message: impl Into<String>) -> LexError {
        LexError {
            span: Span::empty(self.pos),
            line,
            col,
            message: message.into(),
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        // Skip horizontal whitespace; newlines are significant.
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.pos;
        let (line, col) = (self.line, self.col);

        let Some(c) = self.peek() else {
            return Ok(self.token(TokenKind::Eof, TokenValue::None, start, line, col));
        };

        match c {
            '\n' => {
                self.advance();
                Ok(self.token(TokenKind::Newline, TokenValue::None, start, line, col))
            }

            '{' => self.punct(TokenKind::LBrace, start, line, col),
            '}' => self.punct(TokenKind::RBrace, start, line, col),
            '[' => self.punct(TokenKind::LBracket, start, line, col),
            ']' => self.punct(TokenKind::RBracket, start, line, col),
            '=' => self.punct(TokenKind::Equal, start, line, col),
            ',' => self.punct(TokenKind::Comma, start, line, col),
            ':' => self.punct(TokenKind::Colon, start, line, col),
            '|' => self.punct(TokenKind::Pipe, start, line, col),
            '?' => self.punct(TokenKind::Question, start, line, col),
            '<' => self.punct(TokenKind::LAngle, start, line, col),
            '>' => self.punct(TokenKind::RAngle, start, line, col),

            '/' if self.starts_with("//") => self.tokenize_comment(start, line, col),

            '"' => self.tokenize_double_quoted(start, line, col),
            '\'' => self.tokenize_single_quoted(start, line, col),

            '+' | '-' => {
                if matches!(self.peek_nth(1), Some(d) if d.is_ascii_digit()) {
                    self.tokenize_number(start, line, col)
                } else {
                    Err(self.error(line, col, format!("unexpected character '{c}'")))
                }
            }
            _ if c.is_ascii_digit() => self.tokenize_number(start, line, col),

            _ if c.is_ascii_alphabetic() || c == '_' => self.tokenize_ident(start, line, col),

            _ => Err(self.error(line, col, format!("unexpected character '{c}'"))),
        }
    }

    fn punct(
        &mut self,
        kind: TokenKind,
        start: u32,
        line: u32,
        col: u32,
    ) -> Result<Token, LexError> {
        self.advance();
        Ok(self.token(kind, TokenValue::None, start, line, col))
    }

    /// Tokenize a comment. `//!` and `///` win over `//` by longest match.
    fn tokenize_comment(&mut self, start: u32, line: u32, col: u32) -> Result<Token, LexError> {
        let kind = if self.starts_with("//!") {
            CommentKind::InnerDoc
        } else if self.starts_with("///") {
            CommentKind::OuterDoc
        } else {
            CommentKind::Regular
        };
        let prefix_len = match kind {
            CommentKind::Regular => 2,
            CommentKind::OuterDoc | CommentKind::InnerDoc => 3,
        };
        for _ in 0..prefix_len {
            self.advance();
        }

        let text_start = self.pos as usize;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        let text = self.source[text_start..self.pos as usize].trim().to_string();

        Ok(self.token(
            TokenKind::Comment(kind),
            TokenValue::Str(text),
            start,
            line,
            col,
        ))
    }

    /// Tokenize a double-quoted string with C-style escapes.
    ///
    /// Recognized escapes: `\" \\ \n \t \r \a \b \f \v`. Any other
    /// backslash sequence passes through verbatim.
    fn tokenize_double_quoted(
        &mut self,
        start: u32,
        line: u32,
        col: u32,
    ) -> Result<Token, LexError> {
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(self.error(line, col, "unterminated string"));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some('"') => value.push('"'),
                        Some('\\') => value.push('\\'),
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('r') => value.push('\r'),
                        Some('a') => value.push('\x07'),
                        Some('b') => value.push('\x08'),
                        Some('f') => value.push('\x0C'),
                        Some('v') => value.push('\x0B'),
                        Some(other) => {
                            value.push('\\');
                            value.push(other);
                        }
                        None => return Err(self.error(line, col, "unterminated string")),
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        Ok(self.token(TokenKind::String, TokenValue::Str(value), start, line, col))
    }

    /// Tokenize a single-quoted string. The only escape is `''` for `'`.
    fn tokenize_single_quoted(
        &mut self,
        start: u32,
        line: u32,
        col: u32,
    ) -> Result<Token, LexError> {
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error(line, col, "unterminated string")),
                Some('\'') => {
                    self.advance();
                    if self.peek() == Some('\'') {
                        self.advance();
                        value.push('\'');
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        Ok(self.token(TokenKind::String, TokenValue::Str(value), start, line, col))
    }

    /// Tokenize a number: optional sign, digits, optional `.digits`.
    fn tokenize_number(&mut self, start: u32, line: u32, col: u32) -> Result<Token, LexError> {
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        while matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
            self.advance();
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            if !matches!(self.peek_nth(1), Some(d) if d.is_ascii_digit()) {
                return Err(self.error(line, col, "invalid number: expected digits after '.'"));
            }
            is_float = true;
            self.advance();
            while matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.source[start as usize..self.pos as usize];
        if is_float {
            let v: f64 = text
                .parse()
                .map_err(|_| self.error(line, col, format!("invalid number '{text}'")))?;
            Ok(self.token(TokenKind::Float, TokenValue::Float(v), start, line, col))
        } else {
            let v: i64 = text
                .parse()
                .map_err(|_| self.error(line, col, format!("integer out of range '{text}'")))?;
            Ok(self.token(TokenKind::Int, TokenValue::Int(v), start, line, col))
        }
    }

    /// Tokenize an identifier or keyword (`true`, `false`, `null`).
    fn tokenize_ident(&mut self, start: u32, line: u32, col: u32) -> Result<Token, LexError> {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.source[start as usize..self.pos as usize];

        match text {
            "true" => Ok(self.token(TokenKind::Bool, TokenValue::Bool(true), start, line, col)),
            "false" => Ok(self.token(TokenKind::Bool, TokenValue::Bool(false), start, line, col)),
            "null" => Ok(self.token(TokenKind::Null, TokenValue::None, start, line, col)),
            _ => Ok(self.token(
                TokenKind::Ident,
                TokenValue::Str(text.to_string()),
                start,
                line,
                col,
            )),
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}
