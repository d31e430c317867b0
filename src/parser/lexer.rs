//! Lexer (tokenizer) for Chest source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Block structure in Chest is whitespace-sensitive: the lexer
//! measures the leading indentation of each line and synthesizes
//! [`TokenKind::Indent`] / [`TokenKind::Dedent`] tokens from the changes, so
//! the parser never inspects whitespace itself. Blank lines and `//` comment
//! lines are transparent to the indentation stack.

use super::ast::SourceSpan;
use std::fmt;

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Number,
    String,
    Bool,

    // Identifiers
    Identifier,

    // Keywords
    Building,
    Office,
    Employee,
    Chest,
    Show,
    Decide,
    Else,
    Go,
    Poke,
    Attach,
    Ask,

    // Operators
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
    EqualEqual,   // ==
    NotEqual,     // !=
    Assign,       // =

    // Delimiters
    LeftBrace,  // {
    RightBrace, // }
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Semicolon,  // ;

    // Structural
    Newline,
    Indent,
    Dedent,
    Eof,

    /// Malformed input. Produced internally while scanning; [`Lexer::tokenize`]
    /// turns the first one into a [`LexError`] instead of returning it.
    Error,
}

/// A single token: kind, original source text, and span.
///
/// `text` keeps the original casing for identifiers and keywords; for string
/// literals it holds the unescaped content without the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, span: SourceSpan) -> Self {
        Self { kind, text, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number => write!(f, "number literal {}", self.text),
            TokenKind::String => write!(f, "string literal \"{}\"", self.text),
            TokenKind::Bool => write!(f, "bool literal '{}'", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Building => write!(f, "'building'"),
            TokenKind::Office => write!(f, "'office'"),
            TokenKind::Employee => write!(f, "'employee'"),
            TokenKind::Chest => write!(f, "'chest'"),
            TokenKind::Show => write!(f, "'show'"),
            TokenKind::Decide => write!(f, "'decide'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::Go => write!(f, "'go'"),
            TokenKind::Poke => write!(f, "'poke'"),
            TokenKind::Attach => write!(f, "'attach'"),
            TokenKind::Ask => write!(f, "'ask'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Less => write!(f, "'<'"),
            TokenKind::LessEqual => write!(f, "'<='"),
            TokenKind::Greater => write!(f, "'>'"),
            TokenKind::GreaterEqual => write!(f, "'>='"),
            TokenKind::EqualEqual => write!(f, "'=='"),
            TokenKind::NotEqual => write!(f, "'!='"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Indent => write!(f, "indent"),
            TokenKind::Dedent => write!(f, "dedent"),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Error => write!(f, "invalid token ({})", self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub span: SourceSpan,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lex error at line {}, column {}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Indentation-aware lexer for Chest source code.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    indent_stack: Vec<usize>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            indent_stack: vec![0],
        }
    }

    /// Tokenize the entire input.
    ///
    /// Fails fast with a [`LexError`] on the first malformed token,
    /// unterminated string, or inconsistent dedent.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.skip_inline_whitespace();

            match self.peek() {
                None => break,
                Some('\n') => {
                    self.advance();
                    self.handle_newline(&mut tokens);
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    self.skip_line_comment();
                }
                Some(_) => {
                    let token = self.next_token();
                    tokens.push(token);
                }
            }

            if let Some(token) = tokens.last() {
                if token.kind == TokenKind::Error {
                    return Err(LexError {
                        message: token.text.clone(),
                        span: token.span,
                    });
                }
            }
        }

        // Close any blocks still open at end of input.
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            tokens.push(Token::new(
                TokenKind::Dedent,
                String::new(),
                self.point_span(),
            ));
        }
        tokens.push(Token::new(TokenKind::Eof, String::new(), self.point_span()));

        Ok(tokens)
    }

    /// Handle a just-consumed newline: measure the indentation of the next
    /// content-bearing line and synthesize the structural tokens.
    ///
    /// Wider indentation pushes the stack and emits one `Indent`. Narrower
    /// indentation pops every stack entry greater than the new width, emitting
    /// one `Dedent` per pop; a width that lands between stack entries is an
    /// error. Equal width emits a plain `Newline`.
    fn handle_newline(&mut self, tokens: &mut Vec<Token>) {
        let span = self.point_span();

        let Some(width) = self.measure_indentation() else {
            // Only blank lines or comments remain on this path.
            tokens.push(Token::new(TokenKind::Newline, "\n".to_string(), span));
            return;
        };

        let current = self.indent_stack.last().copied().unwrap_or(0);

        if width > current {
            self.indent_stack.push(width);
            tokens.push(Token::new(TokenKind::Indent, " ".repeat(width), span));
        } else if width < current {
            while self.indent_stack.len() > 1
                && self.indent_stack.last().copied().unwrap_or(0) > width
            {
                self.indent_stack.pop();
                tokens.push(Token::new(TokenKind::Dedent, String::new(), span));
            }

            if self.indent_stack.last().copied().unwrap_or(0) != width {
                tokens.push(Token::new(
                    TokenKind::Error,
                    "inconsistent indentation".to_string(),
                    span,
                ));
            }
        } else {
            tokens.push(Token::new(TokenKind::Newline, "\n".to_string(), span));
        }
    }

    /// Measure the indentation of the next line that carries content.
    ///
    /// Pure lookahead: nothing is consumed. Spaces count one column, tabs
    /// four. Blank lines and `//` comment lines are scanned past; `None`
    /// means no content remains before end of input.
    fn measure_indentation(&self) -> Option<usize> {
        let mut pos = self.position;
        let mut indent = 0usize;

        while pos < self.input.len() {
            match self.input[pos] {
                ' ' => {
                    indent += 1;
                    pos += 1;
                }
                '\t' => {
                    indent += 4;
                    pos += 1;
                }
                '\n' | '\r' => {
                    pos += 1;
                    indent = 0;
                }
                '/' if pos + 1 < self.input.len() && self.input[pos + 1] == '/' => {
                    while pos < self.input.len() && self.input[pos] != '\n' {
                        pos += 1;
                    }
                }
                _ => return Some(indent),
            }
        }

        None
    }

    /// Scan one ordinary (non-structural) token.
    fn next_token(&mut self) -> Token {
        let start_line = self.line;
        let start_column = self.column;

        let Some(ch) = self.advance() else {
            return self.error_token("unexpected end of input", start_line, start_column);
        };

        match ch {
            '"' => self.string_literal(start_line, start_column),
            '0'..='9' => self.number_literal(ch, start_line, start_column),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch, start_line, start_column),

            '{' => self.make_token(TokenKind::LeftBrace, "{", start_line, start_column),
            '}' => self.make_token(TokenKind::RightBrace, "}", start_line, start_column),
            '(' => self.make_token(TokenKind::LeftParen, "(", start_line, start_column),
            ')' => self.make_token(TokenKind::RightParen, ")", start_line, start_column),
            ',' => self.make_token(TokenKind::Comma, ",", start_line, start_column),
            ';' => self.make_token(TokenKind::Semicolon, ";", start_line, start_column),

            '+' => self.make_token(TokenKind::Plus, "+", start_line, start_column),
            '-' => self.make_token(TokenKind::Minus, "-", start_line, start_column),
            '*' => self.make_token(TokenKind::Star, "*", start_line, start_column),
            '/' => self.make_token(TokenKind::Slash, "/", start_line, start_column),
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::LessEqual, "<=", start_line, start_column)
                } else {
                    self.make_token(TokenKind::Less, "<", start_line, start_column)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GreaterEqual, ">=", start_line, start_column)
                } else {
                    self.make_token(TokenKind::Greater, ">", start_line, start_column)
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::EqualEqual, "==", start_line, start_column)
                } else {
                    self.make_token(TokenKind::Assign, "=", start_line, start_column)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEqual, "!=", start_line, start_column)
                } else {
                    self.error_token("unexpected character: '!'", start_line, start_column)
                }
            }

            _ => self.error_token(
                format!("unexpected character: '{}'", ch),
                start_line,
                start_column,
            ),
        }
    }

    /// Scan a string literal; the opening quote is already consumed.
    ///
    /// Escapes `\n \t \r` are translated; any other escaped character (which
    /// covers `\\` and `\"`) passes through unchanged.
    fn string_literal(&mut self, start_line: usize, start_column: usize) -> Token {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance();
                    return self.make_token(TokenKind::String, text, start_line, start_column);
                }
                '\\' => {
                    self.advance();
                    let Some(escaped) = self.advance() else {
                        break;
                    };
                    text.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                }
                _ => {
                    text.push(ch);
                    self.advance();
                }
            }
        }

        self.error_token("unterminated string literal", start_line, start_column)
    }

    /// Scan a number literal: digits with an optional fractional part.
    ///
    /// A trailing dot is not part of the number (no digit follows it), and
    /// there are no exponents or sign prefixes in the language.
    fn number_literal(&mut self, first_digit: char, start_line: usize, start_column: usize) -> Token {
        let mut text = String::new();
        text.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            self.advance();
            while let Some(ch) = self.peek() {
                if ch.is_ascii_digit() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        self.make_token(TokenKind::Number, text, start_line, start_column)
    }

    /// Scan an identifier or keyword. Keywords match case-insensitively but
    /// the token text keeps the original casing.
    fn identifier_or_keyword(
        &mut self,
        first_char: char,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match ident.to_ascii_lowercase().as_str() {
            "building" => TokenKind::Building,
            "office" => TokenKind::Office,
            "employee" => TokenKind::Employee,
            "chest" => TokenKind::Chest,
            "show" => TokenKind::Show,
            "decide" => TokenKind::Decide,
            "else" => TokenKind::Else,
            "go" => TokenKind::Go,
            "poke" => TokenKind::Poke,
            "attach" => TokenKind::Attach,
            "ask" => TokenKind::Ask,
            "true" | "false" | "verdadeiro" | "falso" => TokenKind::Bool,
            _ => TokenKind::Identifier,
        };

        self.make_token(kind, ident, start_line, start_column)
    }

    /// Skip spaces, tabs, and carriage returns within a line.
    fn skip_inline_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip a `//` comment up to (not including) the line's newline, so the
    /// newline still drives indentation handling.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn make_token(
        &self,
        kind: TokenKind,
        text: impl Into<String>,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        Token::new(
            kind,
            text.into(),
            SourceSpan::new(start_line, start_column, self.line, self.column),
        )
    }

    fn error_token(
        &self,
        message: impl Into<String>,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        Token::new(
            TokenKind::Error,
            message.into(),
            SourceSpan::new(start_line, start_column, self.line, self.column),
        )
    }

    /// Peek at the current character without consuming.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters.
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to the next character.
    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Zero-width span at the current position.
    fn point_span(&self) -> SourceSpan {
        SourceSpan::new(self.line, self.column, self.line, self.column)
    }
}
