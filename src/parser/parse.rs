//! Parser core: the token cursor, error type, and top-level program loop.
//!
//! The grammar productions are split across sibling modules by role:
//! [`declarations`](super::declarations) for buildings/offices/employees,
//! [`statements`](super::statements) for statement forms, and
//! [`expressions`](super::expressions) for the precedence-climbing
//! expression grammar.

use super::ast::{Program, SourceSpan};
use super::lexer::{LexError, Lexer, Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: SourceSpan,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            message: err.message,
            span: err.span,
        }
    }
}

/// Parse a complete source string into a [`Program`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// Recursive-descent parser over the lexer's token stream.
///
/// First error aborts; there is no recovery or resynchronization.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Lex the source and position the cursor at the first token.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the whole program. Only building declarations (and formatting
    /// tokens between them) are legal at the top level.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            if self.check(TokenKind::Building) {
                let building = self.parse_building()?;
                program.buildings.push(building);
            } else if self.match_kind(TokenKind::Newline)
                || self.match_kind(TokenKind::Indent)
                || self.match_kind(TokenKind::Dedent)
            {
                // Formatting tokens between declarations.
            } else {
                return Err(self.unexpected("'building'"));
            }
        }

        Ok(program)
    }

    /// Peek at the current token. The stream always ends with `Eof`, and the
    /// cursor never moves past it.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// The most recently consumed token.
    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Consume and return the current token.
    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require a token of the given kind, describing what was expected on
    /// failure (e.g. `"'office'"` or `"building name"`).
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Build the standard "Expected X, found Y" error at the current token.
    pub(crate) fn unexpected(&self, what: &str) -> ParseError {
        let found = self.peek();
        ParseError::new(format!("Expected {}, found {}", what, found), found.span)
    }
}
