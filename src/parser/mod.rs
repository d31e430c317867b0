//! Parsing pipeline for Chest source code
//!
//! Source text flows through the indentation-aware [`lexer`] into a flat
//! token stream, then through the recursive-descent [`Parser`] into the
//! [`ast`] node tree. Parsing fails fast: the first lexical or structural
//! error aborts with a message and source span.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use ast::{AstNode, BinOp, ChestType, Parameter, Program, SourceSpan, TypeRef};
pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use parse::{parse, ParseError, Parser};
