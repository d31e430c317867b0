//! # Introduction
//!
//! Chestc compiles and runs the Chest language, a small indentation-sensitive
//! toy language in which `building` declarations hold `office`s and offices
//! hold `employee`s (namespace, class, and method analogues).  Employee bodies
//! are compiled into instruction sequences and executed on a small stack
//! machine over dynamically-typed values.
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Emitter → Executable → Execution
//! ```
//!
//! 1. [`parser`] — tokenises the source, synthesizing `Indent`/`Dedent` tokens
//!    from leading whitespace, and builds an AST by recursive descent.
//! 2. [`codegen`] — registers offices under `building.office` keys, resolves
//!    variables to storage slots through a scoped [`codegen::SymbolTable`],
//!    and emits one instruction body per employee.
//! 3. [`runtime`] — the dynamic [`runtime::Value`], the operator library, the
//!    [`runtime::Console`] input/output abstraction, and the stack machine
//!    that runs the entry employee.
//!
//! ## Supported language
//!
//! Statements: `chest` variable declarations with an optional initializer,
//! `show`, `decide`/`else`, and `attach` (parsed, no runtime effect).
//! Expressions: number, text, and bool literals, variables, `ask` (one line
//! of input, optionally after a prompt), and the left-associative binary
//! operators `+ - * / < > <= >= == !=`.  The first employee in declaration
//! order is the program's entry point.

pub mod codegen;
pub mod parser;
pub mod runtime;

use std::error::Error;
use std::fmt;

use codegen::{BindError, Emitter};
use parser::ParseError;
use runtime::Executable;

/// Any error produced while turning source text into an [`Executable`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    Parse(ParseError),
    Bind(BindError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Parse(err) => write!(f, "{}", err),
            BuildError::Bind(err) => write!(f, "{}", err),
        }
    }
}

impl Error for BuildError {}

impl From<ParseError> for BuildError {
    fn from(err: ParseError) -> Self {
        BuildError::Parse(err)
    }
}

impl From<BindError> for BuildError {
    fn from(err: BindError) -> Self {
        BuildError::Bind(err)
    }
}

/// Compile Chest source text into a runnable [`Executable`].
///
/// Convenience over [`parser::parse`] followed by [`codegen::Emitter`]; one
/// call takes source text to a unit whose entry employee can be run with
/// [`Executable::run`] or [`Executable::run_with`].
pub fn compile(source: &str) -> Result<Executable, BuildError> {
    let program = parser::parse(source)?;
    let executable = Emitter::new().compile(&program)?;
    Ok(executable)
}
