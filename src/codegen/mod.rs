//! Code generation for the Chest language
//!
//! Turns a parsed [`Program`](crate::parser::ast::Program) into an
//! [`Executable`](crate::runtime::unit::Executable): offices become named
//! units, employee bodies become instruction sequences, and variable names
//! are resolved to local slots through a scoped symbol table.

pub mod emitter;
pub mod errors;
pub mod symbols;

pub use emitter::Emitter;
pub use errors::BindError;
pub use symbols::SymbolTable;
