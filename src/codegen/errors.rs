//! Code-generation error type

use std::fmt;

/// Errors detected while translating the AST into executable form.
///
/// Bind errors carry no source span; they name the offending declaration or
/// identifier instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A variable redeclared in its scope, or an office registered twice
    /// under the same `building.office` key.
    DuplicateDeclaration { name: String },

    /// An identifier with no declaration in any enclosing scope.
    UndeclaredVariable { name: String },

    /// A node that is not a statement appeared in statement position.
    UnsupportedStatement { kind: &'static str },

    /// A node that is not an expression appeared in expression position.
    UnsupportedExpression { kind: &'static str },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::DuplicateDeclaration { name } => {
                write!(f, "Duplicate declaration of '{}'", name)
            }
            BindError::UndeclaredVariable { name } => {
                write!(f, "Variable '{}' has not been declared", name)
            }
            BindError::UnsupportedStatement { kind } => {
                write!(f, "Unsupported statement kind: {}", kind)
            }
            BindError::UnsupportedExpression { kind } => {
                write!(f, "Unsupported expression kind: {}", kind)
            }
        }
    }
}

impl std::error::Error for BindError {}
