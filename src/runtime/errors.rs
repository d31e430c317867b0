//! Runtime error type

use super::value::Value;
use std::fmt;

/// Errors raised while an executable unit is running.
///
/// Runtime errors carry no source span: by the time they occur the program
/// has been lowered to instructions and spans no longer exist.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// An operand could not be coerced to a number for the operator.
    TypeCoercion {
        op: &'static str,
        left: String,
        right: String,
    },

    /// A conversion helper could not interpret its input.
    InvalidConversion {
        value: String,
        target: &'static str,
    },

    /// The program contains no employee to run.
    MissingEntryPoint,
}

impl RuntimeError {
    pub(crate) fn type_coercion(op: &'static str, left: &Value, right: &Value) -> Self {
        RuntimeError::TypeCoercion {
            op,
            left: format!("{} '{}'", left.type_name(), left),
            right: format!("{} '{}'", right.type_name(), right),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::TypeCoercion { op, left, right } => {
                write!(f, "Cannot apply '{}' to {} and {}", op, left, right)
            }
            RuntimeError::InvalidConversion { value, target } => {
                write!(f, "Could not convert '{}' to {}", value, target)
            }
            RuntimeError::MissingEntryPoint => {
                write!(f, "No entry point found in the program")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
