//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the dynamic value every Chest
//! variable and expression produces. Storage is uniformly dynamic: a declared
//! variable can hold any variant over its lifetime, and operators inspect
//! tags at evaluation time rather than trusting declarations.
//!
//! # Value Types
//!
//! - [`Value::Number`]: 64-bit float
//! - [`Value::Text`]: immutable string
//! - [`Value::Bool`]: boolean
//! - [`Value::Empty`]: the value of a declared-but-uninitialized variable
//!
//! # The Empty Sentinel
//!
//! `Empty` keeps reads of uninitialized variables deterministic: it prints as
//! `null`, counts as zero in numeric coercion, and is falsy.

use std::fmt;

/// A dynamic runtime value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    #[default]
    Empty,
}

impl Value {
    /// Human-readable tag name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Bool(_) => "bool",
            Value::Empty => "empty",
        }
    }

    /// Get the number, returns None if not a Number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the text, returns None if not Text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the bool, returns None if not a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if this value is the empty sentinel
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl fmt::Display for Value {
    /// The value's output form: numbers drop a trailing `.0`, booleans are
    /// lowercase words, text prints verbatim, and empty prints `null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Empty => write!(f, "null"),
        }
    }
}
