//! Runtime operator library
//!
//! The fixed set of pure functions generated code dispatches into. Operators
//! are selected by symbol alone; operand types are discovered here, at
//! evaluation time, by inspecting value tags and coercing as needed.
//!
//! The logical connectives and the conversion helpers have no expression
//! syntax yet; they exist so the runtime is complete ahead of the grammar.

use super::errors::RuntimeError;
use super::value::Value;
use crate::parser::ast::BinOp;

/// Apply a binary operator to two evaluated operands.
pub fn evaluate_binary_op(
    op: BinOp,
    left: &Value,
    right: &Value,
) -> Result<Value, RuntimeError> {
    match op {
        BinOp::Add => add_values(left, right),
        BinOp::Sub => sub_values(left, right),
        BinOp::Mul => mul_values(left, right),
        BinOp::Div => div_values(left, right),
        BinOp::Lt => compare_values("<", left, right, |a, b| a < b),
        BinOp::Gt => compare_values(">", left, right, |a, b| a > b),
        BinOp::Le => compare_values("<=", left, right, |a, b| a <= b),
        BinOp::Ge => compare_values(">=", left, right, |a, b| a >= b),
        BinOp::Eq => Ok(Value::Bool(left == right)),
        BinOp::Ne => Ok(Value::Bool(left != right)),
    }
}

/// Dynamic `+`: text concatenation when either operand is text, numeric sum
/// otherwise.
///
/// Empty defaults to zero before the text check, so `empty + "a"` is `"0a"`.
pub fn add_values(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let zero = Value::Number(0.0);
    let left = if left.is_empty() { &zero } else { left };
    let right = if right.is_empty() { &zero } else { right };

    if matches!(left, Value::Text(_)) || matches!(right, Value::Text(_)) {
        return Ok(Value::Text(format!("{}{}", left, right)));
    }

    match (coerce_to_number(left), coerce_to_number(right)) {
        (Some(a), Some(b)) => Ok(Value::Number(a + b)),
        _ => Err(RuntimeError::type_coercion("+", left, right)),
    }
}

pub fn sub_values(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_pair("-", left, right)?;
    Ok(Value::Number(a - b))
}

pub fn mul_values(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_pair("*", left, right)?;
    Ok(Value::Number(a * b))
}

/// Dynamic `/`. Division follows IEEE 754: a zero divisor yields infinity
/// or NaN rather than an error.
pub fn div_values(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_pair("/", left, right)?;
    Ok(Value::Number(a / b))
}

fn compare_values(
    op: &'static str,
    left: &Value,
    right: &Value,
    cmp: impl Fn(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_pair(op, left, right)?;
    Ok(Value::Bool(cmp(a, b)))
}

fn numeric_pair(
    op: &'static str,
    left: &Value,
    right: &Value,
) -> Result<(f64, f64), RuntimeError> {
    match (coerce_to_number(left), coerce_to_number(right)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RuntimeError::type_coercion(op, left, right)),
    }
}

/// Coerce a value to a number: numbers pass through, bools map to 1/0, text
/// is parsed after trimming, and empty counts as zero.
#[inline]
pub fn coerce_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s.trim().parse().ok(),
        Value::Empty => Some(0.0),
    }
}

/// Truthiness of a value: zero, empty text, `false`, and empty are falsy,
/// everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Number(n) => *n != 0.0,
        Value::Text(s) => !s.is_empty(),
        Value::Bool(b) => *b,
        Value::Empty => false,
    }
}

/// Logical AND over truthiness. Not strict about operand types.
pub fn and_values(left: &Value, right: &Value) -> Value {
    Value::Bool(is_truthy(left) && is_truthy(right))
}

/// Logical OR over truthiness.
pub fn or_values(left: &Value, right: &Value) -> Value {
    Value::Bool(is_truthy(left) || is_truthy(right))
}

/// Logical NOT over truthiness.
pub fn not_value(value: &Value) -> Value {
    Value::Bool(!is_truthy(value))
}

/// Parse text as a number, trimming surrounding whitespace.
pub fn text_to_number(text: &str) -> Result<Value, RuntimeError> {
    match text.trim().parse::<f64>() {
        Ok(n) => Ok(Value::Number(n)),
        Err(_) => Err(RuntimeError::InvalidConversion {
            value: text.to_string(),
            target: "number",
        }),
    }
}

/// Parse text as a boolean. Accepts the literal spellings plus `sim`/`não`
/// and the digits `1`/`0`, case-insensitively.
pub fn text_to_bool(text: &str) -> Result<Value, RuntimeError> {
    match text.to_lowercase().as_str() {
        "true" | "verdadeiro" | "sim" | "1" => Ok(Value::Bool(true)),
        "false" | "falso" | "não" | "nao" | "0" => Ok(Value::Bool(false)),
        _ => Err(RuntimeError::InvalidConversion {
            value: text.to_string(),
            target: "bool",
        }),
    }
}

/// A number's canonical text form.
pub fn number_to_text(value: f64) -> Value {
    Value::Text(value.to_string())
}

/// A boolean's canonical text form.
pub fn bool_to_text(value: bool) -> Value {
    Value::Text(value.to_string())
}
