//! Binary comparison between two JSON values
//!
//! Comparisons never fail; a pairing that cannot be compared is a non-match.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `like`: case-sensitive substring containment
    Like,
    /// Anything else; never matches
    Unsupported(String),
}

impl Operator {
    /// Returns the operator token
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Like => "like",
            Operator::Unsupported(raw) => raw,
        }
    }

    /// Returns true if this operator can ever match
    pub fn is_supported(&self) -> bool {
        !matches!(self, Operator::Unsupported(_))
    }
}

impl From<&str> for Operator {
    fn from(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "=" => Operator::Eq,
            "!=" => Operator::Ne,
            ">" => Operator::Gt,
            ">=" => Operator::Ge,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            "like" => Operator::Like,
            _ => Operator::Unsupported(raw.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        Operator::from(raw.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Evaluates `value <op> operand`
pub fn compare(value: &Value, op: &Operator, operand: &Value) -> bool {
    match op {
        Operator::Eq => loose_eq(value, operand),
        Operator::Ne => !loose_eq(value, operand),
        Operator::Gt => ordering(value, operand) == Some(Ordering::Greater),
        Operator::Ge => matches!(
            ordering(value, operand),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Lt => ordering(value, operand) == Some(Ordering::Less),
        Operator::Le => matches!(
            ordering(value, operand),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Like => like(value, operand),
        Operator::Unsupported(_) => false,
    }
}

/// Equality with numeric coercion when a number is involved
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if let Some((x, y)) = numeric_pair(a, b) {
        return x == y;
    }
    a == b
}

fn ordering(a: &Value, b: &Value) -> Option<Ordering> {
    if let Some((x, y)) = numeric_pair(a, b) {
        return x.partial_cmp(&y);
    }
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

// Both sides as f64 when at least one is a JSON number and the other is a
// number or a numeric string.
fn numeric_pair(a: &Value, b: &Value) -> Option<(f64, f64)> {
    if !a.is_number() && !b.is_number() {
        return None;
    }
    Some((as_number(a)?, as_number(b)?))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn like(value: &Value, operand: &Value) -> bool {
    match (as_text(value), as_text(operand)) {
        (Some(haystack), Some(needle)) => haystack.contains(needle.as_str()),
        _ => false,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        _ => None,
    }
}
