//! Record predicates
//!
//! Each filter is evaluated against a single record and never errors:
//! unresolvable paths, non-list fields and incomparable values all deny.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::comparator::{compare, loose_eq, Operator};
use super::path::resolve;
use super::Record;

fn default_positive() -> bool {
    true
}

static COUNT_EQ: Operator = Operator::Eq;

/// Lengths have no substring form; `like` counts as `=`
fn count_operator(op: &Operator) -> &Operator {
    match op {
        Operator::Like => &COUNT_EQ,
        other => other,
    }
}

/// A single predicate over a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// Dotted path resolves to a non-null value
    Present { field: String },
    /// Dotted path equals a literal
    Equals { field: String, value: Value },
    /// Dotted path compared with an operator
    Compare {
        field: String,
        op: Operator,
        value: Value,
    },
    /// Top-level key is present (non-null)
    Exists {
        field: String,
        #[serde(default = "default_positive")]
        positive: bool,
    },
    /// Top-level list field holds `value`
    Contains {
        field: String,
        value: Value,
        #[serde(default = "default_positive")]
        positive: bool,
    },
    /// Length of the list at a dotted path compared with an operator
    Count {
        field: String,
        op: Operator,
        value: Value,
    },
    /// Dotted path resolves to a list
    IsList { field: String },
}

impl Filter {
    /// Present filter
    pub fn present(field: impl Into<String>) -> Self {
        Filter::Present {
            field: field.into(),
        }
    }

    /// Equality filter
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Comparison filter
    pub fn compare(
        field: impl Into<String>,
        op: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> Self {
        Filter::Compare {
            field: field.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    /// Existence filter
    pub fn exists(field: impl Into<String>, positive: bool) -> Self {
        Filter::Exists {
            field: field.into(),
            positive,
        }
    }

    /// Membership filter
    pub fn contains(field: impl Into<String>, value: impl Into<Value>, positive: bool) -> Self {
        Filter::Contains {
            field: field.into(),
            value: value.into(),
            positive,
        }
    }

    /// Cardinality filter; `like` is treated as `=`
    pub fn count(field: impl Into<String>, op: impl Into<Operator>, value: impl Into<Value>) -> Self {
        let op = op.into();
        Filter::Count {
            field: field.into(),
            op: count_operator(&op).clone(),
            value: value.into(),
        }
    }

    /// List-shape filter
    pub fn is_list(field: impl Into<String>) -> Self {
        Filter::IsList {
            field: field.into(),
        }
    }

    /// The field this filter reads
    pub fn field(&self) -> &str {
        match self {
            Filter::Present { field }
            | Filter::Equals { field, .. }
            | Filter::Compare { field, .. }
            | Filter::Exists { field, .. }
            | Filter::Contains { field, .. }
            | Filter::Count { field, .. }
            | Filter::IsList { field } => field,
        }
    }

    /// The operator this filter compares with, if any
    pub fn operator(&self) -> Option<&Operator> {
        match self {
            Filter::Compare { op, .. } | Filter::Count { op, .. } => Some(op),
            _ => None,
        }
    }

    /// Checks if a record satisfies this filter
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Present { field } => resolve(record, field).is_some(),
            Filter::Equals { field, value } => {
                resolve(record, field).map_or(false, |v| loose_eq(v, value))
            }
            Filter::Compare { field, op, value } => {
                resolve(record, field).map_or(false, |v| compare(v, op, value))
            }
            Filter::Exists { field, positive } => {
                let present = record.get(field).map_or(false, |v| !v.is_null());
                present == *positive
            }
            Filter::Contains {
                field,
                value,
                positive,
            } => match record.get(field) {
                Some(Value::Array(items)) => {
                    items.iter().any(|item| loose_eq(item, value)) == *positive
                }
                _ => false,
            },
            Filter::Count { field, op, value } => match resolve(record, field) {
                Some(Value::Array(items)) => {
                    compare(&Value::from(items.len()), count_operator(op), value)
                }
                _ => false,
            },
            Filter::IsList { field } => matches!(resolve(record, field), Some(Value::Array(_))),
        }
    }
}

/// Checks if a record satisfies every filter (AND semantics)
pub fn matches_all(record: &Record, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(record))
}
