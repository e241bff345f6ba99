use std::cmp::Ordering;

use serde_json::Value;

use crate::domain::applicant::ApplicantData;
use crate::domain::rule::ConditionLeaf;

/// Comparison operators understood by the leaf evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparator {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Equal,
    NotEqual,
    In,
    NotIn,
}

impl Comparator {
    /// Unknown operator strings are not an error; leaves carrying one simply
    /// never match.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterOrEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessOrEqual),
            "=" | "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "IN" => Some(Self::In),
            "NOT IN" => Some(Self::NotIn),
            _ => None,
        }
    }
}

/// Result of evaluating one leaf: whether it matched, and its audit line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafOutcome {
    pub met: bool,
    pub line: String,
}

/// Evaluates one leaf comparison against applicant data. Pure; never fails.
pub fn evaluate_leaf(leaf: &ConditionLeaf, data: &ApplicantData) -> LeafOutcome {
    let actual = data.get(&leaf.field);
    let met = match Comparator::parse(&leaf.operator) {
        Some(comparator) => compare(actual, comparator, &leaf.value),
        None => false,
    };
    LeafOutcome { met, line: trace_line(&leaf.field, &leaf.operator, &leaf.value, met) }
}

/// Audit line for one evaluated comparison; the expected value is rendered
/// as JSON so strings keep their quotes.
pub fn trace_line(field: &str, operator: &str, value: &Value, met: bool) -> String {
    let mark = if met { '✓' } else { '✗' };
    format!("{field} {operator} {value} {mark}")
}

/// Core comparison shared by the eligibility, scoring, and decision tree
/// engines.
pub fn compare(actual: Option<&Value>, comparator: Comparator, expected: &Value) -> bool {
    match comparator {
        Comparator::GreaterThan => {
            matches!(ordering(actual, expected), Some(Ordering::Greater))
        }
        Comparator::GreaterOrEqual => {
            matches!(ordering(actual, expected), Some(Ordering::Greater | Ordering::Equal))
        }
        Comparator::LessThan => matches!(ordering(actual, expected), Some(Ordering::Less)),
        Comparator::LessOrEqual => {
            matches!(ordering(actual, expected), Some(Ordering::Less | Ordering::Equal))
        }
        Comparator::Equal => loose_eq(actual, expected),
        Comparator::NotEqual => !loose_eq(actual, expected),
        Comparator::In => contains(expected, actual),
        Comparator::NotIn => matches!(expected, Value::Array(_)) && !contains(expected, actual),
    }
}

/// Loose equality, preserving the source system's coercion rules: numeric
/// strings equal numbers, booleans coerce to 0/1, and a missing field
/// loosely equals an explicit null. Strings compare as strings first so
/// non-numeric text still matches itself.
fn loose_eq(actual: Option<&Value>, expected: &Value) -> bool {
    let actual = actual.unwrap_or(&Value::Null);
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::String(left), Value::String(right)) => left == right,
        (left, right) => match (coerce_number(left), coerce_number(right)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        },
    }
}

/// Relational ordering: strings lexicographically, everything else through
/// numeric coercion. A missing or null actual value has no ordering and
/// fails the comparison.
fn ordering(actual: Option<&Value>, expected: &Value) -> Option<Ordering> {
    let actual = actual?;
    if let (Value::String(left), Value::String(right)) = (actual, expected) {
        return Some(left.cmp(right));
    }
    let left = coerce_number(actual)?;
    let right = coerce_number(expected)?;
    left.partial_cmp(&right)
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse().ok()
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Membership test for IN / NOT IN. A non-array operand never matches; a
/// missing actual value is never contained. Membership is strict: no
/// cross-type coercion beyond numeric width.
fn contains(candidates: &Value, actual: Option<&Value>) -> bool {
    let Value::Array(items) = candidates else {
        return false;
    };
    let Some(actual) = actual else {
        return false;
    };
    items.iter().any(|item| strict_eq(item, actual))
}

fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.as_f64() == right.as_f64(),
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}
