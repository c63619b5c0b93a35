//! In-memory evaluation of conditions against a single leaf value.
//!
//! Used for rows fetched without a storage-side value predicate, where the
//! condition has to be re-checked on the leaf read back from the table.

use crate::{
    core::value::Value,
    error::FilterError,
    filter::condition::{Condition, Literal},
};
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;

/// A compiled LIKE pattern: `%` matches any run of characters, `_` exactly
/// one, everything else literally. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct LikePattern {
    regex: Regex,
}

impl LikePattern {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        if pattern.is_empty() {
            return Err(FilterError::EmptyLikePattern);
        }

        let mut source = String::with_capacity(pattern.len() + 2);
        source.push('^');
        let mut buf = [0u8; 4];
        for ch in pattern.chars() {
            match ch {
                '%' => source.push_str(".*"),
                '_' => source.push('.'),
                other => source.push_str(&regex::escape(other.encode_utf8(&mut buf))),
            }
        }
        source.push('$');

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| FilterError::InvalidLikePattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl Literal {
    /// Orders a stored leaf value relative to this literal. `None` when the
    /// two are of different types.
    fn compare(&self, value: &Value) -> Option<Ordering> {
        match (self, value) {
            (Literal::String(expected), Value::String(actual)) => Some(actual.cmp(expected)),
            (Literal::Number(expected), Value::Float(actual)) => actual.partial_cmp(expected),
            (Literal::Number(expected), Value::Int(actual)) => (*actual as f64).partial_cmp(expected),
            (Literal::Boolean(expected), Value::Boolean(actual)) => Some(actual.cmp(expected)),
            // numeric booleans
            (Literal::Boolean(expected), Value::Int(actual @ (0 | 1))) => {
                Some((*actual == 1).cmp(expected))
            }
            _ => None,
        }
    }
}

impl Condition {
    /// Whether the leaf value read from a row satisfies this condition.
    ///
    /// `$containsKey` never matches a single leaf: the key lives in the path,
    /// not in the value.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Condition::Eq(l) | Condition::Contains(l) => l.compare(value) == Some(Ordering::Equal),
            Condition::Ne(l) => l.compare(value) != Some(Ordering::Equal),
            Condition::Gt(l) => l.compare(value) == Some(Ordering::Greater),
            Condition::Gte(l) => matches!(
                l.compare(value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Condition::Lt(l) => l.compare(value) == Some(Ordering::Less),
            Condition::Lte(l) => {
                matches!(l.compare(value), Some(Ordering::Less | Ordering::Equal))
            }
            Condition::In(literals) => literals
                .iter()
                .any(|l| l.compare(value) == Some(Ordering::Equal)),
            Condition::Exists => true,
            Condition::ContainsKey(_) => false,
            Condition::Like(pattern) => match value {
                Value::String(s) => LikePattern::new(pattern).is_ok_and(|p| p.is_match(s)),
                _ => false,
            },
        }
    }
}
