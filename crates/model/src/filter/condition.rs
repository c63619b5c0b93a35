use crate::{core::value::Value, error::FilterError, filter::evaluate::LikePattern};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A JSON scalar used as the right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
}

/// The leaf-value column family a literal is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Literal {
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Literal::String(_) => ValueKind::String,
            Literal::Number(_) => ValueKind::Number,
            Literal::Boolean(_) => ValueKind::Boolean,
        }
    }

    /// Converts the literal into the value bound to its leaf-value column.
    ///
    /// With `numeric_booleans`, booleans are stored as `1`/`0`.
    pub fn to_value(&self, numeric_booleans: bool) -> Value {
        match self {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => Value::Float(*n),
            Literal::Boolean(b) if numeric_booleans => Value::Int(i64::from(*b)),
            Literal::Boolean(b) => Value::Boolean(*b),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

/// The comparison applied at a filter path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Eq(Literal),
    Ne(Literal),
    Gt(Literal),
    Gte(Literal),
    Lt(Literal),
    Lte(Literal),
    In(Vec<Literal>),
    Exists,
    /// Some element of the array at the path equals the literal.
    Contains(Literal),
    /// The object at the path has a direct child with this key.
    ContainsKey(String),
    /// SQL LIKE pattern over the string value.
    Like(String),
}

/// Fieldless mirror of [`Condition`], used for dispatch and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Exists,
    Contains,
    ContainsKey,
    Like,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 11] = [
        ConditionKind::Eq,
        ConditionKind::Ne,
        ConditionKind::Gt,
        ConditionKind::Gte,
        ConditionKind::Lt,
        ConditionKind::Lte,
        ConditionKind::In,
        ConditionKind::Exists,
        ConditionKind::Contains,
        ConditionKind::ContainsKey,
        ConditionKind::Like,
    ];

    /// The operator as it appears in a filter document.
    pub fn operator(&self) -> &'static str {
        match self {
            ConditionKind::Eq => "$eq",
            ConditionKind::Ne => "$ne",
            ConditionKind::Gt => "$gt",
            ConditionKind::Gte => "$gte",
            ConditionKind::Lt => "$lt",
            ConditionKind::Lte => "$lte",
            ConditionKind::In => "$in",
            ConditionKind::Exists => "$exists",
            ConditionKind::Contains => "$contains",
            ConditionKind::ContainsKey => "$containsKey",
            ConditionKind::Like => "$like",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::Eq(_) => ConditionKind::Eq,
            Condition::Ne(_) => ConditionKind::Ne,
            Condition::Gt(_) => ConditionKind::Gt,
            Condition::Gte(_) => ConditionKind::Gte,
            Condition::Lt(_) => ConditionKind::Lt,
            Condition::Lte(_) => ConditionKind::Lte,
            Condition::In(_) => ConditionKind::In,
            Condition::Exists => ConditionKind::Exists,
            Condition::Contains(_) => ConditionKind::Contains,
            Condition::ContainsKey(_) => ConditionKind::ContainsKey,
            Condition::Like(_) => ConditionKind::Like,
        }
    }

    /// Checks the literal(s) against what the operator can express.
    pub fn validate(&self) -> Result<(), FilterError> {
        match self {
            Condition::Gt(Literal::Boolean(_))
            | Condition::Gte(Literal::Boolean(_))
            | Condition::Lt(Literal::Boolean(_))
            | Condition::Lte(Literal::Boolean(_)) => Err(FilterError::BooleanRange {
                op: self.kind().operator(),
            }),
            Condition::In(values) => {
                let first = values.first().ok_or(FilterError::EmptyInList)?.value_kind();
                match values.iter().map(Literal::value_kind).find(|k| *k != first) {
                    Some(other) => Err(FilterError::MixedInList {
                        first: first.name(),
                        other: other.name(),
                    }),
                    None => Ok(()),
                }
            }
            Condition::Like(pattern) => LikePattern::new(pattern).map(|_| ()),
            Condition::ContainsKey(key) if key.is_empty() => Err(FilterError::EmptyContainsKey),
            _ => Ok(()),
        }
    }

    /// The leaf-value column family this condition compares against, if any.
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Condition::Eq(l)
            | Condition::Ne(l)
            | Condition::Gt(l)
            | Condition::Gte(l)
            | Condition::Lt(l)
            | Condition::Lte(l)
            | Condition::Contains(l) => Some(l.value_kind()),
            Condition::In(values) => values.first().map(Literal::value_kind),
            Condition::Like(_) => Some(ValueKind::String),
            Condition::Exists | Condition::ContainsKey(_) => None,
        }
    }
}
