//! Defines the AST for a single WHERE restriction.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,    // =
    NotEq, // !=
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=
    In,    // IN
    Like,  // LIKE
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::In => "IN",
            Operator::Like => "LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `column <op> ?`; the right-hand side is always a bind marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    pub column: String,
    pub op: Operator,
}

impl Predicate {
    pub fn new(column: impl Into<String>, op: Operator) -> Self {
        Self {
            column: column.into(),
            op,
        }
    }

    pub fn eq(column: impl Into<String>) -> Self {
        Self::new(column, Operator::Eq)
    }

    pub fn like(column: impl Into<String>) -> Self {
        Self::new(column, Operator::Like)
    }

    pub fn is_equality(&self) -> bool {
        self.op == Operator::Eq
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ?", self.column, self.op)
    }
}
