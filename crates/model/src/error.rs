use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("filter path must contain at least one segment")]
    EmptyPath,

    #[error("operator {op} does not support boolean values")]
    BooleanRange { op: &'static str },

    #[error("$in requires at least one value")]
    EmptyInList,

    #[error("$in values must all be of the same type, found {first} and {other}")]
    MixedInList {
        first: &'static str,
        other: &'static str,
    },

    #[error("LIKE pattern cannot be empty")]
    EmptyLikePattern,

    #[error("invalid LIKE pattern '{pattern}': {reason}")]
    InvalidLikePattern { pattern: String, reason: String },

    #[error("CONTAINS KEY requires a non-empty key")]
    EmptyContainsKey,
}
