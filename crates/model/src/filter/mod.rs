//! The filter model handed over by the filter-document parser.
//!
//! A [`FilterExpression`] pairs one [`FilterPath`] with one [`Condition`]
//! and is the unit every query compiler consumes.

pub mod condition;
pub mod evaluate;
pub mod expression;
pub mod path;

pub use condition::{Condition, ConditionKind, Literal, ValueKind};
pub use evaluate::LikePattern;
pub use expression::FilterExpression;
pub use path::FilterPath;
