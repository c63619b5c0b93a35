use crate::filter::{condition::Condition, path::FilterPath};
use serde::{Deserialize, Serialize};

/// A single leaf predicate of a filter document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterExpression {
    pub path: FilterPath,
    pub condition: Condition,
    /// Position of this expression in the originating filter document.
    #[serde(default)]
    pub order_index: usize,
}

impl FilterExpression {
    pub fn new(path: FilterPath, condition: Condition) -> Self {
        Self {
            path,
            condition,
            order_index: 0,
        }
    }

    pub fn with_order_index(mut self, order_index: usize) -> Self {
        self.order_index = order_index;
        self
    }
}
