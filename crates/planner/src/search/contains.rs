//! Array membership (`$contains`).
//!
//! Arrays are shredded into one row per element, with the element position
//! stored as `[NNNNNN]` in the path column right after the array field.
//! For `{"tags": {"$contains": "javascript"}}` this compiles to
//!
//! ```text
//! p0 = 'tags' AND p1 LIKE '[%]' AND p2 = '' AND text_value = 'javascript'
//! ```
//!
//! The `p2 = ''` guard keeps elements that are themselves objects or
//! arrays from matching; it is omitted when the schema has no such column.
//! Nothing is bound late: the statement is complete once compiled.

use crate::{
    error::PlannerError,
    query::ast::predicate::Predicate,
    schema::{DocumentProperties, path::ARRAY_INDEX_PATTERN},
    search::{
        BoundPredicates, SearchQueryBuilder, check_depth, condition::ConditionPredicate,
        expect_kind, push_path_chain,
    },
};
use docstore_model::filter::{ConditionKind, FilterExpression};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ContainsCompiler {
    expression: FilterExpression,
    resolved: BoundPredicates,
}

impl ContainsCompiler {
    pub fn new(
        props: &DocumentProperties,
        expression: FilterExpression,
    ) -> Result<Self, PlannerError> {
        expect_kind(
            "ContainsCompiler",
            "CONTAINS",
            &[ConditionKind::Contains],
            expression.condition.kind(),
        )?;
        expression.condition.validate()?;

        // field column plus the array index column
        let path = &expression.path;
        check_depth(props, path, path.depth() + 1)?;

        let resolved = Self::resolve(props, &expression);
        debug!(
            "Compiled {} filter on '{}': {} predicates, allow_filtering=true",
            expression.condition.kind(),
            expression.path,
            resolved.len()
        );

        Ok(Self {
            expression,
            resolved,
        })
    }

    pub fn expression(&self) -> &FilterExpression {
        &self.expression
    }

    fn resolve(props: &DocumentProperties, expression: &FilterExpression) -> BoundPredicates {
        let mut resolved = BoundPredicates::new();

        // parent segments, then the array field itself
        push_path_chain(&mut resolved, props, &expression.path);

        // any element position
        let index_depth = expression.path.parent_path().len() + 1;
        resolved.push(
            Predicate::like(props.path_column_name(index_depth)),
            ARRAY_INDEX_PATTERN,
        );

        // the element must be a scalar leaf
        let leaf_guard_depth = index_depth + 1;
        if leaf_guard_depth < props.max_depth() {
            resolved.push(Predicate::eq(props.path_column_name(leaf_guard_depth)), "");
        }

        if let Some(value_predicate) = expression.condition.built_predicate(props) {
            resolved.push_bound(value_predicate);
        }

        resolved
    }
}

impl SearchQueryBuilder for ContainsCompiler {
    /// A LIKE on the index column is never index-local.
    fn allow_filtering(&self) -> bool {
        true
    }

    fn resolved(&self) -> &BoundPredicates {
        &self.resolved
    }

    fn bind_predicates(&self) -> Vec<Predicate> {
        Vec::new()
    }
}
