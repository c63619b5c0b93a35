use crate::{
    error::PlannerError,
    query::ast::predicate::Predicate,
    schema::{DocumentProperties, path::convert_escaped_characters},
    search::{
        BoundPredicates, DocumentScope, SearchQueryBuilder, check_depth, expect_kind,
        push_path_chain, requires_filtering,
    },
};
use docstore_model::filter::{Condition, ConditionKind, FilterExpression};
use tracing::debug;

/// Compiles `$containsKey`: the object at the path has a direct child
/// named `key`, i.e. some row has `key` in the column after the field.
#[derive(Debug, Clone)]
pub struct ContainsKeyCompiler {
    expression: FilterExpression,
    resolved: BoundPredicates,
    allow_filtering: bool,
    scope: DocumentScope,
}

impl ContainsKeyCompiler {
    pub fn new(
        props: &DocumentProperties,
        expression: FilterExpression,
    ) -> Result<Self, PlannerError> {
        expect_kind(
            "ContainsKeyCompiler",
            "CONTAINS KEY",
            &[ConditionKind::ContainsKey],
            expression.condition.kind(),
        )?;
        expression.condition.validate()?;
        check_depth(props, &expression.path, expression.path.depth() + 1)?;

        let mut resolved = BoundPredicates::new();
        push_path_chain(&mut resolved, props, &expression.path);
        if let Condition::ContainsKey(key) = &expression.condition {
            resolved.push(
                Predicate::eq(props.path_column_name(expression.path.depth())),
                convert_escaped_characters(key),
            );
        }
        let allow_filtering = requires_filtering(&resolved, props);

        debug!(
            "Compiled {} filter on '{}': {} predicates, allow_filtering={}",
            expression.condition.kind(),
            expression.path,
            resolved.len(),
            allow_filtering
        );

        Ok(Self {
            expression,
            resolved,
            allow_filtering,
            scope: DocumentScope::new(props),
        })
    }

    pub fn scoped_to_document(mut self) -> Self {
        self.scope = self.scope.scoped();
        self
    }

    pub fn expression(&self) -> &FilterExpression {
        &self.expression
    }
}

impl SearchQueryBuilder for ContainsKeyCompiler {
    fn allow_filtering(&self) -> bool {
        self.allow_filtering
    }

    fn resolved(&self) -> &BoundPredicates {
        &self.resolved
    }

    fn bind_predicates(&self) -> Vec<Predicate> {
        self.scope.bind_predicates()
    }
}
