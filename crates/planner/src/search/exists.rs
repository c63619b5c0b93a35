use crate::{
    error::PlannerError,
    query::ast::predicate::Predicate,
    schema::DocumentProperties,
    search::{
        BoundPredicates, DocumentScope, SearchQueryBuilder, check_depth, expect_kind,
        push_path_chain, requires_filtering,
    },
};
use docstore_model::filter::{ConditionKind, FilterExpression};
use tracing::debug;

/// Compiles `$exists`: the path chain, then `p{k+1} = ''` so the row is
/// the field's own leaf rather than some row below it.
#[derive(Debug, Clone)]
pub struct ExistsCompiler {
    expression: FilterExpression,
    resolved: BoundPredicates,
    allow_filtering: bool,
    scope: DocumentScope,
}

impl ExistsCompiler {
    pub fn new(
        props: &DocumentProperties,
        expression: FilterExpression,
    ) -> Result<Self, PlannerError> {
        expect_kind(
            "ExistsCompiler",
            "EXISTS",
            &[ConditionKind::Exists],
            expression.condition.kind(),
        )?;
        check_depth(props, &expression.path, expression.path.depth())?;

        let mut resolved = BoundPredicates::new();
        push_path_chain(&mut resolved, props, &expression.path);

        let sentinel_depth = expression.path.depth();
        if sentinel_depth < props.max_depth() {
            resolved.push(Predicate::eq(props.path_column_name(sentinel_depth)), "");
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

impl SearchQueryBuilder for ExistsCompiler {
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
