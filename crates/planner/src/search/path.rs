use crate::{
    error::PlannerError,
    query::ast::predicate::Predicate,
    schema::DocumentProperties,
    search::{
        BoundPredicates, DocumentScope, SearchQueryBuilder, check_depth,
        condition::ConditionPredicate, expect_kind, push_path_chain, requires_filtering,
    },
};
use docstore_model::filter::{ConditionKind, FilterExpression};
use tracing::debug;

const ACCEPTED: [ConditionKind; 8] = [
    ConditionKind::Eq,
    ConditionKind::Ne,
    ConditionKind::Gt,
    ConditionKind::Gte,
    ConditionKind::Lt,
    ConditionKind::Lte,
    ConditionKind::In,
    ConditionKind::Like,
];

/// Compiles value comparisons (`$eq`, `$ne`, ranges, `$in`, `$like`) at a
/// fixed path: one equality per path segment, then the value restriction.
#[derive(Debug, Clone)]
pub struct FilterPathCompiler {
    expression: FilterExpression,
    resolved: BoundPredicates,
    allow_filtering: bool,
    scope: DocumentScope,
}

impl FilterPathCompiler {
    pub fn new(
        props: &DocumentProperties,
        expression: FilterExpression,
    ) -> Result<Self, PlannerError> {
        expect_kind(
            "FilterPathCompiler",
            "value comparison",
            &ACCEPTED,
            expression.condition.kind(),
        )?;
        expression.condition.validate()?;
        check_depth(props, &expression.path, expression.path.depth())?;

        let mut resolved = BoundPredicates::new();
        push_path_chain(&mut resolved, props, &expression.path);
        if let Some(value_predicate) = expression.condition.built_predicate(props) {
            resolved.push_bound(value_predicate);
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

impl SearchQueryBuilder for FilterPathCompiler {
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

#[cfg(test)]
mod tests {
    use super::FilterPathCompiler;
    use crate::{
        error::PlannerError,
        query::ast::predicate::{Operator, Predicate},
        schema::DocumentProperties,
        search::{SearchQueryBuilder, path::ACCEPTED, sample_condition},
    };
    use docstore_model::{
        core::value::Value,
        error::FilterError,
        filter::{Condition, ConditionKind, FilterExpression, FilterPath, Literal},
    };

    fn expression(path: &[&str], condition: Condition) -> FilterExpression {
        FilterExpression::new(FilterPath::new(path.iter().copied()).unwrap(), condition)
    }

    #[test]
    fn test_equality_is_index_local() {
        let props = DocumentProperties::default();
        let compiler = FilterPathCompiler::new(
            &props,
            expression(&["user", "name"], Condition::Eq(Literal::from("John"))),
        )
        .unwrap();

        assert_eq!(
            compiler.predicates(),
            vec![
                Predicate::eq("p0"),
                Predicate::eq("p1"),
                Predicate::eq("text_value")
            ]
        );
        assert_eq!(
            compiler.values(),
            vec![Value::from("user"), Value::from("name"), Value::from("John")]
        );
        assert!(!compiler.allow_filtering());
        assert!(compiler.bind_predicates().is_empty());
    }

    #[test]
    fn test_range_needs_filtering() {
        let props = DocumentProperties::default();
        let compiler = FilterPathCompiler::new(
            &props,
            expression(&["price"], Condition::Gte(Literal::from(9.5))),
        )
        .unwrap();

        assert_eq!(
            compiler.predicates(),
            vec![
                Predicate::eq("p0"),
                Predicate::new("dbl_value", Operator::GtEq)
            ]
        );
        assert_eq!(compiler.values(), vec![Value::from("price"), Value::Float(9.5)]);
        assert!(compiler.allow_filtering());
    }

    #[test]
    fn test_each_operator_maps_to_cql() {
        let props = DocumentProperties::default();
        let cases = [
            (Condition::Ne(Literal::from(1.0)), Operator::NotEq),
            (Condition::Gt(Literal::from(1.0)), Operator::Gt),
            (Condition::Lt(Literal::from(1.0)), Operator::Lt),
            (Condition::Lte(Literal::from(1.0)), Operator::LtEq),
            (Condition::In(vec![Literal::from(1.0)]), Operator::In),
        ];

        for (condition, op) in cases {
            let compiler = FilterPathCompiler::new(&props, expression(&["n"], condition)).unwrap();
            let last = compiler.predicates().pop().unwrap();
            assert_eq!(last, Predicate::new("dbl_value", op));
            assert!(compiler.allow_filtering());
        }
    }

    #[test]
    fn test_escaped_segments() {
        let props = DocumentProperties::default();
        let compiler = FilterPathCompiler::new(
            &props,
            expression(&[r"a\.b", r"c\,d"], Condition::Like("x%".to_string())),
        )
        .unwrap();

        assert_eq!(
            compiler.values(),
            vec![Value::from("a.b"), Value::from("c,d"), Value::from("x%")]
        );
        assert_eq!(compiler.predicates()[2], Predicate::like("text_value"));
    }

    #[test]
    fn test_rejects_invalid_condition() {
        let props = DocumentProperties::default();
        let err = FilterPathCompiler::new(
            &props,
            expression(&["a"], Condition::Lt(Literal::from(true))),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Filter(FilterError::BooleanRange { .. })
        ));
    }

    #[test]
    fn test_rejects_too_deep_path() {
        let props = DocumentProperties::with_max_depth(2);
        let err = FilterPathCompiler::new(
            &props,
            expression(&["a", "b", "c"], Condition::Eq(Literal::from("x"))),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::PathTooDeep {
                required: 3,
                max_depth: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_path_at_max_depth() {
        let props = DocumentProperties::with_max_depth(2);
        let compiler = FilterPathCompiler::new(
            &props,
            expression(&["a", "b"], Condition::Eq(Literal::from("x"))),
        )
        .unwrap();
        assert_eq!(compiler.predicates().len(), 3);
    }

    #[test]
    fn test_accepts_only_value_comparisons() {
        let props = DocumentProperties::default();
        let path = FilterPath::new(["user", "address"]).unwrap();

        for kind in ConditionKind::ALL {
            let expression = FilterExpression::new(path.clone(), sample_condition(kind));
            let result = FilterPathCompiler::new(&props, expression);
            if ACCEPTED.contains(&kind) {
                assert!(result.is_ok(), "{kind} should compile");
                continue;
            }
            match result {
                Err(PlannerError::InvalidArgument { actual, .. }) => assert_eq!(actual, kind),
                other => panic!("expected InvalidArgument for {kind}, got {other:?}"),
            }
        }
    }
}
