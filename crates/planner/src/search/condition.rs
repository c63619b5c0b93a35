use crate::{
    query::ast::predicate::{Operator, Predicate},
    schema::DocumentProperties,
    search::BoundPredicate,
};
use docstore_model::{
    core::value::Value,
    filter::{Condition, Literal, ValueKind},
};

/// The leaf-value restriction a condition contributes, if any.
pub trait ConditionPredicate {
    fn built_predicate(&self, props: &DocumentProperties) -> Option<BoundPredicate>;
}

impl ConditionPredicate for Condition {
    fn built_predicate(&self, props: &DocumentProperties) -> Option<BoundPredicate> {
        let numeric_booleans = props.numeric_booleans;
        let on_literal = |op: Operator, literal: &Literal| BoundPredicate {
            predicate: Predicate::new(props.value_column(literal.value_kind()), op),
            value: literal.to_value(numeric_booleans),
        };

        match self {
            // Array elements are matched by equality on their own row.
            Condition::Eq(l) | Condition::Contains(l) => Some(on_literal(Operator::Eq, l)),
            Condition::Ne(l) => Some(on_literal(Operator::NotEq, l)),
            Condition::Gt(l) => Some(on_literal(Operator::Gt, l)),
            Condition::Gte(l) => Some(on_literal(Operator::GtEq, l)),
            Condition::Lt(l) => Some(on_literal(Operator::Lt, l)),
            Condition::Lte(l) => Some(on_literal(Operator::LtEq, l)),
            Condition::In(literals) => {
                let kind = literals.first()?.value_kind();
                Some(BoundPredicate {
                    predicate: Predicate::new(props.value_column(kind), Operator::In),
                    value: Value::List(
                        literals
                            .iter()
                            .map(|l| l.to_value(numeric_booleans))
                            .collect(),
                    ),
                })
            }
            Condition::Like(pattern) => Some(BoundPredicate {
                predicate: Predicate::like(props.value_column(ValueKind::String)),
                value: Value::String(pattern.clone()),
            }),
            Condition::Exists | Condition::ContainsKey(_) => None,
        }
    }
}
