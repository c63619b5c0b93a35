//! Compilation of filter expressions into storage predicates.
//!
//! Every compiler resolves its expression once, at construction, into a
//! [`BoundPredicates`] list. The statement's WHERE clause is that list
//! followed by the late-bound [`SearchQueryBuilder::bind_predicates`], and
//! the parameters follow the same order.

pub mod condition;
pub mod contains;
pub mod contains_key;
pub mod exists;
pub mod path;

pub use contains::ContainsCompiler;
pub use contains_key::ContainsKeyCompiler;
pub use exists::ExistsCompiler;
pub use path::FilterPathCompiler;

use crate::{
    error::PlannerError,
    query::{
        ast::predicate::Predicate,
        builder::select::SelectBuilder,
        dialect::Cql,
        renderer::{Render, Renderer},
        statement::Query,
    },
    schema::{DocumentProperties, path::convert_escaped_characters},
    table_ref,
};
use docstore_model::{
    core::value::Value,
    filter::{ConditionKind, FilterExpression, FilterPath},
};
use tracing::trace;

/// A predicate together with the value bound to its marker.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundPredicate {
    pub predicate: Predicate,
    pub value: Value,
}

/// Ordered predicate/value pairs. Pairs can only be appended whole, so the
/// `i`-th value always binds the `i`-th predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundPredicates {
    entries: Vec<BoundPredicate>,
}

impl BoundPredicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: Predicate, value: impl Into<Value>) {
        let value = value.into();
        trace!("Adding predicate {predicate} bound to {value}");
        self.entries.push(BoundPredicate { predicate, value });
    }

    pub fn push_bound(&mut self, bound: BoundPredicate) {
        self.push(bound.predicate, bound.value);
    }

    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.entries.iter().map(|e| &e.predicate)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundPredicate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What every filter compiler exposes to the statement assembler.
pub trait SearchQueryBuilder {
    /// Whether the statement needs `ALLOW FILTERING`.
    fn allow_filtering(&self) -> bool;

    /// The compile-time predicates with their values.
    fn resolved(&self) -> &BoundPredicates;

    /// Predicates bound by the execution layer on every fetch.
    fn bind_predicates(&self) -> Vec<Predicate>;

    fn predicates(&self) -> Vec<Predicate> {
        self.resolved().predicates().cloned().collect()
    }

    fn values(&self) -> Vec<Value> {
        self.resolved().values().cloned().collect()
    }

    /// Assembles the statement: compile-time predicates, then the late-bound
    /// ones, with the relaxed-filtering flag attached.
    fn build_query(&self, keyspace: &str, table: &str, columns: &[&str]) -> Query {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let builder = SelectBuilder::new()
            .select(columns)
            .from(table_ref!(keyspace, table));

        let builder = self
            .resolved()
            .iter()
            .fold(builder, |b, bp| b.where_bound(bp.predicate.clone(), bp.value.clone()));
        let builder = self
            .bind_predicates()
            .into_iter()
            .fold(builder, |b, p| b.where_deferred(p));

        let select = builder.allow_filtering(self.allow_filtering()).build();

        let mut renderer = Renderer::new(&Cql);
        select.render(&mut renderer);
        let bind_markers = renderer.deferred;
        let (cql, values) = renderer.finish();

        Query {
            cql,
            values,
            bind_markers,
            allow_filtering: self.allow_filtering(),
        }
    }
}

/// Late-bound restriction of a compiled filter to a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentScope {
    key_column: String,
    scoped: bool,
}

impl DocumentScope {
    pub fn new(props: &DocumentProperties) -> Self {
        Self {
            key_column: props.table.key_column.clone(),
            scoped: false,
        }
    }

    pub fn scoped(mut self) -> Self {
        self.scoped = true;
        self
    }

    pub fn bind_predicates(&self) -> Vec<Predicate> {
        if self.scoped {
            vec![Predicate::eq(&self.key_column)]
        } else {
            Vec::new()
        }
    }
}

/// One compiler per condition family, selected by the condition itself.
#[derive(Debug, Clone)]
pub enum FilterCompiler {
    Path(FilterPathCompiler),
    Exists(ExistsCompiler),
    Contains(ContainsCompiler),
    ContainsKey(ContainsKeyCompiler),
}

impl FilterCompiler {
    pub fn new(
        props: &DocumentProperties,
        expression: FilterExpression,
    ) -> Result<Self, PlannerError> {
        let compiler = match expression.condition.kind() {
            ConditionKind::Eq
            | ConditionKind::Ne
            | ConditionKind::Gt
            | ConditionKind::Gte
            | ConditionKind::Lt
            | ConditionKind::Lte
            | ConditionKind::In
            | ConditionKind::Like => Self::Path(FilterPathCompiler::new(props, expression)?),
            ConditionKind::Exists => Self::Exists(ExistsCompiler::new(props, expression)?),
            ConditionKind::Contains => Self::Contains(ContainsCompiler::new(props, expression)?),
            ConditionKind::ContainsKey => {
                Self::ContainsKey(ContainsKeyCompiler::new(props, expression)?)
            }
        };
        Ok(compiler)
    }

    /// Restricts the compiled filter to one document; the key is bound late.
    ///
    /// CONTAINS statements never carry late-bound predicates and cannot be
    /// scoped.
    pub fn scoped_to_document(self) -> Result<Self, PlannerError> {
        match self {
            Self::Path(c) => Ok(Self::Path(c.scoped_to_document())),
            Self::Exists(c) => Ok(Self::Exists(c.scoped_to_document())),
            Self::Contains(_) => Err(PlannerError::InvalidArgument {
                compiler: "Document scoping",
                expected: "non-CONTAINS",
                actual: ConditionKind::Contains,
            }),
            Self::ContainsKey(c) => Ok(Self::ContainsKey(c.scoped_to_document())),
        }
    }

    fn inner(&self) -> &dyn SearchQueryBuilder {
        match self {
            Self::Path(c) => c,
            Self::Exists(c) => c,
            Self::Contains(c) => c,
            Self::ContainsKey(c) => c,
        }
    }
}

impl SearchQueryBuilder for FilterCompiler {
    fn allow_filtering(&self) -> bool {
        self.inner().allow_filtering()
    }

    fn resolved(&self) -> &BoundPredicates {
        self.inner().resolved()
    }

    fn bind_predicates(&self) -> Vec<Predicate> {
        self.inner().bind_predicates()
    }
}

/// Fails unless `actual` is one of the kinds the compiler handles.
pub(crate) fn expect_kind(
    compiler: &'static str,
    expected: &'static str,
    accepted: &[ConditionKind],
    actual: ConditionKind,
) -> Result<(), PlannerError> {
    if accepted.contains(&actual) {
        Ok(())
    } else {
        Err(PlannerError::InvalidArgument {
            compiler,
            expected,
            actual,
        })
    }
}

/// Fails when the compiler would reference a path column past `max_depth`.
pub(crate) fn check_depth(
    props: &DocumentProperties,
    path: &FilterPath,
    required: usize,
) -> Result<(), PlannerError> {
    if required > props.max_depth() {
        return Err(PlannerError::PathTooDeep {
            path: path.to_string(),
            required,
            max_depth: props.max_depth(),
        });
    }
    Ok(())
}

/// Equality on every parent segment, then on the field, one path column each.
pub(crate) fn push_path_chain(
    bound: &mut BoundPredicates,
    props: &DocumentProperties,
    path: &FilterPath,
) {
    for (depth, segment) in path.parent_path().iter().enumerate() {
        bound.push(
            Predicate::eq(props.path_column_name(depth)),
            convert_escaped_characters(segment),
        );
    }

    let field_depth = path.parent_path().len();
    bound.push(
        Predicate::eq(props.path_column_name(field_depth)),
        convert_escaped_characters(path.field()),
    );
}

/// `ALLOW FILTERING` is avoidable only when every predicate is an equality
/// and the path-column equalities form the prefix `p0, p1, ...` in order.
pub(crate) fn requires_filtering(bound: &BoundPredicates, props: &DocumentProperties) -> bool {
    let mut next_depth = 0;
    for predicate in bound.predicates() {
        if !predicate.is_equality() {
            return true;
        }
        if let Some(depth) = props.table.path_column_depth(&predicate.column) {
            if depth != next_depth {
                return true;
            }
            next_depth += 1;
        }
    }
    false
}

/// A valid condition of the given kind.
#[cfg(test)]
pub(crate) fn sample_condition(kind: ConditionKind) -> docstore_model::filter::Condition {
    use docstore_model::filter::{Condition, Literal};

    match kind {
        ConditionKind::Eq => Condition::Eq(Literal::from("x")),
        ConditionKind::Ne => Condition::Ne(Literal::from(1.0)),
        ConditionKind::Gt => Condition::Gt(Literal::from(1.0)),
        ConditionKind::Gte => Condition::Gte(Literal::from(1.0)),
        ConditionKind::Lt => Condition::Lt(Literal::from(1.0)),
        ConditionKind::Lte => Condition::Lte(Literal::from(1.0)),
        ConditionKind::In => Condition::In(vec![Literal::from("a")]),
        ConditionKind::Exists => Condition::Exists,
        ConditionKind::Contains => Condition::Contains(Literal::from("x")),
        ConditionKind::ContainsKey => Condition::ContainsKey("k".to_string()),
        ConditionKind::Like => Condition::Like("x%".to_string()),
    }
}
