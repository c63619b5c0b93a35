//! Defines the Abstract Syntax Tree (AST) for a SELECT query.

use crate::query::ast::{common::TableRef, predicate::Predicate};
use docstore_model::core::value::Value;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// The list of columns to be returned.
    pub columns: Vec<String>,

    /// e.g., `FROM ks.collection`
    pub from: Option<TableRef>,

    /// Restrictions joined with `AND`, rendered in order.
    pub where_clause: Vec<Restriction>,

    /// Appends `ALLOW FILTERING`.
    pub allow_filtering: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Restriction {
    pub predicate: Predicate,
    pub binding: Binding,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Known at compile time.
    Value(Value),
    /// Supplied by the execution layer when the query is bound.
    Deferred,
}
