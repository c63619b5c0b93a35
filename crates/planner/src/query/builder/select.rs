//! Provides a type-safe, fluent builder for constructing `Select` ASTs.

// --- Typestate Marker Structs ---
// These zero-sized structs represent the state of the builder.
// They ensure that methods are called in the correct CQL order at compile time.

use crate::query::ast::{
    common::TableRef,
    predicate::Predicate,
    select::{Binding, Restriction, Select},
};
use docstore_model::core::value::Value;

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the `SELECT` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

// --- The Main Builder ---

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    state: State,
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for the initial state of the builder.
impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            state: InitialState,
        }
    }

    /// Adds a `SELECT` clause with a list of columns; empty selects `*`.
    pub fn select(mut self, columns: Vec<String>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        SelectBuilder {
            ast: self.ast,
            state: SelectState,
        }
    }
}

/// Implementation for the state after `SELECT` has been called.
/// The only valid next step is to specify a `FROM` table.
impl SelectBuilder<SelectState> {
    pub fn from(mut self, table: TableRef) -> SelectBuilder<FromState> {
        self.ast.from = Some(table);
        SelectBuilder {
            ast: self.ast,
            state: FromState,
        }
    }
}

/// Implementation for the state after `FROM` has been called.
impl SelectBuilder<FromState> {
    /// Adds a restriction whose value is known now.
    pub fn where_bound(mut self, predicate: Predicate, value: Value) -> Self {
        self.ast.where_clause.push(Restriction {
            predicate,
            binding: Binding::Value(value),
        });
        self
    }

    /// Adds a restriction whose value is supplied when the query is bound.
    pub fn where_deferred(mut self, predicate: Predicate) -> Self {
        self.ast.where_clause.push(Restriction {
            predicate,
            binding: Binding::Deferred,
        });
        self
    }

    pub fn allow_filtering(mut self, allow: bool) -> Self {
        self.ast.allow_filtering = allow;
        self
    }

    /// Finalizes and returns the constructed `Select` AST.
    pub fn build(self) -> Select {
        self.ast
    }
}
