//! Defines the core rendering trait and context for converting AST to CQL.

use crate::query::{ast::common::TableRef, dialect::Dialect};
use docstore_model::core::value::Value;

pub mod predicate;
pub mod select;

/// A trait for any AST node that can be rendered into a query string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the query string and the parameters, and provides
/// access to the dialect for syntax-specific details. Every placeholder is
/// written together with its parameter, so parameter `i` always binds the
/// `i`-th marker.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    /// Markers written without a parameter; they always follow the bound ones.
    pub deferred: usize,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            deferred: 0,
            dialect,
        }
    }

    /// Consumes the renderer and returns the final query string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    pub fn add_deferred(&mut self) {
        let placeholder = self
            .dialect
            .get_placeholder(self.params.len() + self.deferred);
        self.deferred += 1;
        self.sql.push_str(&placeholder);
    }

    pub fn render_identifier(&mut self, ident: &str) {
        let quoted = self.dialect.quote_identifier(ident);
        self.sql.push_str(&quoted);
    }

    pub fn render_table_ref(&mut self, table: &TableRef) {
        if let Some(keyspace) = &table.keyspace {
            self.render_identifier(keyspace);
            self.sql.push('.');
        }
        self.render_identifier(&table.name);
    }
}
