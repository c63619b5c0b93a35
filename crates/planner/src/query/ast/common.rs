//! Defines common, reusable AST nodes for building CQL queries.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRef {
    pub keyspace: Option<String>,
    pub name: String,
}
