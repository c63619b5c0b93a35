//! Defines the `Dialect` trait for database-specific query syntax.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in quotation marks
    /// when the dialect requires it.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    fn get_placeholder(&self, index: usize) -> String;
}

/// Cassandra Query Language.
#[derive(Debug, Clone)]
pub struct Cql;

impl Cql {
    /// Unquoted CQL identifiers are case-insensitive, so anything that is not
    /// already lower-case alphanumeric must be quoted to survive as written.
    fn needs_quotes(ident: &str) -> bool {
        let mut chars = ident.chars();
        match chars.next() {
            Some(first) if first.is_ascii_lowercase() => {}
            _ => return true,
        }
        !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }
}

impl Dialect for Cql {
    fn quote_identifier(&self, ident: &str) -> String {
        if Self::needs_quotes(ident) {
            format!(r#""{}""#, ident.replace('"', r#""""#))
        } else {
            ident.to_string()
        }
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // CQL uses positional ? markers
        "?".into()
    }
}
