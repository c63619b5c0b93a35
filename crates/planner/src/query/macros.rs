#[macro_export]
macro_rules! table_ref {
    ($name:expr) => {
        $crate::query::ast::common::TableRef {
            keyspace: None,
            name: $name.to_string(),
        }
    };
    ($keyspace:expr, $name:expr) => {
        $crate::query::ast::common::TableRef {
            keyspace: Some($keyspace.to_string()),
            name: $name.to_string(),
        }
    };
}
