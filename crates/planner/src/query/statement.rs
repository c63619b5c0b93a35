//! Rendered statements handed to the execution layer.

use crate::error::PlannerError;
use docstore_model::core::value::Value;

/// A rendered query with its compile-time parameters.
///
/// `values[i]` binds the `i`-th `?` marker; the remaining `bind_markers`
/// markers come last and are bound per fetch via [`Query::bind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub cql: String,
    pub values: Vec<Value>,
    pub bind_markers: usize,
    pub allow_filtering: bool,
}

/// A query with every marker bound, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub cql: String,
    pub values: Vec<Value>,
}

impl Query {
    pub fn bind(&self, late_values: Vec<Value>) -> Result<BoundQuery, PlannerError> {
        if late_values.len() != self.bind_markers {
            return Err(PlannerError::BindMismatch {
                expected: self.bind_markers,
                actual: late_values.len(),
            });
        }

        let mut values = self.values.clone();
        values.extend(late_values);
        Ok(BoundQuery {
            cql: self.cql.clone(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Query;
    use crate::error::PlannerError;
    use docstore_model::core::value::Value;

    fn query(bind_markers: usize) -> Query {
        Query {
            cql: "SELECT * FROM docs WHERE p0 = ? AND key = ?".to_string(),
            values: vec![Value::from("a")],
            bind_markers,
            allow_filtering: false,
        }
    }

    #[test]
    fn test_bind_appends_late_values() {
        let bound = query(1).bind(vec![Value::from("doc-1")]).unwrap();
        assert_eq!(bound.values, vec![Value::from("a"), Value::from("doc-1")]);
    }

    #[test]
    fn test_bind_rejects_wrong_count() {
        let err = query(1).bind(vec![]).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::BindMismatch {
                expected: 1,
                actual: 0
            }
        ));
    }
}
