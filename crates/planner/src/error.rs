use docstore_model::{error::FilterError, filter::ConditionKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("{compiler} only accepts {expected} conditions, got {actual}")]
    InvalidArgument {
        compiler: &'static str,
        expected: &'static str,
        actual: ConditionKind,
    },

    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Filter path '{path}' needs {required} path columns, but the schema only has {max_depth}")]
    PathTooDeep {
        path: String,
        required: usize,
        max_depth: usize,
    },

    #[error("Array index {index} is out of range, max_array_length is {max_array_length}")]
    ArrayIndexOutOfRange {
        index: usize,
        max_array_length: usize,
    },

    #[error("Invalid document properties: {0}")]
    Config(String),

    #[error("Failed to read the document properties file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to deserialize the document properties: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Query expects {expected} late-bound values, got {actual}")]
    BindMismatch { expected: usize, actual: usize },
}
