//! Shape of the collection table every document is shredded into.
//!
//! A document becomes one row per leaf. Each row stores the leaf's JSON path
//! split over `max_depth` path columns (`p0`, `p1`, ...; unused trailing
//! columns hold the empty string) and the leaf's scalar in exactly one of
//! the typed value columns.

pub mod path;

use crate::{
    error::PlannerError,
    schema::path::{MAX_ARRAY_LENGTH, format_array_index},
};
use docstore_model::filter::ValueKind;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};
use tracing::debug;

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentProperties {
    /// Number of path columns every row reserves.
    pub max_depth: usize,
    pub max_array_length: usize,
    /// Booleans are stored as `1`/`0` in the boolean value column.
    pub numeric_booleans: bool,
    pub table: DocumentTableProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTableProperties {
    pub key_column: String,
    pub leaf_column: String,
    pub string_value_column: String,
    pub double_value_column: String,
    pub boolean_value_column: String,
    pub path_column_prefix: String,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
            numeric_booleans: false,
            table: DocumentTableProperties::default(),
        }
    }
}

impl Default for DocumentTableProperties {
    fn default() -> Self {
        Self {
            key_column: "key".to_string(),
            leaf_column: "leaf".to_string(),
            string_value_column: "text_value".to_string(),
            double_value_column: "dbl_value".to_string(),
            boolean_value_column: "bool_value".to_string(),
            path_column_prefix: "p".to_string(),
        }
    }
}

impl DocumentTableProperties {
    pub fn path_column_name(&self, depth: usize) -> String {
        format!("{}{depth}", self.path_column_prefix)
    }

    /// Inverse of [`Self::path_column_name`].
    pub fn path_column_depth(&self, column: &str) -> Option<usize> {
        let digits = column.strip_prefix(&self.path_column_prefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Reject "p01" so the mapping stays one-to-one.
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        digits.parse().ok()
    }

    pub fn value_column(&self, kind: ValueKind) -> &str {
        match kind {
            ValueKind::String => &self.string_value_column,
            ValueKind::Number => &self.double_value_column,
            ValueKind::Boolean => &self.boolean_value_column,
        }
    }
}

impl DocumentProperties {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PlannerError> {
        let props: DocumentProperties = serde_json::from_str(json)?;
        props.validate()?;
        debug!(
            "Loaded document properties: max_depth={}, numeric_booleans={}",
            props.max_depth, props.numeric_booleans
        );
        Ok(props)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlannerError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn path_column_name(&self, depth: usize) -> String {
        self.table.path_column_name(depth)
    }

    pub fn value_column(&self, kind: ValueKind) -> &str {
        self.table.value_column(kind)
    }

    /// The path literal of an array position, bounded by `max_array_length`.
    pub fn array_index(&self, index: usize) -> Result<String, PlannerError> {
        if index >= self.max_array_length {
            return Err(PlannerError::ArrayIndexOutOfRange {
                index,
                max_array_length: self.max_array_length,
            });
        }
        Ok(format_array_index(index))
    }

    pub fn all_path_columns(&self) -> Vec<String> {
        (0..self.max_depth)
            .map(|i| self.table.path_column_name(i))
            .collect()
    }

    /// Every column of the collection table, in table order.
    pub fn all_columns(&self) -> Vec<String> {
        let t = &self.table;
        let mut columns = vec![t.key_column.clone()];
        columns.extend(self.all_path_columns());
        columns.extend([
            t.leaf_column.clone(),
            t.string_value_column.clone(),
            t.double_value_column.clone(),
            t.boolean_value_column.clone(),
        ]);
        columns
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        // CONTAINS needs the field column plus the array index column.
        if self.max_depth < 2 {
            return Err(PlannerError::Config(format!(
                "max_depth must be at least 2, got {}",
                self.max_depth
            )));
        }
        if self.max_array_length == 0 || self.max_array_length > MAX_ARRAY_LENGTH {
            return Err(PlannerError::Config(format!(
                "max_array_length must be between 1 and {MAX_ARRAY_LENGTH}, got {}",
                self.max_array_length
            )));
        }

        let t = &self.table;
        let named = [
            ("key_column", &t.key_column),
            ("leaf_column", &t.leaf_column),
            ("string_value_column", &t.string_value_column),
            ("double_value_column", &t.double_value_column),
            ("boolean_value_column", &t.boolean_value_column),
            ("path_column_prefix", &t.path_column_prefix),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(PlannerError::Config(format!("{name} cannot be empty")));
        }

        let mut seen = HashSet::new();
        for column in self.all_columns() {
            if !seen.insert(column.clone()) {
                return Err(PlannerError::Config(format!(
                    "column '{column}' is defined more than once"
                )));
            }
        }

        Ok(())
    }
}
