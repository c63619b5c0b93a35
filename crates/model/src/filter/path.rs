use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a single leaf in a JSON document, as a list of raw path
/// segments (escape sequences are kept as written by the client).
///
/// The last segment is the `field`; everything before it is the
/// `parent_path`, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FilterPath {
    segments: Vec<String>,
}

impl FilterPath {
    pub fn new<I, S>(segments: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments.into_iter().map(Into::into).collect::<Vec<_>>();
        if segments.is_empty() {
            return Err(FilterError::EmptyPath);
        }
        Ok(Self { segments })
    }

    /// All segments except the last one.
    pub fn parent_path(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The final segment.
    pub fn field(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of path columns needed to address the field itself.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl TryFrom<Vec<String>> for FilterPath {
    type Error = FilterError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<FilterPath> for Vec<String> {
    fn from(path: FilterPath) -> Self {
        path.segments
    }
}

impl fmt::Display for FilterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
