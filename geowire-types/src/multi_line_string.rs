use serde::{Deserialize, Serialize};

use crate::line_string::LineString;

/// A set of line strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MultiLineString(Vec<LineString>);

impl MultiLineString {
    /// Lines of the set.
    pub fn lines(&self) -> &[LineString] {
        &self.0
    }
}

impl From<Vec<LineString>> for MultiLineString {
    fn from(value: Vec<LineString>) -> Self {
        Self(value)
    }
}
