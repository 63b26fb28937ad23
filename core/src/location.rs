//! Source positions carried by tree nodes.
//!
//! Both types appear verbatim in the JSON hand-off, e.g.
//! `"location": { "file": "m.py", "line": 3, "column": 4 }`. The parser may
//! omit `file`; passes copy positions around but never read them.

use serde::{Deserialize, Serialize};

/// Where a node starts in the parsed file. Error reports print it as
/// `file:line:col`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Empty when the parser did not name the file.
    #[serde(default)]
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: String, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Extent of a node; `end` is the position just past its last character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
