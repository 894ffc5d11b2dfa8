//! Source location tracking.

use std::path::PathBuf;

/// A span in the source code. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub file: PathBuf,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    pub fn new(file: PathBuf, start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            file,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Builds a span from a tree-sitter node (whose rows and columns are 0-based).
    pub fn from_node(file: PathBuf, node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self::new(file, start.row + 1, start.column + 1, end.row + 1, end.column + 1)
    }
}
