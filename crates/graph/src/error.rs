//! Error types for graph operations

use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while laying out a graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// An edge references a node that is not part of the graph
    #[error("edge #{index} ({from} -> {to}) references unknown node {missing:?}")]
    DanglingEdge {
        /// Position of the edge in the edge list
        index: usize,
        /// Source node id of the edge
        from: String,
        /// Target node id of the edge
        to: String,
        /// The endpoint that is missing from the node list
        missing: String,
    },

    /// Two nodes share the same id
    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),

    /// The layout engine failed
    #[error("layout failed: {0}")]
    Layout(String),
}

impl GraphError {
    /// Creates a layout error from any engine error
    pub fn layout(error: impl std::fmt::Display) -> Self {
        Self::Layout(error.to_string())
    }
}
