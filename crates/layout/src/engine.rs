use crate::{NodeSizes, Point};
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that computes positions for graph nodes
///
/// The request is a directed graph plus a size for each node, the layout
/// options (direction, spacing...) being carried by the engine value itself.
/// The response maps every node of the graph to the center of its box.
///
/// Any engine honouring this contract can replace [`crate::LayeredLayout`].
pub trait LayoutEngine<N>
where
    N: Copy + Ord + Hash,
{
    /// Error returned when the graph can't be laid out
    type Error: std::error::Error;

    /// Compute the center of every node in the graph
    ///
    /// # Errors
    /// Returns an error if a layout specific constraint is violated, for
    /// instance a cycle when the engine is configured to reject them
    fn layout<S>(&self, graph: &DiGraphMap<N, ()>, sizes: &S) -> Result<HashMap<N, Point>, Self::Error>
    where
        S: NodeSizes<N>;
}
