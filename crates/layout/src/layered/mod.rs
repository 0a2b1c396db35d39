mod acyclic;
mod crossings;
mod layers;
mod positions;

use crate::{LayoutEngine, NodeSizes, Point, RankDir};
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;
use tracing::debug;

use acyclic::make_acyclic;
use crossings::minimize_crossings;
use layers::assign_layers;
use positions::assign_coordinates;

/// Default distance between two successive layers
pub const DEFAULT_RANK_SEP: f32 = 50.0;

/// Default distance between two nodes of the same layer
pub const DEFAULT_NODE_SEP: f32 = 50.0;

/// Errors that can occur during layered layout computation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayeredLayoutError<N>
where
    N: fmt::Debug,
{
    /// The graph contains a cycle at the given node
    #[error("graph contains a cycle at node {0:?}")]
    GraphHasCycle(N),

    /// The size of the given node is negative or not finite
    #[error("node {0:?} has an invalid size")]
    InvalidSize(N),

    /// A separation setting is negative or not finite
    #[error("{0} must be finite and not negative")]
    InvalidSeparation(&'static str),
}

/// What to do with cycles found in the input graph
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Reverse the back edges found by a depth first search
    #[default]
    Reverse,
    /// Fail with [`LayeredLayoutError::GraphHasCycle`]
    Reject,
}

/// Configuration for the layered (Sugiyama-style) layout
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    /// Direction in which successive layers are placed
    pub direction: RankDir,

    /// Distance between two successive layers
    pub rank_sep: f32,

    /// Minimum distance between two nodes of the same layer
    pub node_sep: f32,

    /// How cycles in the input graph are handled
    pub cycles: CyclePolicy,

    /// Maximum iterations for crossing minimization
    pub max_crossing_iterations: usize,

    /// Maximum iterations for in-layer position optimization
    pub max_position_iterations: usize,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self {
            direction: RankDir::default(),
            rank_sep: DEFAULT_RANK_SEP,
            node_sep: DEFAULT_NODE_SEP,
            cycles: CyclePolicy::default(),
            max_crossing_iterations: 10,
            max_position_iterations: 50,
        }
    }
}

impl LayeredLayout {
    /// Create a new layered layout with the given direction and spacing
    pub fn new(direction: RankDir, rank_sep: f32, node_sep: f32) -> Self {
        Self {
            direction,
            rank_sep,
            node_sep,
            ..Default::default()
        }
    }

    pub fn with_cycles(self, cycles: CyclePolicy) -> Self {
        Self { cycles, ..self }
    }
}

/// Layer structure that can be cached and reused
#[derive(Debug, Clone)]
pub struct Layers<N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    /// Acyclic copy of the input graph, without self loops
    pub(crate) graph: DiGraphMap<N, ()>,

    /// Nodes organized into layers, each one in its final order
    pub nodes: Vec<Vec<N>>,

    /// Edges of the input graph that were reversed to break cycles
    pub reversed: Vec<(N, N)>,

    /// Number of edge crossings between adjacent layers (quality metric)
    pub crossings: usize,
}

impl<N> Layers<N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    /// Index of the layer containing the node
    pub fn rank_of(&self, node: N) -> Option<usize> {
        self.nodes.iter().position(|layer| layer.contains(&node))
    }
}

impl LayeredLayout {
    /// Compute layer structure (expensive, cache this)
    ///
    /// This phase breaks cycles, assigns nodes to layers and orders each
    /// layer to reduce edge crossings. It only depends on the graph
    /// structure, not on node sizes.
    ///
    /// # Errors
    /// Returns an error if the graph contains a cycle and the layout is
    /// configured with [`CyclePolicy::Reject`]
    pub fn compute_layers<N>(
        &self,
        graph: &DiGraphMap<N, ()>,
    ) -> Result<Layers<N>, LayeredLayoutError<N>>
    where
        N: Copy + Ord + Hash + fmt::Debug,
    {
        let (acyclic, reversed) = make_acyclic(graph, self.cycles)?;
        if !reversed.is_empty() {
            debug!("Reversed {} edges to break cycles: {reversed:?}", reversed.len());
        }

        let layers = assign_layers(&acyclic)?;
        let (layers, crossings) =
            minimize_crossings(&acyclic, layers, self.max_crossing_iterations);

        debug!(
            "Assigned {} nodes to {} layers with {crossings} crossings",
            acyclic.node_count(),
            layers.len()
        );

        Ok(Layers {
            graph: acyclic,
            nodes: layers,
            reversed,
            crossings,
        })
    }

    /// Compute node centers from cached layers (cheap, rerun when sizes change)
    ///
    /// # Errors
    /// Returns an error if a node size or a separation is negative or not
    /// finite
    pub fn compute_positions<N, S>(
        &self,
        layers: &Layers<N>,
        sizes: &S,
    ) -> Result<HashMap<N, Point>, LayeredLayoutError<N>>
    where
        N: Copy + Ord + Hash + fmt::Debug,
        S: NodeSizes<N>,
    {
        for (name, separation) in [("rank_sep", self.rank_sep), ("node_sep", self.node_sep)] {
            if !separation.is_finite() || separation < 0.0 {
                return Err(LayeredLayoutError::InvalidSeparation(name));
            }
        }

        if let Some(&node) = layers
            .nodes
            .iter()
            .flatten()
            .find(|&&node| !sizes.size(node).is_valid_size())
        {
            return Err(LayeredLayoutError::InvalidSize(node));
        }

        Ok(assign_coordinates(&layers.nodes, &layers.graph, sizes, self))
    }
}

impl<N> LayoutEngine<N> for LayeredLayout
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    type Error = LayeredLayoutError<N>;

    fn layout<S>(&self, graph: &DiGraphMap<N, ()>, sizes: &S) -> Result<HashMap<N, Point>, Self::Error>
    where
        S: NodeSizes<N>,
    {
        let layers = self.compute_layers(graph)?;
        self.compute_positions(&layers, sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2;
    use test_log::test;

    const SIZE: Vec2 = Vec2 { x: 100.0, y: 40.0 };

    fn chain() -> DiGraphMap<u32, ()> {
        DiGraphMap::from_edges([(1, 2), (2, 3)])
    }

    #[test]
    fn empty_graph() {
        let graph = DiGraphMap::<u32, ()>::new();
        let positions = LayeredLayout::default().layout(&graph, &SIZE).unwrap();
        assert!(positions.is_empty());
    }

    #[test]
    fn isolated_nodes_share_first_layer() {
        let mut graph = DiGraphMap::<u32, ()>::new();
        graph.add_node(1);
        graph.add_node(2);
        graph.add_node(3);

        let engine = LayeredLayout::new(RankDir::TopBottom, 30.0, 10.0);
        let layers = engine.compute_layers(&graph).unwrap();
        assert_eq!(layers.nodes, vec![vec![1, 2, 3]]);

        let positions = engine.compute_positions(&layers, &SIZE).unwrap();
        assert_eq!(positions.len(), 3);
        for pos in positions.values() {
            assert_eq!(pos.y, 20.0);
        }

        let mut xs: Vec<f32> = positions.values().map(|p| p.x).collect();
        xs.sort_by(f32::total_cmp);
        assert!(xs[1] - xs[0] >= SIZE.x + 10.0 - 0.01);
        assert!(xs[2] - xs[1] >= SIZE.x + 10.0 - 0.01);
    }

    #[test]
    fn left_right_chain() {
        let engine = LayeredLayout::new(RankDir::LeftRight, 30.0, 10.0);
        let positions = engine.layout(&chain(), &SIZE).unwrap();

        assert_eq!(positions[&1], Point::new(50.0, 20.0));
        assert_eq!(positions[&2], Point::new(180.0, 20.0));
        assert_eq!(positions[&3], Point::new(310.0, 20.0));
    }

    #[test]
    fn top_bottom_chain() {
        let engine = LayeredLayout::new(RankDir::TopBottom, 30.0, 10.0);
        let positions = engine.layout(&chain(), &SIZE).unwrap();

        assert_eq!(positions[&1], Point::new(50.0, 20.0));
        assert_eq!(positions[&2], Point::new(50.0, 90.0));
        assert_eq!(positions[&3], Point::new(50.0, 160.0));
    }

    #[test]
    fn reversed_directions_mirror_the_rank_axis() {
        let rl = LayeredLayout::new(RankDir::RightLeft, 30.0, 10.0)
            .layout(&chain(), &SIZE)
            .unwrap();
        assert!(rl[&1].x > rl[&2].x && rl[&2].x > rl[&3].x);
        assert_eq!(rl[&3].x, 50.0);

        let bt = LayeredLayout::new(RankDir::BottomTop, 30.0, 10.0)
            .layout(&chain(), &SIZE)
            .unwrap();
        assert!(bt[&1].y > bt[&2].y && bt[&2].y > bt[&3].y);
        assert_eq!(bt[&3].y, 20.0);
    }

    #[test]
    fn diamond_is_symmetric() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (1, 3), (2, 4), (3, 4)]);
        let engine = LayeredLayout::new(RankDir::TopBottom, 30.0, 10.0);

        let layers = engine.compute_layers(&graph).unwrap();
        assert_eq!(layers.nodes.len(), 3);
        assert_eq!(layers.rank_of(4), Some(2));
        assert_eq!(layers.crossings, 0);

        let positions = engine.compute_positions(&layers, &SIZE).unwrap();
        let middle = (positions[&2].x + positions[&3].x) / 2.0;
        assert!((positions[&1].x - middle).abs() < 0.5);
        assert!((positions[&4].x - middle).abs() < 0.5);
        assert!((positions[&3].x - positions[&2].x).abs() >= SIZE.x + 10.0 - 0.01);
    }

    #[test]
    fn cycles_are_reversed_by_default() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (3, 1)]);
        let layers = LayeredLayout::default().compute_layers(&graph).unwrap();

        assert_eq!(layers.reversed, vec![(3, 1)]);
        assert_eq!(layers.nodes, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn cycles_can_be_rejected() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 1)]);
        let engine = LayeredLayout::default().with_cycles(CyclePolicy::Reject);

        assert_eq!(
            engine.compute_layers(&graph).unwrap_err(),
            LayeredLayoutError::GraphHasCycle(1)
        );
    }

    #[test]
    fn self_loops_are_ignored() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 1), (1, 2)]);
        let engine = LayeredLayout::default().with_cycles(CyclePolicy::Reject);

        let layers = engine.compute_layers(&graph).unwrap();
        assert_eq!(layers.nodes, vec![vec![1], vec![2]]);
        assert!(layers.reversed.is_empty());
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        let sizes = |node: u32| {
            if node == 2 {
                Vec2::new(f32::NAN, 10.0)
            } else {
                SIZE
            }
        };

        assert_eq!(
            LayeredLayout::default().layout(&chain(), &sizes).unwrap_err(),
            LayeredLayoutError::InvalidSize(2)
        );
    }

    #[test]
    fn invalid_separations_are_rejected() {
        let nan_rank = LayeredLayout::new(RankDir::LeftRight, f32::NAN, 10.0);
        assert_eq!(
            nan_rank.layout(&chain(), &SIZE).unwrap_err(),
            LayeredLayoutError::InvalidSeparation("rank_sep")
        );

        let infinite_node = LayeredLayout::new(RankDir::TopBottom, 30.0, f32::INFINITY);
        assert_eq!(
            infinite_node.layout(&chain(), &SIZE).unwrap_err(),
            LayeredLayoutError::InvalidSeparation("node_sep")
        );

        let negative = LayeredLayout::new(RankDir::TopBottom, -1.0, 10.0);
        assert!(negative.layout(&chain(), &SIZE).is_err());

        // Zero separation packs nodes edge to edge
        let packed = LayeredLayout::new(RankDir::TopBottom, 0.0, 0.0);
        assert_eq!(packed.layout(&chain(), &SIZE).unwrap()[&2], Point::new(50.0, 60.0));
    }

    #[test]
    fn sizes_from_map() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2)]);
        let sizes = HashMap::from([(1, Vec2::new(200.0, 40.0)), (2, Vec2::new(100.0, 80.0))]);
        let engine = LayeredLayout::new(RankDir::LeftRight, 50.0, 10.0);

        let positions = engine.layout(&graph, &sizes).unwrap();
        // First layer is as thick as its widest node
        assert_eq!(positions[&1].x, 100.0);
        assert_eq!(positions[&2].x, 200.0 + 50.0 + 50.0);
    }
}
