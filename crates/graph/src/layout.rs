//! Positions editor nodes with a layered layout
//!
//! The engine works on node centers in a graph keyed by the index of each
//! node in the input slice. This module builds that graph from the editor
//! nodes and edges, and maps the centers back to top-left corners along with
//! the sides edges attach to.

use crate::{DanglingEdgePolicy, Edge, GraphError, GraphResult, LayoutConfig, Node, Position};
use linaje_layout::{LayoutEngine, RankDir};
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Nodes with their computed positions, along with the untouched edges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layouted<'a, D> {
    pub nodes: Vec<Node<D>>,
    pub edges: &'a [Edge],
}

/// Sides where incoming and outgoing edges attach, as `(target, source)`
///
/// Left to right layouts attach edges on the left and right sides, every
/// other direction on the top and bottom sides.
pub fn anchor_sides(direction: RankDir) -> (Position, Position) {
    match direction {
        RankDir::LeftRight => (Position::Left, Position::Right),
        _ => (Position::Top, Position::Bottom),
    }
}

/// Lay out the nodes with the layered engine built from `config`
///
/// Returns copies of the nodes positioned by their top-left corner, the
/// input nodes and edges are left untouched.
///
/// # Errors
/// See [`layout_elements_with`]
pub fn layout_elements<'a, D>(
    nodes: &[Node<D>],
    edges: &'a [Edge],
    config: &LayoutConfig,
) -> GraphResult<Layouted<'a, D>>
where
    D: Clone,
{
    layout_elements_with(&config.engine(), nodes, edges, config)
}

/// Lay out the nodes with any layout engine
///
/// The engine carries its own direction and spacing, `config` provides the
/// node size, the dangling edge policy and the direction used to pick the
/// anchor sides.
///
/// # Errors
/// - [`GraphError::DuplicateNode`] if two nodes share an id
/// - [`GraphError::DanglingEdge`] if an edge references an unknown node and
///   the policy is [`DanglingEdgePolicy::Reject`]
/// - [`GraphError::Layout`] if the engine fails
pub fn layout_elements_with<'a, D, E>(
    engine: &E,
    nodes: &[Node<D>],
    edges: &'a [Edge],
    config: &LayoutConfig,
) -> GraphResult<Layouted<'a, D>>
where
    D: Clone,
    E: LayoutEngine<usize>,
{
    let graph = build_graph(nodes, edges, config.dangling_edges)?;
    debug!(
        "Laying out {} nodes and {} edges {}",
        graph.node_count(),
        graph.edge_count(),
        config.direction
    );

    let centers = engine
        .layout(&graph, &config.node_size)
        .map_err(GraphError::layout)?;

    let (target_position, source_position) = anchor_sides(config.direction);
    let half = config.node_size.half();

    let nodes = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let center = centers.get(&index).ok_or_else(|| {
                GraphError::Layout(format!("no position computed for node {:?}", node.id))
            })?;

            Ok(Node {
                position: center.sub(half).into(),
                source_position: Some(source_position),
                target_position: Some(target_position),
                ..node.clone()
            })
        })
        .collect::<GraphResult<Vec<_>>>()?;

    Ok(Layouted { nodes, edges })
}

/// Build the layout graph, keyed by node index
fn build_graph<D>(
    nodes: &[Node<D>],
    edges: &[Edge],
    policy: DanglingEdgePolicy,
) -> GraphResult<DiGraphMap<usize, ()>> {
    let mut indices: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    let mut graph = DiGraphMap::with_capacity(nodes.len(), edges.len());

    for (index, node) in nodes.iter().enumerate() {
        if indices.insert(node.id.as_str(), index).is_some() {
            return Err(GraphError::DuplicateNode(node.id.clone()));
        }
        graph.add_node(index);
    }

    for (index, edge) in edges.iter().enumerate() {
        let from = indices.get(edge.source.as_str());
        let to = indices.get(edge.target.as_str());

        let (Some(&from), Some(&to)) = (from, to) else {
            let missing = if from.is_none() {
                &edge.source
            } else {
                &edge.target
            };
            let error = GraphError::DanglingEdge {
                index,
                from: edge.source.clone(),
                to: edge.target.clone(),
                missing: missing.clone(),
            };

            match policy {
                DanglingEdgePolicy::Reject => return Err(error),
                DanglingEdgePolicy::Skip => {
                    warn!("Skipping {error}");
                    continue;
                }
            }
        };

        graph.add_edge(from, to, ());
    }

    Ok(graph)
}
