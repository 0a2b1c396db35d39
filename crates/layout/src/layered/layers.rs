use super::LayeredLayoutError;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Assign each node of an acyclic graph to a layer
///
/// Uses a two-pass approach to keep edges short:
/// - First pass: longest path, each node goes one layer after its deepest
///   predecessor, sources land in layer 0
/// - Second pass: nodes with successors are pulled down next to them
///
/// Within a layer nodes keep the insertion order of the graph, which gives
/// the crossing minimization a deterministic starting point.
pub(crate) fn assign_layers<N>(
    graph: &DiGraphMap<N, ()>,
) -> Result<Vec<Vec<N>>, LayeredLayoutError<N>>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    if graph.node_count() == 0 {
        return Ok(Vec::new());
    }

    let topo_order =
        toposort(graph, None).map_err(|cycle| LayeredLayoutError::GraphHasCycle(cycle.node_id()))?;
    let mut layer_map: HashMap<N, usize> = HashMap::with_capacity(topo_order.len());

    for &node in &topo_order {
        let layer = graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|pred| layer_map[&pred] + 1)
            .max()
            .unwrap_or(0);
        layer_map.insert(node, layer);
    }

    for &node in topo_order.iter().rev() {
        let layer = layer_map[&node];
        let Some(min_succ_layer) = graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|succ| layer_map[&succ])
            .min()
        else {
            continue;
        };

        if min_succ_layer > layer + 1 {
            layer_map.insert(node, min_succ_layer - 1);
        }
    }

    let layer_count = layer_map.values().max().map_or(0, |max| max + 1);
    let mut layers = vec![Vec::new(); layer_count];
    for node in graph.nodes() {
        layers[layer_map[&node]].push(node);
    }

    Ok(layers)
}
