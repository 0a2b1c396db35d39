use super::{CyclePolicy, LayeredLayoutError};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{depth_first_search, DfsEvent};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use tracing::trace;

/// Build an acyclic copy of the graph
///
/// Self loops never constrain the layering and are dropped. Back edges found
/// by a depth first search (started from the nodes in insertion order) are
/// either reversed or reported, depending on the policy. Reversing every back
/// edge of a DFS is enough to make the graph acyclic.
///
/// Returns the acyclic graph along with the edges that were reversed.
pub(crate) fn make_acyclic<N>(
    graph: &DiGraphMap<N, ()>,
    policy: CyclePolicy,
) -> Result<(DiGraphMap<N, ()>, Vec<(N, N)>), LayeredLayoutError<N>>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    let mut back_edges = Vec::new();
    depth_first_search(graph, graph.nodes(), |event| {
        if let DfsEvent::BackEdge(from, to) = event {
            if from != to {
                back_edges.push((from, to));
            }
        }
    });

    if let (CyclePolicy::Reject, Some(&(_, to))) = (policy, back_edges.first()) {
        return Err(LayeredLayoutError::GraphHasCycle(to));
    }

    let reversed: HashSet<(N, N)> = back_edges.iter().copied().collect();

    let mut acyclic = DiGraphMap::with_capacity(graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        acyclic.add_node(node);
    }
    for (from, to, _) in graph.all_edges() {
        if from == to {
            continue;
        }

        if reversed.contains(&(from, to)) {
            trace!("Reversing back edge {from:?} -> {to:?}");
            acyclic.add_edge(to, from, ());
        } else {
            acyclic.add_edge(from, to, ());
        }
    }

    Ok((acyclic, back_edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::is_cyclic_directed;
    use test_log::test;

    #[test]
    fn dag_is_unchanged() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (1, 3), (2, 3)]);
        let (acyclic, reversed) = make_acyclic(&graph, CyclePolicy::Reject).unwrap();

        assert!(reversed.is_empty());
        assert_eq!(acyclic.edge_count(), 3);
        assert!(acyclic.contains_edge(2, 3));
    }

    #[test]
    fn nested_cycles_are_broken() {
        let graph =
            DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (3, 1), (3, 4), (4, 2), (4, 4)]);
        let (acyclic, reversed) = make_acyclic(&graph, CyclePolicy::Reverse).unwrap();

        assert!(!is_cyclic_directed(&acyclic));
        assert_eq!(reversed.len(), 2);
        assert_eq!(acyclic.node_count(), 4);
        assert!(!acyclic.contains_edge(4, 4));
    }

    #[test]
    fn two_cycle_collapses_into_one_edge() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 1)]);
        let (acyclic, reversed) = make_acyclic(&graph, CyclePolicy::Reverse).unwrap();

        assert_eq!(reversed, vec![(2, 1)]);
        assert_eq!(acyclic.edge_count(), 1);
        assert!(acyclic.contains_edge(1, 2));
    }
}
