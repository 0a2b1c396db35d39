//! Ancestors and descendants of a node
//!
//! Walks are breadth first with a visited set, so they terminate on cyclic
//! graphs and visit every node and edge at most once. Results are
//! deduplicated, in the order nodes are first reached, and never contain the
//! node the walk started from, even when a cycle leads back to it.

use crate::Edge;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::trace;

/// Direction of a walk along the edges
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Walk {
    /// From source to target, towards descendants
    Down,
    /// From target to source, towards ancestors
    Up,
}

/// Adjacency of an edge list, for repeated walks over the same edges
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex<'a> {
    children: HashMap<&'a str, Vec<&'a str>>,
    parents: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> EdgeIndex<'a> {
    pub fn new(edges: &'a [Edge]) -> Self {
        let mut index = Self::default();
        for edge in edges {
            index
                .children
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
            index
                .parents
                .entry(edge.target.as_str())
                .or_default()
                .push(edge.source.as_str());
        }
        index
    }

    fn neighbors(&self, node: &str, walk: Walk) -> &[&'a str] {
        let adjacency = match walk {
            Walk::Down => &self.children,
            Walk::Up => &self.parents,
        };
        adjacency.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ids reachable from `start` in the given direction
    ///
    /// With `max_depth`, only nodes at most that many edges away are
    /// returned, `None` walks the whole graph.
    pub fn walk(&self, start: &str, walk: Walk, max_depth: Option<usize>) -> Vec<String> {
        let max_depth = max_depth.unwrap_or(usize::MAX);
        let mut result = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(start, 0)]);

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }

            for &neighbor in self.neighbors(current, walk) {
                if visited.insert(neighbor) {
                    trace!("Reached {neighbor} from {current} at depth {}", depth + 1);
                    result.push(neighbor.to_string());
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }

        result
    }

    /// Every node reachable by following edges from source to target
    pub fn descendants(&self, node_id: &str) -> Vec<String> {
        self.walk(node_id, Walk::Down, None)
    }

    /// Every node reachable by following edges from target to source
    pub fn ancestors(&self, node_id: &str) -> Vec<String> {
        self.walk(node_id, Walk::Up, None)
    }
}

/// Every node reachable by following edges from source to target
pub fn descendants(node_id: &str, edges: &[Edge]) -> Vec<String> {
    EdgeIndex::new(edges).descendants(node_id)
}

/// Every node reachable by following edges from target to source
pub fn ancestors(node_id: &str, edges: &[Edge]) -> Vec<String> {
    EdgeIndex::new(edges).ancestors(node_id)
}

/// Nodes hidden when the given nodes are collapsed
///
/// This is the union of their descendants. A collapsed node is part of the
/// result only when it descends from another collapsed node.
pub fn hidden_nodes<'i>(collapsed: impl IntoIterator<Item = &'i str>, edges: &[Edge]) -> Vec<String> {
    let index = EdgeIndex::new(edges);
    let mut seen = HashSet::new();

    collapsed
        .into_iter()
        .flat_map(|node_id| index.descendants(node_id))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
        pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
    }

    fn sorted(mut ids: Vec<String>) -> Vec<String> {
        ids.sort();
        ids
    }

    #[test]
    fn chain() {
        let edges = edges(&[("a", "b"), ("b", "c")]);

        assert_eq!(descendants("a", &edges), vec!["b", "c"]);
        assert_eq!(ancestors("c", &edges), vec!["b", "a"]);
        assert_eq!(descendants("b", &edges), vec!["c"]);
        assert_eq!(ancestors("b", &edges), vec!["a"]);
    }

    #[test]
    fn leaves_and_roots() {
        let edges = edges(&[("a", "b"), ("b", "c")]);

        assert!(descendants("c", &edges).is_empty());
        assert!(ancestors("a", &edges).is_empty());
    }

    #[test]
    fn trivial_inputs() {
        assert!(descendants("a", &[]).is_empty());
        assert!(ancestors("a", &[]).is_empty());

        let edges = edges(&[("a", "b")]);
        assert!(descendants("unknown", &edges).is_empty());
        assert!(ancestors("unknown", &edges).is_empty());
    }

    #[test]
    fn cycle_terminates() {
        let edges = edges(&[("a", "b"), ("b", "a")]);

        assert_eq!(descendants("a", &edges), vec!["b"]);
        assert_eq!(ancestors("a", &edges), vec!["b"]);
    }

    #[test]
    fn self_loop() {
        let edges = edges(&[("a", "a"), ("a", "b")]);
        assert_eq!(descendants("a", &edges), vec!["b"]);
    }

    #[test]
    fn diamond_is_deduplicated() {
        let edges = edges(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);

        assert_eq!(descendants("a", &edges), vec!["b", "c", "d"]);
        assert_eq!(ancestors("d", &edges), vec!["b", "c", "a"]);
    }

    #[test]
    fn parallel_edges() {
        let edges = edges(&[("a", "b"), ("a", "b"), ("b", "c")]);
        assert_eq!(descendants("a", &edges), vec!["b", "c"]);
    }

    #[test]
    fn depth_limit() {
        let edges = edges(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")]);
        let index = EdgeIndex::new(&edges);

        assert_eq!(index.walk("a", Walk::Down, Some(2)), vec!["b", "c"]);
        assert_eq!(index.walk("e", Walk::Up, Some(1)), vec!["d"]);
        assert!(index.walk("a", Walk::Down, Some(0)).is_empty());
        assert_eq!(index.walk("a", Walk::Down, None).len(), 4);
    }

    #[test]
    fn index_answers_both_directions() {
        let edges = edges(&[("root", "x"), ("root", "y"), ("x", "z"), ("w", "z")]);
        let index = EdgeIndex::new(&edges);

        assert_eq!(sorted(index.descendants("root")), vec!["x", "y", "z"]);
        assert_eq!(sorted(index.ancestors("z")), vec!["root", "w", "x"]);
    }

    #[test]
    fn hidden_nodes_merge_collapsed_subtrees() {
        let edges = edges(&[("a", "b"), ("b", "c"), ("x", "c"), ("x", "y")]);

        assert_eq!(hidden_nodes(["a", "x"], &edges), vec!["b", "c", "y"]);
        // "b" is hidden by collapsing "a"
        assert_eq!(hidden_nodes(["b", "a"], &edges), vec!["c", "b"]);
        assert!(hidden_nodes([], &edges).is_empty());
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let ids: Vec<String> = (0..10_000).map(|i| i.to_string()).collect();
        let edges: Vec<Edge> = ids.windows(2).map(|w| Edge::new(&w[0], &w[1])).collect();

        assert_eq!(descendants("0", &edges).len(), 9_999);
        assert_eq!(ancestors("9999", &edges).len(), 9_999);
    }
}
