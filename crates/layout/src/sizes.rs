use crate::Vec2;
use std::collections::HashMap;
use std::hash::Hash;

/// Provides node sizes to the layout engine
pub trait NodeSizes<N> {
    /// Get the size of a node
    fn size(&self, node: N) -> Vec2;
}

impl<N, F> NodeSizes<N> for F
where
    F: Fn(N) -> Vec2,
{
    fn size(&self, node: N) -> Vec2 {
        self(node)
    }
}

// Missing entries are laid out as points
impl<N: Eq + Hash + Copy> NodeSizes<N> for HashMap<N, Vec2> {
    fn size(&self, node: N) -> Vec2 {
        self.get(&node).copied().unwrap_or_default()
    }
}

/// A single vector gives every node the same size
impl<N> NodeSizes<N> for Vec2 {
    fn size(&self, _node: N) -> Vec2 {
        *self
    }
}
