use linaje_layout::{CyclePolicy, LayeredLayout, RankDir, Vec2};
use serde::{Deserialize, Serialize};

/// Width given to every node during layout
pub const NODE_WIDTH: f32 = 280.0;

/// Height given to every node during layout
pub const NODE_HEIGHT: f32 = 60.0;

/// Distance between two successive layers, leaves room for long edge labels
pub const RANK_SEP: f32 = 250.0;

/// Distance between two nodes of the same layer
pub const NODE_SEP: f32 = 20.0;

/// What to do with edges whose source or target is not in the node list
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingEdgePolicy {
    /// Leave the edge out of the layout and log a warning
    #[default]
    Skip,
    /// Fail with [`crate::GraphError::DanglingEdge`]
    Reject,
}

/// Layout settings
///
/// Every node is laid out with the same `node_size`, whatever its rendered
/// size, so that nodes with different content still line up.
///
/// Deserializes from partial documents, missing fields take their default
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: RankDir,
    pub node_size: Vec2,
    pub rank_sep: f32,
    pub node_sep: f32,
    pub dangling_edges: DanglingEdgePolicy,
    pub cycles: CyclePolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: RankDir::LeftRight,
            node_size: Vec2::new(NODE_WIDTH, NODE_HEIGHT),
            rank_sep: RANK_SEP,
            node_sep: NODE_SEP,
            dangling_edges: DanglingEdgePolicy::Skip,
            cycles: CyclePolicy::Reverse,
        }
    }
}

impl LayoutConfig {
    pub fn with_direction(self, direction: RankDir) -> Self {
        Self { direction, ..self }
    }

    /// Build the layered layout engine for these settings
    pub fn engine(&self) -> LayeredLayout {
        LayeredLayout::new(self.direction, self.rank_sep, self.node_sep).with_cycles(self.cycles)
    }
}
