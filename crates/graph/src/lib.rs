//! Node-link graph helpers for the lineage editor
//!
//! This crate works on the nodes and edges of a graph editor document:
//!
//! - [`layout_elements`] positions every node with a layered layout and sets
//!   the sides its edges attach to
//! - [`descendants`] and [`ancestors`] walk the edges from a node, to decide
//!   which nodes to hide or highlight
//!
//! Both are pure functions over borrowed data, the caller keeps ownership of
//! its nodes and edges.
//!
//! # Example
//!
//! ```
//! use linaje_graph::{ancestors, descendants, layout_elements, Edge, LayoutConfig, Node, Position};
//!
//! let nodes = vec![Node::new("a", ()), Node::new("b", ()), Node::new("c", ())];
//! let edges = vec![Edge::new("a", "b"), Edge::new("b", "c")];
//!
//! let layouted = layout_elements(&nodes, &edges, &LayoutConfig::default()).unwrap();
//! assert_eq!(layouted.nodes[0].target_position, Some(Position::Left));
//! assert!(layouted.nodes[0].position.x < layouted.nodes[1].position.x);
//!
//! assert_eq!(descendants("a", &edges), vec!["b", "c"]);
//! assert_eq!(ancestors("c", &edges), vec!["b", "a"]);
//! ```

mod config;
mod error;
mod layout;
mod model;
mod reach;

pub use config::{DanglingEdgePolicy, LayoutConfig, NODE_HEIGHT, NODE_SEP, NODE_WIDTH, RANK_SEP};
pub use error::{GraphError, GraphResult};
pub use layout::{anchor_sides, layout_elements, layout_elements_with, Layouted};
pub use model::{Edge, GraphDocument, Node, Position, XYPosition};
pub use reach::{ancestors, descendants, hidden_nodes, EdgeIndex, Walk};

// Re-export the layout engine types used in the configuration
pub use linaje_layout::{CyclePolicy, LayoutEngine, RankDir, Vec2};
