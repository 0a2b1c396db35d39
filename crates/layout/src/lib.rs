//! Layered graph layout
//!
//! This crate computes node positions for directed graphs stored in a
//! petgraph [`DiGraphMap`](petgraph::graphmap::DiGraphMap), keyed by any
//! copyable node identifier.
//!
//! # Layout Engines
//!
//! - [`LayeredLayout`]: Sugiyama-style layered layout. Cycles are broken by
//!   reversing back edges, layers are ordered to reduce edge crossings and
//!   nodes are placed with configurable rank and node separation, in any of
//!   the four [`RankDir`] directions.
//!
//! Engines report the center of every node, callers wanting another anchor
//! subtract half the node size.
//!
//! # Example
//!
//! ```
//! use linaje_layout::{LayeredLayout, LayoutEngine, RankDir, Vec2};
//! use petgraph::graphmap::DiGraphMap;
//!
//! // Create a graph
//! let mut graph = DiGraphMap::new();
//! graph.add_edge(1, 2, ());
//! graph.add_edge(2, 3, ());
//!
//! // Create a layout engine, layers going left to right
//! let engine = LayeredLayout::new(RankDir::LeftRight, 50.0, 20.0);
//!
//! // Every node has the same size
//! let sizes = Vec2::new(100.0, 40.0);
//!
//! // Use the LayoutEngine trait (simple, single-phase):
//! let centers = engine.layout(&graph, &sizes).unwrap();
//! assert!(centers[&1].x < centers[&2].x);
//!
//! // Or directly by calling each step, the layers can be cached while
//! // node sizes change
//! let layers = engine.compute_layers(&graph).unwrap();
//! let centers = engine.compute_positions(&layers, &|_node: i32| Vec2::new(80.0, 20.0)).unwrap();
//! assert_eq!(centers[&1].y, 10.0);
//! ```

mod direction;
mod engine;
mod geometry;
mod sizes;

pub mod layered;

pub use direction::{ParseRankDirError, RankDir};
pub use engine::LayoutEngine;
pub use geometry::{Point, Vec2};
pub use sizes::NodeSizes;

pub use layered::{CyclePolicy, LayeredLayout, LayeredLayoutError, Layers};
