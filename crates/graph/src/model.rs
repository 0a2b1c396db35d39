use derive_more::{Constructor, Display};
use linaje_layout::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// The field names and casing follow the node/edge format of the graph
// editor, fields we don't know about are kept in `extra` so that documents
// go through unchanged.

/// Side of a node where an edge endpoint is attached
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[display("left")]
    Left,
    #[display("top")]
    Top,
    #[display("right")]
    Right,
    #[display("bottom")]
    Bottom,
}

/// Top-left corner of a node
#[derive(Debug, PartialEq, Copy, Clone, Default, Serialize, Deserialize, Constructor)]
pub struct XYPosition {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for XYPosition {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node<D = Value> {
    pub id: String,

    #[serde(default)]
    pub position: XYPosition,

    pub data: D,

    /// Measured size, as reported by the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,

    /// Side where outgoing edges start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_position: Option<Position>,

    /// Side where incoming edges end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<Position>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<D> Node<D> {
    pub fn new(id: impl Into<String>, data: D) -> Self {
        Self {
            id: id.into(),
            position: XYPosition::default(),
            data,
            width: None,
            height: None,
            source_position: None,
            target_position: None,
            extra: Map::new(),
        }
    }
}

/// A directed connection between two nodes
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    pub id: String,

    pub source: String,

    pub target: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();

        Self {
            id: format!("e{source}-{target}"),
            source,
            target,
            extra: Map::new(),
        }
    }
}

/// Nodes and edges of a graph, as exchanged with the editor
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GraphDocument<D = Value> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Node<D>>,

    #[serde(default)]
    pub edges: Vec<Edge>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_log::test;

    #[test]
    fn node_uses_editor_field_names() {
        let mut node = Node::new("a", json!({ "label": "A" }));
        node.source_position = Some(Position::Right);
        node.target_position = Some(Position::Left);

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "id": "a",
                "position": { "x": 0.0, "y": 0.0 },
                "data": { "label": "A" },
                "sourcePosition": "right",
                "targetPosition": "left",
            })
        );
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let input = json!({
            "id": "a",
            "type": "custom",
            "data": {},
            "position": { "x": 1.0, "y": 2.0 },
            "selected": true,
        });

        let node: Node = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(node.position, XYPosition::new(1.0, 2.0));
        assert_eq!(node.extra["type"], json!("custom"));
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn edge_id_is_optional() {
        let edge: Edge = serde_json::from_value(json!({
            "source": "a",
            "target": "b",
            "animated": true,
        }))
        .unwrap();

        assert_eq!(edge.id, "");
        assert_eq!(edge.source, "a");
        assert_eq!(edge.extra["animated"], json!(true));
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::Left.to_string(), "left");
        assert_eq!(Position::Bottom.to_string(), "bottom");
    }
}
