use anyhow::{Context, Result};
use linaje_graph::{
    hidden_nodes, layout_elements, DanglingEdgePolicy, EdgeIndex, GraphDocument, LayoutConfig,
    RankDir, Walk,
};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Layout settings given on the command line
pub struct LayoutOverrides {
    pub direction: Option<RankDir>,
    pub rank_sep: Option<f32>,
    pub node_sep: Option<f32>,
    pub strict: bool,
}

impl LayoutOverrides {
    pub fn apply(self, mut config: LayoutConfig) -> LayoutConfig {
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if let Some(rank_sep) = self.rank_sep {
            config.rank_sep = rank_sep;
        }
        if let Some(node_sep) = self.node_sep {
            config.node_sep = node_sep;
        }
        if self.strict {
            config.dangling_edges = DanglingEdgePolicy::Reject;
        }
        config
    }
}

/// Load the layout settings, defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: LayoutConfig = ron::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    debug!("Loaded {config:?} from {}", path.display());
    Ok(config)
}

/// Read a graph document from a file, or stdin
pub fn read_document(path: Option<&Path>) -> Result<GraphDocument> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    serde_json::from_str(&text).context("Failed to parse graph document")
}

pub fn layout(document: &GraphDocument, config: &LayoutConfig) -> Result<String> {
    let layouted = layout_elements(&document.nodes, &document.edges, config)?;
    Ok(serde_json::to_string_pretty(&layouted)?)
}

pub fn walk(document: &GraphDocument, id: &str, walk: Walk, depth: Option<usize>) -> Result<String> {
    warn_if_unknown(document, id);
    let ids = EdgeIndex::new(&document.edges).walk(id, walk, depth);
    Ok(serde_json::to_string_pretty(&ids)?)
}

pub fn hidden(document: &GraphDocument, ids: &[String]) -> Result<String> {
    for id in ids {
        warn_if_unknown(document, id);
    }
    let hidden = hidden_nodes(ids.iter().map(String::as_str), &document.edges);
    Ok(serde_json::to_string_pretty(&hidden)?)
}

fn warn_if_unknown(document: &GraphDocument, id: &str) {
    if !document.nodes.iter().any(|node| node.id == id) {
        warn!("Node {id:?} is not part of the document");
    }
}
