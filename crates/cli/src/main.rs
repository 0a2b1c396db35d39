//! linaje - lays out and walks node-link graph documents
//!
//! Documents are read as JSON (`{ "nodes": [...], "edges": [...] }`) from a
//! file or stdin, results are written as JSON on stdout. Logs go to stderr,
//! filtered with `RUST_LOG`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use linaje_graph::{RankDir, Walk};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "linaje", author, version, about)]
struct Cli {
    /// RON file with layout settings, command line flags take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Graph document to read, stdin when omitted
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute node positions and print the laid out document
    Layout {
        /// Direction of the layers: TB, BT, LR or RL
        #[arg(short, long)]
        direction: Option<RankDir>,

        /// Distance between successive layers
        #[arg(long)]
        rank_sep: Option<f32>,

        /// Distance between nodes of the same layer
        #[arg(long)]
        node_sep: Option<f32>,

        /// Fail on edges referencing unknown nodes instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Print the ids of every node reachable from the given node
    Descendants {
        id: String,

        /// Only go that many edges away
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Print the ids of every node leading to the given node
    Ancestors {
        id: String,

        /// Only go that many edges away
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Print the ids of the nodes hidden by collapsing the given nodes
    Hidden {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let document = commands::read_document(cli.input.as_deref())?;
    debug!(
        "Read {} nodes and {} edges",
        document.nodes.len(),
        document.edges.len()
    );

    let output = match cli.command {
        Command::Layout {
            direction,
            rank_sep,
            node_sep,
            strict,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            let config = commands::LayoutOverrides {
                direction,
                rank_sep,
                node_sep,
                strict,
            }
            .apply(config);
            commands::layout(&document, &config)?
        }
        Command::Descendants { id, depth } => {
            commands::walk(&document, &id, Walk::Down, depth)?
        }
        Command::Ancestors { id, depth } => commands::walk(&document, &id, Walk::Up, depth)?,
        Command::Hidden { ids } => commands::hidden(&document, &ids)?,
    };

    println!("{output}");
    Ok(())
}
