//! Breadth-first and depth-first traversal commands

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use trellis_core::{bfs_tree, dfs_forest, dfs_tree, SearchTree, VertexId};

use super::{invalid_graph, GraphInput};
use crate::output::{join_path, print_output, vertex_cell, Table, Tabular};
use crate::AppContext;

#[derive(Args)]
pub struct BfsArgs {
    #[command(flatten)]
    pub input: GraphInput,

    /// Start vertex
    #[arg(short, long, default_value = "0")]
    pub start: VertexId,
}

#[derive(Args)]
pub struct DfsArgs {
    #[command(flatten)]
    pub input: GraphInput,

    /// Start vertex
    #[arg(short, long, default_value = "0", conflicts_with = "all")]
    pub start: VertexId,

    /// Search from every undiscovered vertex and print the whole forest
    #[arg(long)]
    pub all: bool,
}

#[derive(Serialize)]
struct TraversalOutput {
    algorithm: &'static str,
    /// `None` for a full forest
    start: Option<VertexId>,
    parents: Vec<Option<VertexId>>,
    #[serde(skip)]
    tree: Option<SearchTree>,
}

impl Tabular for TraversalOutput {
    fn render_table(&self) -> String {
        let title = match (&self.tree, self.start) {
            (Some(tree), Some(start)) => format!(
                "{} from {}: reached {} of {} vertices",
                self.algorithm.to_uppercase(),
                start,
                tree.reached_count(),
                self.parents.len()
            ),
            _ => format!(
                "{} forest over {} vertices",
                self.algorithm.to_uppercase(),
                self.parents.len()
            ),
        };

        let mut table = match &self.tree {
            Some(_) => Table::new(["vertex", "parent", "depth", "path"]),
            None => Table::new(["vertex", "parent"]),
        }
        .with_title(title);

        for (vertex, parent) in self.parents.iter().enumerate() {
            let mut row = vec![vertex.to_string(), vertex_cell(*parent)];
            if let Some(tree) = &self.tree {
                match tree.path_to(vertex) {
                    Some(path) => {
                        row.push((path.len() - 1).to_string());
                        row.push(join_path(&path));
                    }
                    None => {
                        row.push("-".to_string());
                        row.push("unreachable".to_string());
                    }
                }
            }
            table.add_row(row);
        }
        table.render()
    }
}

impl TraversalOutput {
    fn from_tree(algorithm: &'static str, tree: SearchTree) -> Self {
        Self {
            algorithm,
            start: Some(tree.start),
            parents: tree.parents.clone(),
            tree: Some(tree),
        }
    }
}

pub fn run_bfs(args: &BfsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let adjacency = args.input.adjacency()?;
    let tree = bfs_tree(&adjacency, args.start).with_context(|| invalid_graph(&args.input.file))?;
    tracing::info!("BFS from {} reached {} vertices", args.start, tree.reached_count());

    print_output(&TraversalOutput::from_tree("bfs", tree), ctx.format)
}

pub fn run_dfs(args: &DfsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let adjacency = args.input.adjacency()?;

    let output = if args.all {
        TraversalOutput {
            algorithm: "dfs",
            start: None,
            parents: dfs_forest(&adjacency),
            tree: None,
        }
    } else {
        let tree =
            dfs_tree(&adjacency, args.start).with_context(|| invalid_graph(&args.input.file))?;
        tracing::info!("DFS from {} reached {} vertices", args.start, tree.reached_count());
        TraversalOutput::from_tree("dfs", tree)
    };

    print_output(&output, ctx.format)
}
