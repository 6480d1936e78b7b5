//! Connectivity commands

use std::collections::BTreeSet;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use trellis_core::{connected_components, is_strongly_connected, VertexId};

use super::{invalid_graph, GraphInput};
use crate::output::{print_output, Table, Tabular};
use crate::AppContext;

#[derive(Args)]
pub struct ComponentsArgs {
    #[command(flatten)]
    pub input: GraphInput,
}

#[derive(Args)]
pub struct StrongArgs {
    #[command(flatten)]
    pub input: GraphInput,
}

#[derive(Serialize)]
struct ComponentsOutput {
    count: usize,
    components: Vec<BTreeSet<VertexId>>,
}

impl Tabular for ComponentsOutput {
    fn render_table(&self) -> String {
        let mut table = Table::new(["component", "size", "vertices"])
            .with_title(format!("{} connected component(s)", self.count));
        for (idx, component) in self.components.iter().enumerate() {
            let vertices: Vec<String> = component.iter().map(ToString::to_string).collect();
            table.add_row([
                idx.to_string(),
                component.len().to_string(),
                vertices.join(" "),
            ]);
        }
        table.render()
    }
}

#[derive(Serialize)]
struct StrongOutput {
    vertex_count: usize,
    strongly_connected: bool,
}

impl Tabular for StrongOutput {
    fn render_table(&self) -> String {
        if self.strongly_connected {
            format!("Strongly connected ({} vertices)", self.vertex_count)
        } else {
            format!("Not strongly connected ({} vertices)", self.vertex_count)
        }
    }
}

pub fn run_components(args: &ComponentsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let text = args.input.read()?;
    let components =
        connected_components(&text).with_context(|| invalid_graph(&args.input.file))?;
    tracing::info!("Found {} connected components", components.len());

    let output = ComponentsOutput {
        count: components.len(),
        components,
    };
    print_output(&output, ctx.format)
}

pub fn run_strong(args: &StrongArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let adjacency = args.input.adjacency()?;
    if !adjacency.is_directed() {
        tracing::info!("Graph is undirected; strong connectivity equals connectivity");
    }

    let output = StrongOutput {
        vertex_count: adjacency.vertex_count(),
        strongly_connected: is_strongly_connected(&adjacency),
    };
    print_output(&output, ctx.format)
}
