//! Inspect command

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use trellis_core::{
    build_adjacency_list, build_adjacency_matrix, GraphDescriptor, Neighbor, Parser,
};

use super::{invalid_graph, GraphInput};
use crate::output::{print_output, Table, Tabular};
use crate::AppContext;

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: GraphInput,

    /// Reject edge lines of a weighted graph that omit the weight
    #[arg(long)]
    pub strict: bool,

    /// Also show the dense adjacency matrix
    #[arg(long)]
    pub matrix: bool,
}

#[derive(Serialize)]
struct InspectOutput {
    descriptor: GraphDescriptor,
    edge_count: usize,
    arc_count: usize,
    adjacency: Vec<Vec<Neighbor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<Vec<Vec<Option<i64>>>>,
}

impl Tabular for InspectOutput {
    fn render_table(&self) -> String {
        let d = &self.descriptor;
        let title = format!(
            "{} {} graph: {} vertices, {} edges",
            if d.directed { "Directed" } else { "Undirected" },
            if d.weighted { "weighted" } else { "unweighted" },
            d.vertex_count,
            self.edge_count
        );

        let mut table = Table::new(["vertex", "neighbors"]).with_title(title);
        for (vertex, arcs) in self.adjacency.iter().enumerate() {
            let neighbors: Vec<String> = arcs
                .iter()
                .map(|arc| match arc.weight.value() {
                    Some(w) => format!("{}:{}", arc.vertex, w),
                    None => arc.vertex.to_string(),
                })
                .collect();
            table.add_row([vertex.to_string(), neighbors.join(" ")]);
        }

        let mut rendered = table.render();
        if let Some(matrix) = &self.matrix {
            let mut grid = Table::new(
                std::iter::once(String::new()).chain((0..matrix.len()).map(|v| v.to_string())),
            );
            for (vertex, row) in matrix.iter().enumerate() {
                grid.add_row(std::iter::once(vertex.to_string()).chain(
                    row.iter()
                        .map(|cell| cell.map_or_else(|| ".".to_string(), |w| w.to_string())),
                ));
            }
            rendered.push_str("\n\n");
            rendered.push_str(&grid.render());
        }
        rendered
    }
}

pub fn run(args: &InspectArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let text = args.input.read()?;
    let parser = Parser::new().require_weights(args.strict);
    let (descriptor, edges) = parser
        .parse(&text)
        .with_context(|| invalid_graph(&args.input.file))?;

    let adjacency = build_adjacency_list(&descriptor, &edges)?;
    tracing::info!(
        "Inspecting graph with {} vertices and {} edges",
        descriptor.vertex_count,
        edges.len()
    );

    let matrix = if args.matrix {
        Some(build_adjacency_matrix(&descriptor, &edges)?.to_rows())
    } else {
        None
    };

    let output = InspectOutput {
        descriptor,
        edge_count: edges.len(),
        arc_count: adjacency.arc_count(),
        adjacency: adjacency
            .iter()
            .map(|(_, arcs)| arcs.to_vec())
            .collect(),
        matrix,
    };

    print_output(&output, ctx.format)
}
