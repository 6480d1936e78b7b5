//! Shortest path commands

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use trellis_core::{
    dijkstra, dijkstra_cancellable, floyd, floyd_cancellable,
    negative_cycle_vertices, try_build_distance_matrix, Distance, DistanceMatrix, Error,
    ShortestPathTree, VertexId,
};

use super::{invalid_graph, with_time_limit, GraphInput};
use crate::output::{join_path, print_output, vertex_cell, Table, Tabular};
use crate::AppContext;

#[derive(Args)]
pub struct DijkstraArgs {
    #[command(flatten)]
    pub input: GraphInput,

    /// Start vertex
    #[arg(short, long, default_value = "0")]
    pub start: VertexId,

    /// Give up after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,
}

#[derive(Args)]
pub struct FloydArgs {
    #[command(flatten)]
    pub input: GraphInput,

    /// Fail if the graph has a negative cycle
    #[arg(long)]
    pub check_negative_cycles: bool,

    /// Give up after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,
}

#[derive(Serialize)]
struct DijkstraOutput {
    algorithm: &'static str,
    #[serde(flatten)]
    tree: ShortestPathTree,
}

impl Tabular for DijkstraOutput {
    fn render_table(&self) -> String {
        let mut table = Table::new(["vertex", "distance", "parent", "path"])
            .with_title(format!("Shortest paths from {}", self.tree.tree.start));

        for (vertex, distance) in self.tree.distances.iter().enumerate() {
            let path = self
                .tree
                .path_to(vertex)
                .map_or_else(|| "unreachable".to_string(), |p| join_path(&p));
            table.add_row([
                vertex.to_string(),
                distance.to_string(),
                vertex_cell(self.tree.parents()[vertex]),
                path,
            ]);
        }
        table.render()
    }
}

#[derive(Serialize)]
struct FloydOutput {
    matrix: DistanceMatrix,
    /// Vertices on a negative cycle; distances are not meaningful if non-empty
    negative_cycle: Vec<VertexId>,
}

impl Tabular for FloydOutput {
    fn render_table(&self) -> String {
        let n = self.matrix.size();
        let mut table =
            Table::new(std::iter::once(String::new()).chain((0..n).map(|v| v.to_string())))
                .with_title(format!("All-pairs shortest distances ({} vertices)", n));

        for (vertex, row) in self.matrix.rows().enumerate() {
            table.add_row(
                std::iter::once(vertex.to_string()).chain(row.iter().map(Distance::to_string)),
            );
        }

        let mut rendered = table.render();
        if !self.negative_cycle.is_empty() {
            rendered.push_str(&format!(
                "\nNegative cycle through vertices: {}",
                self.negative_cycle
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        rendered
    }
}

pub fn run_dijkstra(args: &DijkstraArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let adjacency = args.input.adjacency()?;
    let time_limit = args.time_limit_ms.or(ctx.config.time_limit_ms);

    let tree = match time_limit {
        Some(ms) => with_time_limit(ms, |token| dijkstra_cancellable(&adjacency, args.start, token)),
        None => dijkstra(&adjacency, args.start),
    }
    .with_context(|| invalid_graph(&args.input.file))?;

    let reached = tree.distances.iter().filter(|d| d.is_finite()).count();
    tracing::info!("Dijkstra from {} reached {} vertices", args.start, reached);

    let output = DijkstraOutput {
        algorithm: "dijkstra",
        tree,
    };
    print_output(&output, ctx.format)
}

pub fn run_floyd(args: &FloydArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let adjacency = args.input.adjacency()?;
    let time_limit = args.time_limit_ms.or(ctx.config.time_limit_ms);
    let check = args.check_negative_cycles || ctx.config.check_negative_cycles;

    let initial = try_build_distance_matrix(&adjacency)?;
    let relaxed = match time_limit {
        Some(ms) => with_time_limit(ms, |token| floyd_cancellable(&initial, token))
            .with_context(|| invalid_graph(&args.input.file))?,
        None => floyd(&initial),
    };

    let negative_cycle = negative_cycle_vertices(&relaxed);
    if let Some(&vertex) = negative_cycle.first() {
        if check {
            return Err(Error::NegativeCycle { vertex })
                .with_context(|| invalid_graph(&args.input.file));
        }
        tracing::warn!(
            "Graph has a negative cycle through {} vertices; distances are not meaningful",
            negative_cycle.len()
        );
    }

    let output = FloydOutput {
        matrix: relaxed,
        negative_cycle,
    };
    print_output(&output, ctx.format)
}
