//! Build order command

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use trellis_core::{build_order_with, CyclePolicy, VertexId};

use super::{invalid_graph, GraphInput};
use crate::output::{print_output, Table, Tabular};
use crate::AppContext;

#[derive(Args)]
pub struct OrderArgs {
    #[command(flatten)]
    pub input: GraphInput,

    /// Return an order even when the graph has cycles
    #[arg(long)]
    pub permissive: bool,
}

#[derive(Serialize)]
struct OrderOutput {
    policy: CyclePolicy,
    order: Vec<VertexId>,
}

impl Tabular for OrderOutput {
    fn render_table(&self) -> String {
        let mut table = Table::new(["step", "vertex"])
            .with_title(format!("Build order ({} vertices)", self.order.len()));
        for (step, vertex) in self.order.iter().enumerate() {
            table.add_row([(step + 1).to_string(), vertex.to_string()]);
        }
        table.render()
    }
}

pub fn run(args: &OrderArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let policy = if args.permissive {
        CyclePolicy::Permissive
    } else {
        ctx.config.cycle_policy
    };
    tracing::debug!("Computing build order with cycle policy {}", policy);

    let text = args.input.read()?;
    let order = build_order_with(&text, policy).with_context(|| invalid_graph(&args.input.file))?;

    print_output(&OrderOutput { policy, order }, ctx.format)
}
