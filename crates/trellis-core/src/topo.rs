//! Topological ("build") ordering by depth-first postorder

use crate::adjacency::{build_adjacency_list, AdjacencyList};
use crate::error::{Error, Result};
use crate::parse::{parse, GraphDescriptor, VertexId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when the ordering walk meets a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Fail with [`Error::CycleDetected`]
    #[default]
    Reject,
    /// Ignore back edges and return the postorder anyway. On cyclic input the
    /// result is a permutation of the vertices but not a topological order.
    Permissive,
}

impl FromStr for CyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!(
                "unknown cycle policy '{}', expected 'reject' or 'permissive'",
                other
            )),
        }
    }
}

impl std::fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Processed,
}

/// Build order for a dependency graph description, rejecting cycles
///
/// Every edge line `u v` is read as the arc `u -> v` whatever the header's
/// direction flag says.
pub fn build_order(text: &str) -> Result<Vec<VertexId>> {
    build_order_with(text, CyclePolicy::default())
}

/// [`build_order`] with an explicit cycle policy
pub fn build_order_with(text: &str, policy: CyclePolicy) -> Result<Vec<VertexId>> {
    let (descriptor, edges) = parse(text)?;
    let directed = GraphDescriptor {
        directed: true,
        ..descriptor
    };
    let adjacency = build_adjacency_list(&directed, &edges)?;
    topological_order(&adjacency, policy)
}

/// Reverse depth-first postorder of an adjacency list
///
/// Walks start from each unvisited vertex in ascending id order. Within a
/// walk, arcs are followed in adjacency order, so among vertices with no
/// ordering constraint between them the result depends on declaration order.
pub fn topological_order(adjacency: &AdjacencyList, policy: CyclePolicy) -> Result<Vec<VertexId>> {
    let n = adjacency.vertex_count();
    let mut marks = vec![Mark::Unvisited; n];
    let mut order = Vec::with_capacity(n);
    let mut back_edges = 0usize;

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        marks[root] = Mark::InProgress;
        let mut stack: Vec<(VertexId, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (vertex, next) = *frame;
            let Some(arc) = adjacency.neighbors(vertex).get(next) else {
                marks[vertex] = Mark::Processed;
                order.push(vertex);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[arc.vertex] {
                Mark::Unvisited => {
                    marks[arc.vertex] = Mark::InProgress;
                    stack.push((arc.vertex, 0));
                }
                Mark::InProgress => {
                    back_edges += 1;
                    if policy == CyclePolicy::Reject {
                        let cycle = cycle_on_stack(&stack, arc.vertex);
                        tracing::debug!("Build order rejected cycle {:?}", cycle);
                        return Err(Error::CycleDetected { cycle });
                    }
                }
                Mark::Processed => {}
            }
        }
    }

    if back_edges > 0 {
        tracing::warn!(
            "Build order ignored {} back edge(s); result is not a topological order",
            back_edges
        );
    }

    order.reverse();
    Ok(order)
}

/// Vertices from `entry` to the top of the walk stack, closed back on `entry`
fn cycle_on_stack(stack: &[(VertexId, usize)], entry: VertexId) -> Vec<VertexId> {
    let from = stack
        .iter()
        .position(|&(vertex, _)| vertex == entry)
        .unwrap_or(0);
    let mut cycle: Vec<VertexId> = stack[from..].iter().map(|&(vertex, _)| vertex).collect();
    cycle.push(entry);
    cycle
}
