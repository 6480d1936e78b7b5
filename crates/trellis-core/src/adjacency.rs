//! Adjacency list representation shared by every algorithm

use crate::error::{Error, Result};
use crate::limits::validate_vertex_count;
use crate::parse::{parse, Edge, GraphDescriptor, VertexId, Weight};
use serde::{Deserialize, Serialize};

/// One outgoing arc in an adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub vertex: VertexId,
    pub weight: Weight,
}

impl Neighbor {
    pub fn new(vertex: VertexId, weight: Weight) -> Self {
        Self { vertex, weight }
    }
}

/// Per-vertex ordered lists of outgoing arcs
///
/// The representation always stores directed arcs. An undirected edge is
/// inserted once in each endpoint's list at construction time.
///
/// Deserialized lists go through the same checks as
/// [`build_adjacency_list`]: one list per vertex and every neighbor in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAdjacency")]
pub struct AdjacencyList {
    descriptor: GraphDescriptor,
    lists: Vec<Vec<Neighbor>>,
}

/// Unchecked serialized form of an [`AdjacencyList`]
#[derive(Deserialize)]
struct RawAdjacency {
    descriptor: GraphDescriptor,
    lists: Vec<Vec<Neighbor>>,
}

impl TryFrom<RawAdjacency> for AdjacencyList {
    type Error = Error;

    fn try_from(raw: RawAdjacency) -> Result<Self> {
        let RawAdjacency { descriptor, lists } = raw;
        validate_vertex_count(descriptor.vertex_count)?;

        if lists.len() != descriptor.vertex_count {
            return Err(Error::ListCountMismatch {
                lists: lists.len(),
                vertex_count: descriptor.vertex_count,
            });
        }

        if let Some(arc) = lists.iter().flatten().find(|arc| !descriptor.contains(arc.vertex)) {
            return Err(Error::VertexOutOfRange {
                vertex: arc.vertex,
                vertex_count: descriptor.vertex_count,
            });
        }

        Ok(Self { descriptor, lists })
    }
}

impl AdjacencyList {
    /// Parse a graph description and build its adjacency list
    pub fn from_text(text: &str) -> Result<Self> {
        let (descriptor, edges) = parse(text)?;
        build_adjacency_list(&descriptor, &edges)
    }

    pub fn descriptor(&self) -> &GraphDescriptor {
        &self.descriptor
    }

    pub fn vertex_count(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn is_directed(&self) -> bool {
        self.descriptor.directed
    }

    /// Number of stored arcs (twice the edge count for undirected graphs)
    pub fn arc_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Outgoing arcs of `vertex` in declaration order
    ///
    /// Panics if `vertex` is out of range.
    pub fn neighbors(&self, vertex: VertexId) -> &[Neighbor] {
        &self.lists[vertex]
    }

    /// Iterate `(vertex, arcs)` pairs in ascending vertex order
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &[Neighbor])> {
        self.lists
            .iter()
            .enumerate()
            .map(|(v, arcs)| (v, arcs.as_slice()))
    }

    /// All arcs as `(from, neighbor)` pairs
    pub fn arcs(&self) -> impl Iterator<Item = (VertexId, &Neighbor)> {
        self.iter()
            .flat_map(|(from, arcs)| arcs.iter().map(move |arc| (from, arc)))
    }

    /// Graph with every arc reversed
    ///
    /// Arcs into each vertex appear ordered by source vertex, then by their
    /// position in the source's list.
    pub fn transpose(&self) -> Self {
        let mut lists = vec![Vec::new(); self.lists.len()];
        for (from, arc) in self.arcs() {
            lists[arc.vertex].push(Neighbor::new(from, arc.weight));
        }
        Self {
            descriptor: self.descriptor,
            lists,
        }
    }

    /// Same arcs viewed as an undirected graph: each arc is mirrored
    pub(crate) fn symmetric_closure(descriptor: &GraphDescriptor, edges: &[Edge]) -> Result<Self> {
        let undirected = GraphDescriptor {
            directed: false,
            ..*descriptor
        };
        build_adjacency_list(&undirected, edges)
    }
}

/// Build an adjacency list from parsed edges
///
/// Weights are kept as given on weighted graphs (including absent weights);
/// unweighted graphs always store [`Weight::Absent`].
pub fn build_adjacency_list(descriptor: &GraphDescriptor, edges: &[Edge]) -> Result<AdjacencyList> {
    let n = descriptor.vertex_count;
    let mut lists: Vec<Vec<Neighbor>> = vec![Vec::new(); n];

    for edge in edges {
        for vertex in [edge.source, edge.target] {
            if !descriptor.contains(vertex) {
                return Err(Error::VertexOutOfRange {
                    vertex,
                    vertex_count: n,
                });
            }
        }

        let weight = if descriptor.weighted {
            edge.weight
        } else {
            Weight::Absent
        };

        lists[edge.source].push(Neighbor::new(edge.target, weight));
        if !descriptor.directed {
            lists[edge.target].push(Neighbor::new(edge.source, weight));
        }
    }

    tracing::trace!("Built adjacency list with {} vertices", n);

    Ok(AdjacencyList {
        descriptor: *descriptor,
        lists,
    })
}
