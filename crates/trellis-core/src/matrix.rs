//! Dense matrix representations
//!
//! [`DistanceMatrix`] is the input and output of the all-pairs shortest path
//! algorithm. [`AdjacencyMatrix`] is a plain edge table built straight from
//! the parsed edges.

use crate::adjacency::AdjacencyList;
use crate::error::{Error, Result};
use crate::limits::validate_matrix_size;
use crate::parse::{Edge, GraphDescriptor, VertexId};
use serde::{Deserialize, Serialize, Serializer};
use std::ops::{Add, Index};

/// A path length that may be infinite
///
/// Every finite distance orders below [`Distance::Infinite`]. Adding anything
/// to `Infinite` yields `Infinite`, and finite sums saturate rather than
/// overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Distance {
    Finite(i64),
    Infinite,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0);

    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn finite(self) -> Option<i64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Infinite => None,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Self::Finite(d) if d < 0)
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a.saturating_add(b)),
            _ => Self::Infinite,
        }
    }
}

impl Add<i64> for Distance {
    type Output = Distance;

    fn add(self, rhs: i64) -> Distance {
        self + Self::Finite(rhs)
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{}", d),
            Self::Infinite => write!(f, "inf"),
        }
    }
}

/// Owned `n x n` table of distances, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Distance>,
}

impl DistanceMatrix {
    /// Matrix with a zero diagonal and every other entry infinite
    pub fn unconnected(size: usize) -> Self {
        let mut cells = vec![Distance::Infinite; size * size];
        for v in 0..size {
            cells[v * size + v] = Distance::ZERO;
        }
        Self { size, cells }
    }

    /// Build from explicit rows; every row must have `rows.len()` entries
    pub fn from_rows(rows: Vec<Vec<Distance>>) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != size {
                return Err(Error::NonSquareMatrix {
                    row,
                    len: entries.len(),
                    expected: size,
                });
            }
            cells.extend(entries);
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: VertexId, to: VertexId) -> Distance {
        self.cells[from * self.size + to]
    }

    pub fn set(&mut self, from: VertexId, to: VertexId, distance: Distance) {
        self.cells[from * self.size + to] = distance;
    }

    pub fn row(&self, from: VertexId) -> &[Distance] {
        &self.cells[from * self.size..(from + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> {
        // An empty matrix has no cells, so the chunk size never matters there
        self.cells.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<Distance>> {
        self.rows().map(<[Distance]>::to_vec).collect()
    }
}

impl Index<(VertexId, VertexId)> for DistanceMatrix {
    type Output = Distance;

    fn index(&self, (from, to): (VertexId, VertexId)) -> &Distance {
        &self.cells[from * self.size + to]
    }
}

impl Serialize for DistanceMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

/// Initial distance matrix for the all-pairs algorithm
///
/// Each arc `i -> j` sets entry `[i][j]` to its weight, with absent weights
/// counting as `1`. Parallel arcs overwrite each other in declaration order,
/// so the last one wins even when it is heavier. Self-loops only replace the
/// zero diagonal when their weight is negative.
///
/// Allocates `n * n` cells with no size check, which aborts on graphs far
/// beyond [`MAX_MATRIX_VERTICES`](crate::limits::MAX_MATRIX_VERTICES). Use
/// [`try_build_distance_matrix`] for graphs of unknown size.
pub fn build_distance_matrix(adjacency: &AdjacencyList) -> DistanceMatrix {
    let mut matrix = DistanceMatrix::unconnected(adjacency.vertex_count());

    for (from, arc) in adjacency.arcs() {
        let weight = arc.weight.unwrap_or(1);
        if from == arc.vertex && weight >= 0 {
            continue;
        }
        matrix.set(from, arc.vertex, Distance::Finite(weight));
    }

    matrix
}

/// [`build_distance_matrix`] that first checks the vertex count against
/// [`MAX_MATRIX_VERTICES`](crate::limits::MAX_MATRIX_VERTICES)
pub fn try_build_distance_matrix(adjacency: &AdjacencyList) -> Result<DistanceMatrix> {
    validate_matrix_size(adjacency.vertex_count())?;
    Ok(build_distance_matrix(adjacency))
}

/// Dense edge table: `Some(weight)` where an edge exists, `None` elsewhere
///
/// Unweighted edges, and weighted edges declared without a weight, are
/// stored as `Some(1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<Option<i64>>,
}

impl AdjacencyMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: VertexId, to: VertexId) -> Option<i64> {
        self.cells[from * self.size + to]
    }

    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.get(from, to).is_some()
    }

    pub fn to_rows(&self) -> Vec<Vec<Option<i64>>> {
        self.cells
            .chunks(self.size.max(1))
            .map(<[Option<i64>]>::to_vec)
            .collect()
    }
}

impl Serialize for AdjacencyMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

/// Build a dense edge table from parsed edges (last write wins)
///
/// Fails with a validation error above
/// [`MAX_MATRIX_VERTICES`](crate::limits::MAX_MATRIX_VERTICES) vertices.
pub fn build_adjacency_matrix(descriptor: &GraphDescriptor, edges: &[Edge]) -> Result<AdjacencyMatrix> {
    let size = descriptor.vertex_count;
    validate_matrix_size(size)?;
    let mut cells = vec![None; size * size];

    for edge in edges {
        for vertex in [edge.source, edge.target] {
            if !descriptor.contains(vertex) {
                return Err(Error::VertexOutOfRange {
                    vertex,
                    vertex_count: size,
                });
            }
        }

        let weight = if descriptor.weighted {
            edge.weight.unwrap_or(1)
        } else {
            1
        };
        cells[edge.source * size + edge.target] = Some(weight);
        if !descriptor.directed {
            cells[edge.target * size + edge.source] = Some(weight);
        }
    }

    Ok(AdjacencyMatrix { size, cells })
}
