//! Trellis Core - Graph analysis engine
//!
//! This crate parses the Trellis graph description format into an adjacency
//! representation and provides the traversal, shortest path, ordering and
//! connectivity algorithms that operate over it.

pub mod adjacency;
pub mod cancel;
pub mod connectivity;
pub mod error;
pub mod limits;
pub mod matrix;
pub mod parse;
pub mod shortest_path;
pub mod topo;
pub mod traversal;

pub use adjacency::{build_adjacency_list, AdjacencyList, Neighbor};
pub use cancel::CancelToken;
pub use connectivity::{components, connected_components, is_strongly_connected};
pub use error::{Error, ErrorKind, Result};
pub use matrix::{
    build_adjacency_matrix, build_distance_matrix, try_build_distance_matrix, AdjacencyMatrix,
    Distance, DistanceMatrix,
};
pub use parse::{parse, Edge, GraphDescriptor, Parser, VertexId, Weight};
pub use shortest_path::{
    dijkstra, dijkstra_cancellable, floyd, floyd_cancellable, floyd_checked,
    negative_cycle_vertices, ShortestPathTree,
};
pub use topo::{build_order, build_order_with, topological_order, CyclePolicy};
pub use traversal::{bfs_tree, dfs_forest, dfs_tree, SearchTree};
