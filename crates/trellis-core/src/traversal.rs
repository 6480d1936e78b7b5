//! Breadth-first and depth-first search trees

use crate::adjacency::AdjacencyList;
use crate::error::{Error, Result};
use crate::parse::VertexId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Single-source search tree as a parent array
///
/// `parents[v]` is the vertex `v` was discovered from. The start vertex and
/// every vertex the search never reached hold `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTree {
    pub start: VertexId,
    pub parents: Vec<Option<VertexId>>,
}

impl SearchTree {
    pub(crate) fn new(start: VertexId, vertex_count: usize) -> Self {
        Self {
            start,
            parents: vec![None; vertex_count],
        }
    }

    pub fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parents.get(vertex).copied().flatten()
    }

    pub fn is_reached(&self, vertex: VertexId) -> bool {
        vertex == self.start || self.parent(vertex).is_some()
    }

    /// Number of vertices in the tree, including the start
    pub fn reached_count(&self) -> usize {
        (0..self.parents.len()).filter(|&v| self.is_reached(v)).count()
    }

    /// Tree path from the start to `target`, or `None` if it was not reached
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if target >= self.parents.len() || !self.is_reached(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.start {
            current = self.parent(current)?;
            path.push(current);
            if path.len() > self.parents.len() {
                // Parent pointers loop without reaching the start
                return None;
            }
        }

        path.reverse();
        Some(path)
    }

    /// Number of tree edges between the start and `target`
    pub fn depth(&self, target: VertexId) -> Option<usize> {
        self.path_to(target).map(|path| path.len() - 1)
    }
}

pub(crate) fn check_start(adjacency: &AdjacencyList, start: VertexId) -> Result<()> {
    if start >= adjacency.vertex_count() {
        return Err(Error::StartOutOfRange {
            start,
            vertex_count: adjacency.vertex_count(),
        });
    }
    Ok(())
}

/// Breadth-first search tree rooted at `start`
///
/// Vertices are marked when enqueued, so each reachable vertex is visited
/// once and keeps the first parent that discovered it.
pub fn bfs_tree(adjacency: &AdjacencyList, start: VertexId) -> Result<SearchTree> {
    check_start(adjacency, start)?;

    let mut tree = SearchTree::new(start, adjacency.vertex_count());
    let mut visited = vec![false; adjacency.vertex_count()];
    let mut queue = VecDeque::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for arc in adjacency.neighbors(current) {
            if !visited[arc.vertex] {
                visited[arc.vertex] = true;
                tree.parents[arc.vertex] = Some(current);
                queue.push_back(arc.vertex);
            }
        }
    }

    tracing::debug!(
        "BFS from {} reached {} of {} vertices",
        start,
        tree.reached_count(),
        adjacency.vertex_count()
    );

    Ok(tree)
}

/// Depth-first search tree rooted at `start`
///
/// Only the vertices reachable from `start` are covered. The walk keeps an
/// explicit stack of `(vertex, next arc index)` frames, so depth is bounded by
/// memory rather than the call stack.
pub fn dfs_tree(adjacency: &AdjacencyList, start: VertexId) -> Result<SearchTree> {
    check_start(adjacency, start)?;

    let mut tree = SearchTree::new(start, adjacency.vertex_count());
    let mut visited = vec![false; adjacency.vertex_count()];
    dfs_from(adjacency, start, &mut visited, &mut tree.parents);

    tracing::debug!(
        "DFS from {} reached {} of {} vertices",
        start,
        tree.reached_count(),
        adjacency.vertex_count()
    );

    Ok(tree)
}

/// Depth-first forest over the whole graph
///
/// Starts a new tree at every undiscovered vertex in ascending id order.
/// Tree roots hold `None`.
pub fn dfs_forest(adjacency: &AdjacencyList) -> Vec<Option<VertexId>> {
    let n = adjacency.vertex_count();
    let mut parents = vec![None; n];
    let mut visited = vec![false; n];

    let mut roots = 0;
    for root in 0..n {
        if !visited[root] {
            roots += 1;
            dfs_from(adjacency, root, &mut visited, &mut parents);
        }
    }

    tracing::debug!("DFS forest has {} trees over {} vertices", roots, n);
    parents
}

fn dfs_from(
    adjacency: &AdjacencyList,
    root: VertexId,
    visited: &mut [bool],
    parents: &mut [Option<VertexId>],
) {
    visited[root] = true;
    let mut stack: Vec<(VertexId, usize)> = vec![(root, 0)];

    while let Some(frame) = stack.last_mut() {
        let (vertex, next) = *frame;
        match adjacency.neighbors(vertex).get(next) {
            Some(arc) => {
                frame.1 += 1;
                if !visited[arc.vertex] {
                    visited[arc.vertex] = true;
                    parents[arc.vertex] = Some(vertex);
                    stack.push((arc.vertex, 0));
                }
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Vertices reachable from `start`, using a plain stack and visited set
pub(crate) fn reachable(adjacency: &AdjacencyList, start: VertexId) -> Vec<bool> {
    let mut visited = vec![false; adjacency.vertex_count()];
    let mut stack = vec![start];

    while let Some(vertex) = stack.pop() {
        if visited[vertex] {
            continue;
        }
        visited[vertex] = true;
        stack.extend(
            adjacency
                .neighbors(vertex)
                .iter()
                .map(|arc| arc.vertex)
                .filter(|&next| !visited[next]),
        );
    }

    visited
}
