//! Connected components and strong connectivity

use crate::adjacency::AdjacencyList;
use crate::error::Result;
use crate::parse::{parse, VertexId};
use crate::traversal::reachable;
use std::collections::BTreeSet;

/// Connected components of a graph description
///
/// Every edge is treated as undirected regardless of the header's direction
/// flag. Components are returned in ascending order of their smallest vertex,
/// and isolated vertices form singleton components.
pub fn connected_components(text: &str) -> Result<Vec<BTreeSet<VertexId>>> {
    let (descriptor, edges) = parse(text)?;
    let adjacency = AdjacencyList::symmetric_closure(&descriptor, &edges)?;
    Ok(components(&adjacency))
}

/// Components found by sweeping an adjacency list from each unvisited vertex
///
/// The list should be symmetric (undirected); on a directed list each sweep
/// only collects what its root reaches.
pub fn components(adjacency: &AdjacencyList) -> Vec<BTreeSet<VertexId>> {
    let n = adjacency.vertex_count();
    let mut visited = vec![false; n];
    let mut result = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }

        let mut component = BTreeSet::new();
        let mut stack = vec![root];
        visited[root] = true;

        while let Some(vertex) = stack.pop() {
            component.insert(vertex);
            for arc in adjacency.neighbors(vertex) {
                if !visited[arc.vertex] {
                    visited[arc.vertex] = true;
                    stack.push(arc.vertex);
                }
            }
        }

        result.push(component);
    }

    tracing::debug!("Found {} component(s) over {} vertices", result.len(), n);
    result
}

/// Whether every vertex of a directed graph reaches every other
///
/// Vertex 0 must reach all vertices in the graph and in its transpose. The
/// second pass is the same as every vertex reaching 0, and mutual
/// reachability through 0 connects every pair. An empty graph is strongly
/// connected.
pub fn is_strongly_connected(adjacency: &AdjacencyList) -> bool {
    if adjacency.is_empty() {
        return true;
    }

    if !reachable(adjacency, 0).into_iter().all(|seen| seen) {
        tracing::debug!("Not strongly connected: vertex 0 does not reach every vertex");
        return false;
    }

    let connected = reachable(&adjacency.transpose(), 0)
        .into_iter()
        .all(|seen| seen);
    if !connected {
        tracing::debug!("Not strongly connected: some vertex does not reach vertex 0");
    }
    connected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build_adjacency_list;
    use crate::parse::{Edge, GraphDescriptor};
    use crate::traversal::bfs_tree;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sets(components: &[BTreeSet<VertexId>]) -> Vec<Vec<VertexId>> {
        components
            .iter()
            .map(|c| c.iter().copied().collect())
            .collect()
    }

    fn graph(text: &str) -> AdjacencyList {
        AdjacencyList::from_text(text).unwrap()
    }

    #[test]
    fn test_single_vertex() {
        let result = connected_components("U 1\n").unwrap();
        assert_eq!(sets(&result), vec![vec![0]]);
    }

    #[test]
    fn test_components_and_isolated() {
        let result = connected_components("U 6\n0 1\n3 4\n1 2\n").unwrap();
        assert_eq!(sets(&result), vec![vec![0, 1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_directed_header_treated_as_undirected() {
        // 2 -> 0 only; 0 still lands with 2
        let result = connected_components("D 3\n2 0\n").unwrap();
        assert_eq!(sets(&result), vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(connected_components("U 0\n").unwrap().is_empty());
    }

    #[test]
    fn test_components_format_error() {
        assert!(connected_components("U 2\n0\n").is_err());
    }

    #[test]
    fn test_strongly_connected_cycle() {
        assert!(is_strongly_connected(&graph("D 3\n0 1\n1 2\n2 0\n")));
    }

    #[test]
    fn test_not_strongly_connected_sink() {
        // 2 cannot get back to 0
        assert!(!is_strongly_connected(&graph("D 3\n0 1\n1 0\n0 2\n")));
    }

    #[test]
    fn test_not_strongly_connected_one_way() {
        assert!(!is_strongly_connected(&graph("D 2\n0 1\n")));
    }

    #[test]
    fn test_not_strongly_connected_unreached() {
        // Everything reaches 0 but 0 reaches nothing
        assert!(!is_strongly_connected(&graph("D 3\n1 0\n2 0\n")));
    }

    #[test]
    fn test_trivial_graphs() {
        assert!(is_strongly_connected(&graph("D 1\n")));
        assert!(is_strongly_connected(&graph("D 0\n")));
        assert!(!is_strongly_connected(&graph("D 2\n")));
    }

    #[test]
    fn test_undirected_connected_is_strong() {
        assert!(is_strongly_connected(&graph("U 3\n0 1\n1 2\n")));
    }

    #[test]
    fn test_random_partition() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let n = rng.gen_range(1..20);
            let desc = GraphDescriptor::new(false, false, n);
            let edges: Vec<Edge> = (0..rng.gen_range(0..n))
                .map(|_| Edge::new(rng.gen_range(0..n), rng.gen_range(0..n)))
                .collect();
            let adj = build_adjacency_list(&desc, &edges).unwrap();
            let result = components(&adj);

            // Disjoint and covering
            let total: usize = result.iter().map(BTreeSet::len).sum();
            assert_eq!(total, n);
            let union: BTreeSet<VertexId> = result.iter().flatten().copied().collect();
            assert_eq!(union.len(), n);

            // Same component iff connected by a path
            let mut label = vec![0; n];
            for (idx, component) in result.iter().enumerate() {
                for &v in component {
                    label[v] = idx;
                }
            }
            for u in 0..n {
                let tree = bfs_tree(&adj, u).unwrap();
                for v in 0..n {
                    assert_eq!(tree.is_reached(v), label[u] == label[v]);
                }
            }
        }
    }

    #[test]
    fn test_random_strong_connectivity_matches_pairwise() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let n = rng.gen_range(1..8);
            let desc = GraphDescriptor::new(true, false, n);
            let edges: Vec<Edge> = (0..rng.gen_range(0..3 * n))
                .map(|_| Edge::new(rng.gen_range(0..n), rng.gen_range(0..n)))
                .collect();
            let adj = build_adjacency_list(&desc, &edges).unwrap();

            let pairwise = (0..n).all(|u| (0..n).all(|v| reachable(&adj, u)[v]));
            assert_eq!(is_strongly_connected(&adj), pairwise);
        }
    }
}
