//! Single-source (Dijkstra) and all-pairs (Floyd-Warshall) shortest paths

use crate::adjacency::AdjacencyList;
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::matrix::{Distance, DistanceMatrix};
use crate::parse::{VertexId, Weight};
use crate::traversal::{check_start, SearchTree};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Shortest-path tree with the distance to every vertex
///
/// When several shortest paths tie, which parent is recorded is an
/// implementation detail; only `distances` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathTree {
    #[serde(flatten)]
    pub tree: SearchTree,
    pub distances: Vec<Distance>,
}

impl ShortestPathTree {
    pub fn distance(&self, vertex: VertexId) -> Distance {
        self.distances
            .get(vertex)
            .copied()
            .unwrap_or(Distance::Infinite)
    }

    pub fn parents(&self) -> &[Option<VertexId>] {
        &self.tree.parents
    }

    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        self.tree.path_to(target)
    }
}

/// State for Dijkstra priority queue
#[derive(Clone, Copy, PartialEq, Eq)]
struct DijkstraState {
    cost: i64,
    node: VertexId,
}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm from `start`
///
/// Absent weights count as `1`. Negative weights are rejected up front with
/// [`Error::NegativeWeight`]. Unreachable vertices report
/// [`Distance::Infinite`].
pub fn dijkstra(adjacency: &AdjacencyList, start: VertexId) -> Result<ShortestPathTree> {
    run_dijkstra(adjacency, start, None)
}

/// [`dijkstra`] that polls `token` on every queue extraction
pub fn dijkstra_cancellable(
    adjacency: &AdjacencyList,
    start: VertexId,
    token: &CancelToken,
) -> Result<ShortestPathTree> {
    run_dijkstra(adjacency, start, Some(token))
}

fn run_dijkstra(
    adjacency: &AdjacencyList,
    start: VertexId,
    token: Option<&CancelToken>,
) -> Result<ShortestPathTree> {
    check_start(adjacency, start)?;
    check_non_negative(adjacency)?;

    let n = adjacency.vertex_count();
    let mut tree = SearchTree::new(start, n);
    let mut distances = vec![Distance::Infinite; n];
    let mut heap = BinaryHeap::new();
    let mut stale = 0usize;

    distances[start] = Distance::ZERO;
    heap.push(DijkstraState {
        cost: 0,
        node: start,
    });

    while let Some(DijkstraState { cost, node }) = heap.pop() {
        if token.is_some_and(CancelToken::is_cancelled) {
            tracing::debug!("Dijkstra from {} cancelled", start);
            return Err(Error::Cancelled);
        }

        // Skip if we already found a better path
        if Distance::Finite(cost) > distances[node] {
            stale += 1;
            continue;
        }

        for arc in adjacency.neighbors(node) {
            let next_cost = cost.saturating_add(arc.weight.unwrap_or(1));
            if Distance::Finite(next_cost) < distances[arc.vertex] {
                distances[arc.vertex] = Distance::Finite(next_cost);
                tree.parents[arc.vertex] = Some(node);
                heap.push(DijkstraState {
                    cost: next_cost,
                    node: arc.vertex,
                });
            }
        }
    }

    tracing::debug!(
        "Dijkstra from {} settled {} vertices, skipped {} stale entries",
        start,
        distances.iter().filter(|d| d.is_finite()).count(),
        stale
    );

    Ok(ShortestPathTree { tree, distances })
}

fn check_non_negative(adjacency: &AdjacencyList) -> Result<()> {
    for (from, arc) in adjacency.arcs() {
        if let Weight::Present(weight) = arc.weight {
            if weight < 0 {
                return Err(Error::NegativeWeight {
                    from,
                    to: arc.vertex,
                    weight,
                });
            }
        }
    }
    Ok(())
}

/// Floyd-Warshall all-pairs shortest paths
///
/// Returns a new matrix and leaves `distances` untouched. If the graph has a
/// negative cycle the result is not meaningful; use [`floyd_checked`] to have
/// that reported.
pub fn floyd(distances: &DistanceMatrix) -> DistanceMatrix {
    let mut result = distances.clone();
    for k in 0..result.size() {
        relax_through(&mut result, k);
    }
    tracing::debug!("Floyd-Warshall relaxed {} vertices", result.size());
    result
}

/// [`floyd`] followed by a negative-cycle check on the diagonal
pub fn floyd_checked(distances: &DistanceMatrix) -> Result<DistanceMatrix> {
    let result = floyd(distances);
    match negative_cycle_vertices(&result).first() {
        Some(&vertex) => {
            tracing::debug!("Negative cycle through vertex {}", vertex);
            Err(Error::NegativeCycle { vertex })
        }
        None => Ok(result),
    }
}

/// [`floyd`] that polls `token` before each intermediate vertex
pub fn floyd_cancellable(distances: &DistanceMatrix, token: &CancelToken) -> Result<DistanceMatrix> {
    let mut result = distances.clone();
    for k in 0..result.size() {
        if token.is_cancelled() {
            tracing::debug!("Floyd-Warshall cancelled at k={}", k);
            return Err(Error::Cancelled);
        }
        relax_through(&mut result, k);
    }
    Ok(result)
}

/// Vertices whose diagonal entry is negative in a relaxed matrix
///
/// Each of them lies on a negative cycle.
pub fn negative_cycle_vertices(relaxed: &DistanceMatrix) -> Vec<VertexId> {
    (0..relaxed.size())
        .filter(|&v| relaxed.get(v, v).is_negative())
        .collect()
}

/// One Floyd-Warshall round: allow `k` as an intermediate vertex
fn relax_through(dist: &mut DistanceMatrix, k: VertexId) {
    let n = dist.size();
    for i in 0..n {
        let via_k = dist.get(i, k);
        if !via_k.is_finite() {
            continue;
        }
        for j in 0..n {
            let candidate = via_k + dist.get(k, j);
            if candidate < dist.get(i, j) {
                dist.set(i, j, candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build_adjacency_list;
    use crate::matrix::build_distance_matrix;
    use crate::parse::{Edge, GraphDescriptor};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;
    use Distance::{Finite, Infinite};

    fn graph(text: &str) -> AdjacencyList {
        AdjacencyList::from_text(text).unwrap()
    }

    /// Random non-negative graph without parallel edges, so the distance
    /// matrix (last write wins) and Dijkstra (minimum wins) agree.
    fn random_simple_graph(rng: &mut StdRng) -> AdjacencyList {
        let n = rng.gen_range(1..10);
        let directed = rng.gen_bool(0.5);
        let desc = GraphDescriptor::new(directed, true, n);

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for _ in 0..rng.gen_range(0..3 * n) {
            let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
            let key = if directed { (u, v) } else { (u.min(v), u.max(v)) };
            if seen.insert(key) {
                let edge = Edge::new(u, v);
                edges.push(if rng.gen_bool(0.1) {
                    edge
                } else {
                    edge.with_weight(rng.gen_range(0..25))
                });
            }
        }
        build_adjacency_list(&desc, &edges).unwrap()
    }

    #[test]
    fn test_dijkstra_basic() {
        let adj = graph("D 3 W\n1 0 3\n2 0 1\n1 2 1\n");

        let from_one = dijkstra(&adj, 1).unwrap();
        assert_eq!(from_one.distances, vec![Finite(2), Finite(0), Finite(1)]);
        assert_eq!(from_one.parents(), &[Some(2), None, Some(1)]);
        assert_eq!(from_one.path_to(0), Some(vec![1, 2, 0]));

        let from_two = dijkstra(&adj, 2).unwrap();
        assert_eq!(from_two.distances, vec![Finite(1), Infinite, Finite(0)]);
        assert_eq!(from_two.parents(), &[Some(2), None, None]);
    }

    #[test]
    fn test_dijkstra_stale_entries_are_skipped() {
        // 1 is first queued at cost 5, then improved to 2 via 2
        let adj = graph("D 3 W\n0 1 5\n0 2 1\n2 1 1\n");
        let result = dijkstra(&adj, 0).unwrap();
        assert_eq!(result.distances, vec![Finite(0), Finite(2), Finite(1)]);
        assert_eq!(result.tree.parent(1), Some(2));
    }

    #[test]
    fn test_dijkstra_unweighted_counts_hops() {
        let adj = graph("U 4\n0 1\n1 2\n2 3\n0 3\n");
        let result = dijkstra(&adj, 0).unwrap();
        assert_eq!(result.distances, vec![Finite(0), Finite(1), Finite(2), Finite(1)]);
    }

    #[test]
    fn test_dijkstra_rejects_negative_weight() {
        let adj = graph("D 3 W\n0 1 2\n1 2 -1\n");
        assert_eq!(
            dijkstra(&adj, 0).unwrap_err(),
            Error::NegativeWeight {
                from: 1,
                to: 2,
                weight: -1
            }
        );
    }

    #[test]
    fn test_dijkstra_start_out_of_range() {
        let adj = graph("D 1\n");
        assert!(matches!(
            dijkstra(&adj, 1),
            Err(Error::StartOutOfRange { start: 1, .. })
        ));
    }

    #[test]
    fn test_dijkstra_zero_weight_self_loop() {
        let adj = graph("D 2 W\n0 0 0\n0 1 3\n");
        let result = dijkstra(&adj, 0).unwrap();
        assert_eq!(result.tree.parent(0), None);
        assert_eq!(result.distance(1), Finite(3));
    }

    #[test]
    fn test_floyd_cycle() {
        let adj = graph("D 3 W\n0 1 1\n1 2 2\n2 0 4\n");
        let initial = build_distance_matrix(&adj);
        let before = initial.clone();

        let result = floyd(&initial);
        assert_eq!(result[(0, 2)], Finite(3));
        assert_eq!(
            result.to_rows(),
            vec![
                vec![Finite(0), Finite(1), Finite(3)],
                vec![Finite(6), Finite(0), Finite(2)],
                vec![Finite(4), Finite(5), Finite(0)],
            ]
        );
        assert_eq!(initial, before);
    }

    #[test]
    fn test_floyd_keeps_unreachable_infinite() {
        let adj = graph("D 3 W\n0 1 -2\n");
        let result = floyd_checked(&build_distance_matrix(&adj)).unwrap();
        assert_eq!(result[(0, 1)], Finite(-2));
        assert_eq!(result[(1, 0)], Infinite);
        assert_eq!(result[(2, 0)], Infinite);
    }

    #[test]
    fn test_floyd_negative_cycle_detected() {
        let adj = graph("D 3 W\n0 1 1\n1 0 -3\n1 2 1\n");
        let initial = build_distance_matrix(&adj);
        assert_eq!(
            floyd_checked(&initial).unwrap_err(),
            Error::NegativeCycle { vertex: 0 }
        );
        assert_eq!(negative_cycle_vertices(&floyd(&initial)), vec![0, 1]);
    }

    #[test]
    fn test_floyd_negative_self_loop_detected() {
        let adj = graph("D 2 W\n1 1 -1\n");
        assert_eq!(
            floyd_checked(&build_distance_matrix(&adj)).unwrap_err(),
            Error::NegativeCycle { vertex: 1 }
        );
    }

    #[test]
    fn test_cancelled_before_start() {
        let adj = graph("D 2 W\n0 1 1\n");
        let token = CancelToken::new();
        token.cancel();

        assert_eq!(dijkstra_cancellable(&adj, 0, &token), Err(Error::Cancelled));
        assert_eq!(
            floyd_cancellable(&build_distance_matrix(&adj), &token),
            Err(Error::Cancelled)
        );
    }

    fn chain(n: usize) -> AdjacencyList {
        let edges: Vec<Edge> = (1..n).map(|v| Edge::new(v - 1, v).with_weight(1)).collect();
        build_adjacency_list(&GraphDescriptor::new(true, true, n), &edges).unwrap()
    }

    fn cancel_after(token: &CancelToken, millis: u64) -> std::thread::JoinHandle<()> {
        let watchdog = token.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(millis));
            watchdog.cancel();
        })
    }

    #[test]
    fn test_dijkstra_cancelled_mid_run() {
        let adj = chain(1_000_000);
        let token = CancelToken::new();
        let handle = cancel_after(&token, 2);

        assert_eq!(dijkstra_cancellable(&adj, 0, &token), Err(Error::Cancelled));
        handle.join().unwrap();
    }

    #[test]
    fn test_floyd_cancelled_mid_run() {
        let matrix = build_distance_matrix(&chain(1_500));
        let token = CancelToken::new();
        let handle = cancel_after(&token, 10);

        assert_eq!(floyd_cancellable(&matrix, &token), Err(Error::Cancelled));
        handle.join().unwrap();
    }

    #[test]
    fn test_uncancelled_variants_match() {
        let adj = graph("U 4 W\n0 1 2\n1 2 2\n0 2 5\n2 3 1\n");
        let token = CancelToken::new();
        let matrix = build_distance_matrix(&adj);

        assert_eq!(dijkstra_cancellable(&adj, 0, &token).unwrap(), dijkstra(&adj, 0).unwrap());
        assert_eq!(floyd_cancellable(&matrix, &token).unwrap(), floyd(&matrix));
    }

    #[test]
    fn test_dijkstra_matches_floyd_rows() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..60 {
            let adj = random_simple_graph(&mut rng);
            let all_pairs = floyd(&build_distance_matrix(&adj));

            for start in 0..adj.vertex_count() {
                let single = dijkstra(&adj, start).unwrap();
                assert_eq!(single.distances.as_slice(), all_pairs.row(start));
                assert_eq!(single.distance(start), Finite(0));

                // Reached vertices have a tree path, unreached ones no parent
                for v in 0..adj.vertex_count() {
                    if single.distance(v).is_finite() {
                        assert!(single.path_to(v).is_some());
                    } else {
                        assert_eq!(single.tree.parent(v), None);
                    }
                }
            }
        }
    }

    #[test]
    fn test_floyd_idempotent_and_triangle_inequality() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..40 {
            let adj = random_simple_graph(&mut rng);
            let initial = build_distance_matrix(&adj);
            let snapshot = initial.clone();

            let once = floyd(&initial);
            let twice = floyd(&once);
            assert_eq!(once, twice);
            assert_eq!(initial, snapshot);

            let n = once.size();
            for i in 0..n {
                for j in 0..n {
                    for k in 0..n {
                        assert!(once[(i, j)] <= once[(i, k)] + once[(k, j)]);
                    }
                }
            }
        }
    }
}
