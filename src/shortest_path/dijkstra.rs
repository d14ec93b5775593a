//! Single-source shortest paths (Dijkstra).
//!
//! # Algorithm
//!
//! Classic priority-queue relaxation with lazy deletion: tentative
//! distances start at infinity (source at 0); the unsettled node with the
//! smallest tentative distance is settled and its outgoing edges relaxed
//! until the queue drains. Stale queue entries are skipped on extraction.
//!
//! Ties on equal tentative distance break by insertion order (a monotone
//! sequence number in the heap key), so runs are reproducible.
//!
//! # Complexity
//!
//! O((V + E) log V) with the binary heap.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{Result, RoutingError};
use crate::models::Graph;

/// Heap entry: min-ordered by cost, then by insertion sequence.
#[derive(Debug, Clone, PartialEq)]
struct State {
    cost: f64,
    seq: u64,
    node: String,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; earlier insertions win ties.
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The result of one Dijkstra run: every *settled* node with its final
/// distance and predecessor.
///
/// A node absent from the result is either unreachable or was never
/// settled because the search stopped early; the caller decides which
/// interpretation applies (the matrix builder maps absence to infinity).
///
/// # Examples
///
/// ```
/// use tour_routing::models::Graph;
/// use tour_routing::shortest_path::shortest_paths;
///
/// let mut graph = Graph::undirected();
/// graph.add_node("a", 0.0, 0.0).unwrap();
/// graph.add_node("b", 0.0, 1.0).unwrap();
/// graph.add_node("c", 0.0, 2.0).unwrap();
/// graph.add_edge("a", "b", 1.0).unwrap();
/// graph.add_edge("b", "c", 2.0).unwrap();
///
/// let sp = shortest_paths(&graph, "a", None).unwrap();
/// assert_eq!(sp.distance_to("c"), Some(3.0));
/// assert_eq!(
///     sp.path_to("c").unwrap(),
///     vec!["a".to_string(), "b".to_string(), "c".to_string()]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: String,
    settled: HashMap<String, (f64, Option<String>)>,
}

impl ShortestPaths {
    /// The source node this run started from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Final distance to a settled node, `None` if the node was not settled.
    pub fn distance_to(&self, id: &str) -> Option<f64> {
        self.settled.get(id).map(|(dist, _)| *dist)
    }

    /// Reconstructs the shortest path from the source to a settled node by
    /// walking predecessors back to the source and reversing.
    ///
    /// Returns `None` if the node was not settled. The path to the source
    /// itself is `[source]`.
    pub fn path_to(&self, id: &str) -> Option<Vec<String>> {
        if !self.settled.contains_key(id) {
            return None;
        }
        let mut path = vec![id.to_string()];
        let mut current = id;
        while let Some((_, Some(prev))) = self.settled.get(current) {
            path.push(prev.clone());
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Number of settled nodes.
    pub fn len(&self) -> usize {
        self.settled.len()
    }

    /// Returns `true` if nothing was settled (never the case on success).
    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}

/// Runs Dijkstra from `source` over the whole graph, or until every node
/// in `targets` has been settled.
///
/// The early stop is an optimization only: distances and paths reported
/// for settled nodes are identical with or without a target set. Targets
/// that are unreachable (or absent from the graph) simply remain missing
/// from the result once the queue drains.
///
/// Fails with [`RoutingError::UnknownNode`] if `source` is absent.
pub fn shortest_paths(
    graph: &Graph,
    source: &str,
    targets: Option<&HashSet<String>>,
) -> Result<ShortestPaths> {
    if !graph.contains(source) {
        return Err(RoutingError::UnknownNode(source.to_string()));
    }

    let mut dist: HashMap<String, f64> = HashMap::new();
    let mut prev: HashMap<String, String> = HashMap::new();
    let mut settled: HashMap<String, (f64, Option<String>)> = HashMap::new();
    let mut heap = BinaryHeap::new();
    let mut seq: u64 = 0;

    let mut remaining = targets.map_or(0, |set| set.len());
    let stop_early = targets.is_some_and(|set| !set.is_empty());

    dist.insert(source.to_string(), 0.0);
    heap.push(State {
        cost: 0.0,
        seq,
        node: source.to_string(),
    });

    while let Some(State { cost, node, .. }) = heap.pop() {
        if settled.contains_key(&node) {
            continue;
        }
        // Stale entry: a shorter tentative distance was queued later.
        if cost > *dist.get(&node).unwrap_or(&f64::INFINITY) {
            continue;
        }

        settled.insert(node.clone(), (cost, prev.get(&node).cloned()));

        if stop_early && targets.is_some_and(|set| set.contains(&node)) {
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        for (neighbor, weight) in graph.neighbors(&node)? {
            if settled.contains_key(neighbor) {
                continue;
            }
            let next_cost = cost + weight;
            let known = *dist.get(neighbor).unwrap_or(&f64::INFINITY);
            if next_cost < known {
                dist.insert(neighbor.to_string(), next_cost);
                prev.insert(neighbor.to_string(), node.clone());
                seq += 1;
                heap.push(State {
                    cost: next_cost,
                    seq,
                    node: neighbor.to_string(),
                });
            }
        }
    }

    Ok(ShortestPaths {
        source: source.to_string(),
        settled,
    })
}
