//! Cross-graph nearest-pair query.

use log::debug;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::models::Graph;
use crate::spatial::geo::{haversine_distance, unit_vector};

/// Node position on the unit sphere, tagged with its index, for the R-tree.
#[derive(Clone, Copy, Debug, PartialEq)]
struct IndexedPoint {
    pos: [f64; 3],
    idx: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.pos)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.pos[0] - point[0];
        let dy = self.pos[1] - point[1];
        let dz = self.pos[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }

    fn contains_point(&self, point: &[f64; 3]) -> bool {
        self.pos == *point
    }
}

/// The globally closest pair of nodes across two graphs.
///
/// `first`/`second` name a node from the respective input graph;
/// `distance_m` is their great-circle distance in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosestPair {
    /// Node id from the first graph.
    pub first: String,
    /// Node id from the second graph.
    pub second: String,
    /// Haversine distance between the two, in meters.
    pub distance_m: f64,
}

/// Finds the closest pair of nodes (one per graph) under the haversine
/// metric.
///
/// Nodes of the first graph are indexed in an R-tree keyed by unit-sphere
/// vectors; every node of the second graph queries it for its nearest
/// neighbor. Chord distance on the unit sphere is monotone in the central
/// angle, so the tree's nearest neighbor is exact under the haversine
/// metric, and the reported distance is computed with the haversine
/// formula itself.
///
/// Fails with [`RoutingError::EmptyGraph`] if either graph has no nodes.
///
/// # Examples
///
/// ```
/// use tour_routing::models::Graph;
/// use tour_routing::spatial::closest_pair;
///
/// let mut first = Graph::undirected();
/// first.add_node("berlin", 52.52, 13.405).unwrap();
/// first.add_node("paris", 48.8566, 2.3522).unwrap();
///
/// let mut second = Graph::undirected();
/// second.add_node("potsdam", 52.3906, 13.0645).unwrap();
///
/// let pair = closest_pair(&first, &second).unwrap();
/// assert_eq!(pair.first, "berlin");
/// assert_eq!(pair.second, "potsdam");
/// assert!(pair.distance_m < 40_000.0);
/// ```
pub fn closest_pair(first: &Graph, second: &Graph) -> Result<ClosestPair> {
    if first.is_empty() || second.is_empty() {
        return Err(RoutingError::EmptyGraph);
    }

    let first_nodes: Vec<_> = first.nodes().collect();
    let points = first_nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| IndexedPoint {
            pos: unit_vector(node.lat(), node.lon()),
            idx,
        })
        .collect();
    let tree = RTree::bulk_load(points);
    debug!(
        "indexed {} nodes, querying {}",
        first.node_count(),
        second.node_count()
    );

    let mut best: Option<ClosestPair> = None;
    for node in second.nodes() {
        let query = unit_vector(node.lat(), node.lon());
        let nearest = tree
            .nearest_neighbor(&query)
            .expect("tree built from a non-empty graph");
        let partner = first_nodes[nearest.idx];
        let distance_m =
            haversine_distance(partner.lat(), partner.lon(), node.lat(), node.lon());
        if best.as_ref().is_none_or(|b| distance_m < b.distance_m) {
            best = Some(ClosestPair {
                first: partner.id().to_string(),
                second: node.id().to_string(),
                distance_m,
            });
        }
    }

    Ok(best.expect("second graph checked non-empty"))
}
