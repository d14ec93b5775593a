//! Graph node type.

use serde::{Deserialize, Serialize};

/// A node in a road/POI network: a stable id and a geographic position.
///
/// Immutable once constructed.
///
/// # Examples
///
/// ```
/// use tour_routing::models::Node;
///
/// let node = Node::new("a1", 52.52, 13.405);
/// assert_eq!(node.id(), "a1");
/// assert_eq!(node.lat(), 52.52);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    lat: f64,
    lon: f64,
}

impl Node {
    /// Creates a new node.
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }

    /// Node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}
