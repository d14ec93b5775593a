//! Weighted node/edge graph.

use std::collections::HashMap;

use crate::error::{Result, RoutingError};
use crate::models::Node;

/// A weighted graph over geographic nodes.
///
/// Nodes are keyed by id; each node carries an adjacency list of
/// `(neighbor id, weight)` pairs in insertion order. The graph is either
/// directed or undirected, chosen at construction: undirected edge
/// insertion writes both directions with equal weight.
///
/// Loaders populate the graph through [`add_node`](Graph::add_node) and
/// [`add_edge`](Graph::add_edge); every downstream component treats it as
/// read-only.
///
/// # Examples
///
/// ```
/// use tour_routing::models::Graph;
///
/// let mut graph = Graph::undirected();
/// graph.add_node("a", 0.0, 0.0).unwrap();
/// graph.add_node("b", 0.0, 1.0).unwrap();
/// graph.add_edge("a", "b", 1.0).unwrap();
///
/// let neighbors: Vec<_> = graph.neighbors("b").unwrap().collect();
/// assert_eq!(neighbors, vec![("a", 1.0)]);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: HashMap<String, Node>,
    adjacency: HashMap<String, Vec<(String, f64)>>,
    directed: bool,
}

impl Graph {
    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self {
            nodes: HashMap::new(),
            adjacency: HashMap::new(),
            directed: true,
        }
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self {
            nodes: HashMap::new(),
            adjacency: HashMap::new(),
            directed: false,
        }
    }

    /// Returns `true` if edges are one-way.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Adds a node.
    ///
    /// Fails with [`RoutingError::DuplicateNode`] if the id is already
    /// present.
    pub fn add_node(&mut self, id: impl Into<String>, lat: f64, lon: f64) -> Result<()> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(RoutingError::DuplicateNode(id));
        }
        self.adjacency.insert(id.clone(), Vec::new());
        self.nodes.insert(id.clone(), Node::new(id, lat, lon));
        Ok(())
    }

    /// Adds an edge between two existing nodes.
    ///
    /// For undirected graphs the reverse edge is stored as well (a
    /// self-loop is stored once). Fails with [`RoutingError::UnknownNode`]
    /// if either endpoint is absent and with
    /// [`RoutingError::InvalidWeight`] if the weight is negative or
    /// non-finite.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        if !self.nodes.contains_key(from) {
            return Err(RoutingError::UnknownNode(from.to_string()));
        }
        if !self.nodes.contains_key(to) {
            return Err(RoutingError::UnknownNode(to.to_string()));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(RoutingError::InvalidWeight {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            });
        }

        self.adjacency
            .get_mut(from)
            .expect("endpoint checked above")
            .push((to.to_string(), weight));
        if !self.directed && from != to {
            self.adjacency
                .get_mut(to)
                .expect("endpoint checked above")
                .push((from.to_string(), weight));
        }
        Ok(())
    }

    /// Returns the neighbors of a node as `(neighbor id, weight)` pairs in
    /// insertion order.
    ///
    /// Fails with [`RoutingError::UnknownNode`] if the id is absent.
    pub fn neighbors(&self, id: &str) -> Result<impl Iterator<Item = (&str, f64)> + '_> {
        let edges = self
            .adjacency
            .get(id)
            .ok_or_else(|| RoutingError::UnknownNode(id.to_string()))?;
        Ok(edges.iter().map(|(to, weight)| (to.as_str(), *weight)))
    }

    /// Returns the weight of the edge `from -> to`, if present.
    ///
    /// With parallel edges, the first one inserted wins.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency
            .get(from)?
            .iter()
            .find(|(id, _)| id == to)
            .map(|(_, weight)| *weight)
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns `true` if a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterates over all nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
