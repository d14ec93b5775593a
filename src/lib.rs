//! # tour-routing
//!
//! Tour planning over weighted road/POI networks: single-source shortest
//! paths, pairwise distance matrices over stop subsets, and TSP solvers
//! of increasing cost/optimality tradeoff, plus a cross-network
//! closest-pair query.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Node, Graph, Tour)
//! - [`shortest_path`] — Dijkstra engine with early termination
//! - [`distance`] — Dense distance matrix and the stop-subset builder
//! - [`solver`] — Nearest neighbor, 2-opt, and Held-Karp TSP solvers
//! - [`spatial`] — Haversine distance and cross-graph closest pair
//! - [`error`] — Crate-wide error type
//!
//! ## Pipeline
//!
//! A loader populates a [`models::Graph`]; [`distance::StopMatrix::build`]
//! runs one Dijkstra per stop to get pairwise distances and realizing
//! paths; any [`solver::TspAlgorithm`] turns the matrix into a
//! [`models::Tour`].
//!
//! ```
//! use tour_routing::distance::StopMatrix;
//! use tour_routing::models::Graph;
//! use tour_routing::solver::TspAlgorithm;
//!
//! let mut graph = Graph::undirected();
//! for (id, lat, lon) in [
//!     ("a", 0.0, 0.0),
//!     ("b", 0.0, 1.0),
//!     ("c", 1.0, 1.0),
//!     ("d", 1.0, 0.0),
//! ] {
//!     graph.add_node(id, lat, lon)?;
//! }
//! for (from, to) in [("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")] {
//!     graph.add_edge(from, to, 1.0)?;
//! }
//!
//! let matrix = StopMatrix::build(&graph, &["a", "b", "c", "d"])?;
//! let tour = TspAlgorithm::HeldKarp.solve(&matrix, None, true)?;
//! assert_eq!(tour.length(), 4.0);
//! # Ok::<(), tour_routing::RoutingError>(())
//! ```

pub mod distance;
pub mod error;
pub mod models;
pub mod shortest_path;
pub mod solver;
pub mod spatial;

pub use error::{Result, RoutingError};
