//! Single-source shortest path engine.
//!
//! Provides Dijkstra with optional early termination over a target set.

mod dijkstra;

pub use dijkstra::{shortest_paths, ShortestPaths};
