//! Crate-wide error type.
//!
//! Every failure in the crate is a local precondition violation raised at
//! the point it is detected. There are no retries and no partial results:
//! an operation either returns a complete value or one of these errors.

use thiserror::Error;

/// Errors raised by graph construction, matrix building, and the solvers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// A node with this id is already present in the graph.
    #[error("node '{0}' already exists in the graph")]
    DuplicateNode(String),

    /// A referenced node id is absent from the graph.
    #[error("node '{0}' not found in the graph")]
    UnknownNode(String),

    /// An edge weight is negative or non-finite.
    #[error("invalid weight {weight} on edge '{from}' -> '{to}'")]
    InvalidWeight {
        /// Source endpoint of the offending edge.
        from: String,
        /// Target endpoint of the offending edge.
        to: String,
        /// The rejected weight.
        weight: f64,
    },

    /// A requested stop id is absent from the graph or matrix.
    #[error("stop '{0}' not found")]
    StopNotFound(String),

    /// A stop id appears more than once in a stop list.
    #[error("stop '{0}' listed more than once")]
    DuplicateStop(String),

    /// No finite tour exists over the given stops.
    #[error("no feasible tour: {0}")]
    InfeasibleTour(String),

    /// The instance exceeds the exact solver's stop limit.
    #[error("{stops} stops exceed the exact-solver limit of {limit}")]
    ProblemTooLarge {
        /// Number of stops in the instance.
        stops: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A spatial query was given a graph with no nodes.
    #[error("graph has no nodes")]
    EmptyGraph,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;
