//! TSP solvers over a stop distance matrix.
//!
//! Three independent strategies of increasing cost/optimality tradeoff:
//!
//! - [`nearest_neighbor`] — greedy construction, O(n²)
//! - [`two_opt`] — 2-opt local search on a seed tour, O(n²) per pass
//! - [`held_karp`] — exact dynamic program, O(2ⁿ·n²)
//!
//! All three consume a [`StopMatrix`](crate::distance::StopMatrix) and
//! produce a [`Tour`](crate::models::Tour); [`TspAlgorithm`] dispatches
//! between them. Every solver treats an infinite matrix entry as "no
//! feasible tour through this pair" and fails with
//! [`InfeasibleTour`](crate::error::RoutingError::InfeasibleTour) instead
//! of returning an infinite-length tour.

mod held_karp;
mod nearest_neighbor;
mod two_opt;

pub use held_karp::{held_karp, held_karp_with_limit, HELD_KARP_DEFAULT_LIMIT};
pub use nearest_neighbor::{nearest_neighbor, nearest_neighbor_multi_start};
pub use two_opt::{two_opt, two_opt_with_limit, DEFAULT_MAX_PASSES};

use crate::distance::StopMatrix;
use crate::error::Result;
use crate::models::Tour;

/// The available tour-construction strategies.
///
/// # Examples
///
/// ```
/// use tour_routing::distance::{DistanceMatrix, StopMatrix};
/// use tour_routing::solver::TspAlgorithm;
///
/// let matrix = StopMatrix::from_parts(
///     vec!["a".into(), "b".into(), "c".into(), "d".into()],
///     DistanceMatrix::from_data(4, vec![
///         0.0, 1.0, 2.0, 1.0,
///         1.0, 0.0, 1.0, 2.0,
///         2.0, 1.0, 0.0, 1.0,
///         1.0, 2.0, 1.0, 0.0,
///     ]).unwrap(),
/// ).unwrap();
///
/// for algorithm in [
///     TspAlgorithm::NearestNeighbor,
///     TspAlgorithm::TwoOpt,
///     TspAlgorithm::HeldKarp,
/// ] {
///     let tour = algorithm.solve(&matrix, None, true).unwrap();
///     assert_eq!(tour.length(), 4.0);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TspAlgorithm {
    /// Greedy nearest-neighbor construction.
    NearestNeighbor,
    /// Nearest-neighbor seed refined by 2-opt local search.
    TwoOpt,
    /// Held-Karp exact dynamic program (small instances only).
    HeldKarp,
}

impl TspAlgorithm {
    /// Solves the instance with this strategy.
    ///
    /// `start` defaults to the first stop in matrix order. `HeldKarp`
    /// optimizes the closed cycle, so for it `return_to_start` is implied
    /// and the flag is ignored.
    pub fn solve(
        &self,
        matrix: &StopMatrix,
        start: Option<&str>,
        return_to_start: bool,
    ) -> Result<Tour> {
        match self {
            Self::NearestNeighbor => nearest_neighbor(matrix, start, return_to_start),
            Self::TwoOpt => {
                let seed = nearest_neighbor(matrix, start, return_to_start)?;
                two_opt(matrix, &seed)
            }
            Self::HeldKarp => held_karp(matrix, start),
        }
    }
}
