//! 2-opt tour refinement.
//!
//! # Algorithm
//!
//! For each pair of non-adjacent edges `(prev_i, t[i])` and
//! `(t[j], next_j)` in the tour, compute the change in length from
//! reversing the segment between them:
//!
//! ```text
//! delta = d(prev_i, t[j]) + d(t[i], next_j) - d(prev_i, t[i]) - d(t[j], next_j)
//! ```
//!
//! If delta beats a small epsilon, reverse `t[i..=j]` and keep scanning
//! (first-improvement strategy). Passes repeat until one finds nothing or
//! the pass cap is hit. Each accepted move strictly decreases the length
//! and lengths are bounded below by zero, so the search converges; the cap
//! bounds pathological inputs.
//!
//! The endpoints never move: an open tour keeps its ends, a closed tour
//! keeps its start/finish anchor and the closing edge is considered via
//! the wrap-around successor.
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use log::debug;

use crate::distance::StopMatrix;
use crate::error::{Result, RoutingError};
use crate::models::Tour;

/// Default bound on full improvement passes.
pub const DEFAULT_MAX_PASSES: usize = 1_000;

/// Refines a tour with 2-opt using [`DEFAULT_MAX_PASSES`].
///
/// The input tour is never mutated; the result is a fresh tour whose
/// length is at most the input's. Running the refinement on its own
/// output returns an identical tour (it is already a local optimum).
///
/// Fails with [`RoutingError::StopNotFound`] if the tour references an id
/// outside the matrix and [`RoutingError::InfeasibleTour`] if the tour's
/// length is infinite under the matrix.
///
/// # Examples
///
/// ```
/// use tour_routing::distance::{DistanceMatrix, StopMatrix};
/// use tour_routing::models::Tour;
/// use tour_routing::solver::two_opt;
///
/// // Unit square: adjacent corners 1 apart, diagonals 2.
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
/// // Crossing order a-c-b-d costs 6; 2-opt untangles it to 4.
/// let crossing = Tour::new(
///     vec!["a".into(), "c".into(), "b".into(), "d".into(), "a".into()],
///     6.0,
/// );
/// let improved = two_opt(&matrix, &crossing).unwrap();
/// assert_eq!(improved.length(), 4.0);
/// assert!(improved.is_closed());
/// ```
pub fn two_opt(matrix: &StopMatrix, tour: &Tour) -> Result<Tour> {
    two_opt_with_limit(matrix, tour, DEFAULT_MAX_PASSES)
}

/// Refines a tour with 2-opt, bounding the number of improvement passes.
///
/// `max_passes == 0` returns the input tour unchanged (length still
/// validated). See [`two_opt`] for the contract.
pub fn two_opt_with_limit(matrix: &StopMatrix, tour: &Tour, max_passes: usize) -> Result<Tour> {
    let mut seq = Vec::with_capacity(tour.stops().len());
    for stop in tour.stops() {
        let idx = matrix
            .index_of(stop)
            .ok_or_else(|| RoutingError::StopNotFound(stop.clone()))?;
        seq.push(idx);
    }

    let initial_length = sequence_length(matrix, &seq)?;
    let n = seq.len();
    let closed = tour.is_closed();

    // Too short to contain a pair of non-adjacent edges.
    if n < 4 {
        return Ok(Tour::new(tour.stops().to_vec(), initial_length));
    }

    let mut passes = 0;
    while passes < max_passes {
        passes += 1;
        let mut improved = false;

        for i in 1..n - 2 {
            let prev_i = seq[i - 1];
            for j in i + 1..n - 1 {
                // Successor of j; in a closed tour the last element is the
                // repeated start, so the wrap-around lands on it anyway.
                let next_j = if closed { seq[(j + 1) % n] } else { seq[j + 1] };
                if prev_i == seq[j] || seq[i] == next_j {
                    continue;
                }

                let old_cost = matrix.distance(prev_i, seq[i]) + matrix.distance(seq[j], next_j);
                let new_cost = matrix.distance(prev_i, seq[j]) + matrix.distance(seq[i], next_j);
                if new_cost < old_cost - 1e-10 {
                    seq[i..=j].reverse();
                    improved = true;
                }
            }
        }

        if !improved {
            break;
        }
    }
    debug!("2-opt finished after {passes} passes");

    // The delta formula prices only the two swapped edges. On asymmetric
    // matrices the reversed inner edges change cost too, so the true
    // length is recomputed and the seed kept if it was shorter.
    let length = sequence_length(matrix, &seq)?;
    if length > initial_length {
        return Ok(Tour::new(tour.stops().to_vec(), initial_length));
    }
    let stops = seq
        .into_iter()
        .map(|i| matrix.stop_at(i).to_string())
        .collect();
    Ok(Tour::new(stops, length))
}

/// Sums consecutive matrix distances along an index sequence.
///
/// An infinite sum means the tour crosses an unreachable pair.
fn sequence_length(matrix: &StopMatrix, seq: &[usize]) -> Result<f64> {
    let mut length = 0.0;
    for pair in seq.windows(2) {
        length += matrix.distance(pair[0], pair[1]);
    }
    if length.is_infinite() {
        return Err(RoutingError::InfeasibleTour(
            "tour crosses an unreachable pair".to_string(),
        ));
    }
    Ok(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::solver::nearest_neighbor;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn square_matrix() -> StopMatrix {
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0.0, 1.0, 2.0, 1.0, //
                1.0, 0.0, 1.0, 2.0, //
                2.0, 1.0, 0.0, 1.0, //
                1.0, 2.0, 1.0, 0.0,
            ],
        )
        .expect("valid");
        StopMatrix::from_parts(ids(&["a", "b", "c", "d"]), dm).expect("distinct stops")
    }

    #[test]
    fn test_untangles_crossing_closed_tour() {
        let matrix = square_matrix();
        let crossing = Tour::new(ids(&["a", "c", "b", "d", "a"]), 6.0);
        let improved = two_opt(&matrix, &crossing).expect("feasible");
        assert!((improved.length() - 4.0).abs() < 1e-10);
        assert!(improved.is_closed());
        assert_eq!(improved.stops()[0], "a");
        assert_eq!(improved.num_stops(), 4);
    }

    #[test]
    fn test_already_optimal_is_unchanged() {
        let matrix = square_matrix();
        let optimal = Tour::new(ids(&["a", "b", "c", "d", "a"]), 4.0);
        let result = two_opt(&matrix, &optimal).expect("feasible");
        assert_eq!(result, optimal);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let matrix = square_matrix();
        let crossing = Tour::new(ids(&["a", "c", "b", "d", "a"]), 6.0);
        let once = two_opt(&matrix, &crossing).expect("feasible");
        let twice = two_opt(&matrix, &once).expect("feasible");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_never_worsens() {
        let matrix = square_matrix();
        for order in [["a", "b", "c", "d"], ["a", "c", "b", "d"], ["a", "d", "b", "c"]] {
            let mut stops = ids(&order);
            stops.push("a".to_string());
            let mut length = 0.0;
            for pair in stops.windows(2) {
                length += matrix
                    .distance_between(&pair[0], &pair[1])
                    .expect("known stops");
            }
            let input = Tour::new(stops, length);
            let output = two_opt(&matrix, &input).expect("feasible");
            assert!(output.length() <= input.length() + 1e-10);
        }
    }

    #[test]
    fn test_refines_nearest_neighbor_seed() {
        // Five stops on a ring: the greedy seed is already a local optimum
        // here, so refinement must return it untouched.
        let dm = DistanceMatrix::from_data(
            5,
            vec![
                0.0, 1.0, 3.0, 3.0, 1.0, //
                1.0, 0.0, 1.0, 3.0, 3.0, //
                3.0, 1.0, 0.0, 1.0, 3.0, //
                3.0, 3.0, 1.0, 0.0, 1.0, //
                1.0, 3.0, 3.0, 1.0, 0.0,
            ],
        )
        .expect("valid");
        let matrix =
            StopMatrix::from_parts(ids(&["a", "b", "c", "d", "e"]), dm).expect("distinct");
        let seed = nearest_neighbor(&matrix, None, true).expect("feasible");
        let refined = two_opt(&matrix, &seed).expect("feasible");
        assert!(refined.length() <= seed.length() + 1e-10);
        assert!(refined.is_closed());
    }

    #[test]
    fn test_open_tour_keeps_endpoints() {
        let matrix = square_matrix();
        let open = Tour::new(ids(&["a", "c", "b", "d"]), 0.0);
        let refined = two_opt(&matrix, &open).expect("feasible");
        assert!(!refined.is_closed());
        assert_eq!(refined.stops().first(), open.stops().first());
        assert_eq!(refined.stops().last(), open.stops().last());
    }

    #[test]
    fn test_short_tour_passthrough_with_recomputed_length() {
        let matrix = square_matrix();
        let short = Tour::new(ids(&["a", "b", "c"]), 99.0);
        let result = two_opt(&matrix, &short).expect("feasible");
        assert_eq!(result.stops(), short.stops());
        assert!((result.length() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_pass_cap_returns_input() {
        let matrix = square_matrix();
        let crossing = Tour::new(ids(&["a", "c", "b", "d", "a"]), 6.0);
        let result = two_opt_with_limit(&matrix, &crossing, 0).expect("feasible");
        assert_eq!(result.stops(), crossing.stops());
        assert!((result.length() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_stop_in_tour() {
        let matrix = square_matrix();
        let tour = Tour::new(ids(&["a", "z", "b", "c"]), 1.0);
        assert_eq!(
            two_opt(&matrix, &tour).err(),
            Some(RoutingError::StopNotFound("z".to_string()))
        );
    }

    #[test]
    fn test_infeasible_input_tour() {
        let mut dm = DistanceMatrix::new(4);
        for i in 0..4 {
            dm.set(i, i, 0.0);
        }
        dm.set(0, 1, 1.0);
        dm.set(1, 2, 1.0);
        // c -> d missing entirely.
        let matrix = StopMatrix::from_parts(ids(&["a", "b", "c", "d"]), dm).expect("distinct");
        let tour = Tour::new(ids(&["a", "b", "c", "d"]), f64::INFINITY);
        assert!(matches!(
            two_opt(&matrix, &tour),
            Err(RoutingError::InfeasibleTour(_))
        ));
    }

    #[test]
    fn test_input_tour_is_not_mutated() {
        let matrix = square_matrix();
        let crossing = Tour::new(ids(&["a", "c", "b", "d", "a"]), 6.0);
        let before = crossing.clone();
        let _ = two_opt(&matrix, &crossing).expect("feasible");
        assert_eq!(crossing, before);
    }
}
