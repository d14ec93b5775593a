//! Held-Karp exact TSP solver.
//!
//! # Algorithm
//!
//! Dynamic program over (visited-subset, last-stop) states, subsets
//! encoded as bitmasks in dense arrays: `cost[mask * n + j]` is the
//! cheapest way to start at the origin, visit exactly the stops in
//! `mask`, and end at `j`. The closed-tour answer is
//! `min_j cost[full][j] + D[j][origin]`, and the tour is rebuilt by
//! walking the predecessor table backwards.
//!
//! # Complexity
//!
//! O(2ⁿ · n²) time, O(2ⁿ · n) space — practical only for small n, which
//! is why the stop cap is checked before the tables are allocated.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A dynamic programming approach to
//! sequencing problems", *Journal of SIAM* 10(1), 196-210.

use log::debug;

use crate::distance::StopMatrix;
use crate::error::{Result, RoutingError};
use crate::models::Tour;

/// Default stop cap for the exact solver.
pub const HELD_KARP_DEFAULT_LIMIT: usize = 16;

/// Finds the optimal closed tour with [`HELD_KARP_DEFAULT_LIMIT`] as the
/// stop cap.
///
/// The result is globally optimal under the given matrix: never longer
/// than either heuristic on feasible input. The tour is always closed
/// (the DP optimizes the cycle through all stops).
///
/// `start` picks the origin stop; it defaults to the first stop in matrix
/// order and only rotates the reported cycle, not its length.
///
/// # Examples
///
/// ```
/// use tour_routing::distance::{DistanceMatrix, StopMatrix};
/// use tour_routing::solver::held_karp;
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
/// let tour = held_karp(&matrix, None).unwrap();
/// assert_eq!(tour.length(), 4.0);
/// assert!(tour.is_closed());
/// ```
pub fn held_karp(matrix: &StopMatrix, start: Option<&str>) -> Result<Tour> {
    held_karp_with_limit(matrix, start, HELD_KARP_DEFAULT_LIMIT)
}

/// Finds the optimal closed tour with an explicit stop cap.
///
/// Fails with [`RoutingError::ProblemTooLarge`] when the matrix covers
/// more than `max_stops` stops — checked before the `2ⁿ·n` state tables
/// are allocated — and with [`RoutingError::InfeasibleTour`] when no
/// finite cycle exists.
pub fn held_karp_with_limit(
    matrix: &StopMatrix,
    start: Option<&str>,
    max_stops: usize,
) -> Result<Tour> {
    let n = matrix.len();
    if n == 0 {
        return Err(RoutingError::InfeasibleTour(
            "no stops to visit".to_string(),
        ));
    }
    if n > max_stops {
        return Err(RoutingError::ProblemTooLarge {
            stops: n,
            limit: max_stops,
        });
    }

    let origin = match start {
        Some(id) => matrix
            .index_of(id)
            .ok_or_else(|| RoutingError::StopNotFound(id.to_string()))?,
        None => 0,
    };

    if n == 1 {
        let stop = matrix.stop_at(origin).to_string();
        return Ok(Tour::new(vec![stop.clone(), stop], 0.0));
    }

    let size = 1usize << n;
    let origin_bit = 1usize << origin;
    debug!("held-karp over {} subset states", size * n);

    // cost[mask * n + j]: cheapest origin-rooted path visiting `mask`,
    // ending at j. parent holds the predecessor stop for reconstruction.
    let mut cost = vec![f64::INFINITY; size * n];
    let mut parent = vec![usize::MAX; size * n];
    cost[origin_bit * n + origin] = 0.0;

    for mask in 0..size {
        if mask & origin_bit == 0 {
            continue;
        }
        for j in 0..n {
            if mask & (1 << j) == 0 || j == origin {
                continue;
            }
            let prev_mask = mask ^ (1 << j);
            let mut best_cost = f64::INFINITY;
            let mut best_prev = usize::MAX;
            for k in 0..n {
                if prev_mask & (1 << k) == 0 {
                    continue;
                }
                let via = cost[prev_mask * n + k] + matrix.distance(k, j);
                if via < best_cost {
                    best_cost = via;
                    best_prev = k;
                }
            }
            cost[mask * n + j] = best_cost;
            parent[mask * n + j] = best_prev;
        }
    }

    // Close the cycle back to the origin.
    let full = size - 1;
    let mut optimal = f64::INFINITY;
    let mut last = usize::MAX;
    for j in 0..n {
        if j == origin {
            continue;
        }
        let total = cost[full * n + j] + matrix.distance(j, origin);
        if total < optimal {
            optimal = total;
            last = j;
        }
    }

    if optimal.is_infinite() {
        return Err(RoutingError::InfeasibleTour(
            "no finite cycle through all stops".to_string(),
        ));
    }

    // Walk predecessors from (full, last) back to the origin.
    let mut order = vec![origin];
    let mut mask = full;
    let mut j = last;
    while j != origin {
        order.push(j);
        let prev = parent[mask * n + j];
        mask ^= 1 << j;
        j = prev;
    }
    order.push(origin);
    order.reverse();

    let stops = order
        .into_iter()
        .map(|i| matrix.stop_at(i).to_string())
        .collect();
    Ok(Tour::new(stops, optimal))
}
