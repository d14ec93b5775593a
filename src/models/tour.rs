//! Tour value type.

use serde::{Deserialize, Serialize};

/// An ordered visiting sequence over stops, with its total length.
///
/// A closed tour repeats the starting stop as the final element. Tours are
/// value objects: solvers return fresh ones and never mutate their input
/// (2-opt refines a copy).
///
/// # Examples
///
/// ```
/// use tour_routing::models::Tour;
///
/// let tour = Tour::new(vec!["a".into(), "b".into(), "a".into()], 2.0);
/// assert!(tour.is_closed());
/// assert_eq!(tour.num_stops(), 2);
/// assert_eq!(tour.length(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    stops: Vec<String>,
    length: f64,
}

impl Tour {
    /// Creates a tour from a visiting sequence and its total length.
    pub fn new(stops: Vec<String>, length: f64) -> Self {
        Self { stops, length }
    }

    /// The visiting sequence, including the repeated start for closed tours.
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Total tour length (sum of consecutive matrix distances).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns `true` if the tour ends where it started.
    pub fn is_closed(&self) -> bool {
        self.stops.len() > 1 && self.stops.first() == self.stops.last()
    }

    /// Number of distinct visits (the closing repeat is not counted).
    pub fn num_stops(&self) -> usize {
        if self.is_closed() {
            self.stops.len() - 1
        } else {
            self.stops.len()
        }
    }

    /// Returns `true` if the tour visits nothing.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
