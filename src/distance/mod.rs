//! Distance matrices over stop subsets.
//!
//! - [`DistanceMatrix`] — dense row-major pairwise distances
//! - [`StopMatrix`] — matrix + id↔index mapping + realizing paths, built
//!   from one shortest-path run per stop

mod builder;
mod matrix;

pub use builder::StopMatrix;
pub use matrix::DistanceMatrix;
