//! Geospatial queries over graph nodes.
//!
//! - [`haversine_distance`] — great-circle distance in meters
//! - [`closest_pair`] — globally nearest node pair across two graphs

mod closest_pair;
mod geo;

pub use closest_pair::{closest_pair, ClosestPair};
pub use geo::{haversine_distance, EARTH_RADIUS_M};
