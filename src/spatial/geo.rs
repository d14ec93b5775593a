//! Great-circle geometry on the spherical-earth approximation.

/// Mean earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Haversine great-circle distance between two lat/lon points, in meters.
///
/// # Examples
///
/// ```
/// use tour_routing::spatial::haversine_distance;
///
/// // One degree of longitude on the equator is about 111.2 km.
/// let d = haversine_distance(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111_195.0).abs() < 1.0);
/// ```
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Embeds a lat/lon point on the unit sphere.
///
/// Euclidean (chord) distance between two such vectors is monotone in the
/// central angle between the points, so chord-nearest is exactly
/// haversine-nearest.
pub(crate) fn unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    let lat_rad = lat.to_radians();
    let lon_rad = lon.to_radians();
    [
        lat_rad.cos() * lon_rad.cos(),
        lat_rad.cos() * lon_rad.sin(),
        lat_rad.sin(),
    ]
}
