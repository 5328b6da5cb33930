//! Utility functions for distances and index arithmetic

use geo::Point;

/// Mean Earth radius in meters used for great-circle distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance between two WGS84 points in meters
///
/// Points use the `geo` convention: x is longitude, y is latitude, both in degrees.
#[inline]
pub fn haversine_distance(p1: Point<f64>, p2: Point<f64>) -> f64 {
    let lat1 = p1.y().to_radians();
    let lat2 = p2.y().to_radians();
    let delta_lat = (p2.y() - p1.y()).to_radians();
    let delta_lon = (p2.x() - p1.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Clamp a signed index into `0..len`
///
/// Returns `None` for an empty sequence, where no index is valid.
#[inline]
pub fn clamp_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let max = (len - 1) as i64;
    Some(index.clamp(0, max) as usize)
}
