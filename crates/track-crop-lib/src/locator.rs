//! Mapping pointer coordinates to track-point indices
//!
//! Two addressing modes are supported:
//! - the horizontal axis of the elevation profile, whose domain is the index range itself
//! - a longitude picked on the route view, resolved to the point with the closest longitude
//!
//! Both are linear in the worst case at most, which is fine for interactive track sizes.

use crate::{TrackStore, utils::clamp_index};

/// Index under an elevation-profile axis coordinate `x` for a track of `len` points
///
/// Rounds to the nearest index and clamps into `0..len`. Returns `None` for an empty
/// track or a non-finite coordinate.
#[inline]
pub fn index_at_axis(x: f64, len: usize) -> Option<usize> {
    if !x.is_finite() {
        return None;
    }
    // Saturating float-to-int cast, then the explicit clamp
    clamp_index(x.round() as i64, len)
}

/// Index of the point whose longitude is closest to `lon`
///
/// Ties resolve to the smallest index. Returns `None` for an empty track or when the
/// pointer event carried no usable longitude.
pub fn nearest_by_longitude(store: &TrackStore, lon: Option<f64>) -> Option<usize> {
    #[cfg(feature = "profiling")]
    profiling::scope!("locator::nearest_by_longitude");

    let lon = lon.filter(|l| l.is_finite())?;

    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in store.longitudes().enumerate() {
        let distance = (candidate - lon).abs();
        // Strict comparison keeps the first occurrence; NaN never wins
        if best.is_none_or(|(_, d)| distance < d) && !distance.is_nan() {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}
