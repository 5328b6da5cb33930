//! Distance and elevation statistics over index ranges of a track
//!
//! All functions here are stateless: results are derived from the store on every call, so
//! a value computed before a reload, reversal or selection change must be requested again.

use crate::{SelectionRange, TrackPoint, TrackStore, utils};

/// Summary statistics for a run of consecutive track points
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateMetrics {
    /// Number of points in the run
    pub point_count: usize,
    /// Great-circle length in meters, summed in sequence order
    pub distance_m: f64,
    /// Sum of positive elevation deltas in meters
    pub elevation_gain_m: f64,
    /// Sum of negative elevation deltas in meters, as a positive number
    pub elevation_loss_m: f64,
    /// Seconds between the first and last point, when both carry a timestamp
    pub duration_s: Option<f64>,
}

impl AggregateMetrics {
    /// Metrics of a run that has no consecutive pairs
    pub fn zeroed(point_count: usize) -> Self {
        Self {
            point_count,
            ..Default::default()
        }
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    #[inline]
    pub fn duration_hours(&self) -> Option<f64> {
        self.duration_s.map(|s| s / 3600.0)
    }
}

/// Metrics of the whole track
pub fn full_track_metrics(store: &TrackStore) -> AggregateMetrics {
    #[cfg(feature = "profiling")]
    profiling::scope!("metrics::full_track_metrics");

    points_metrics(store.points())
}

/// Metrics of the points in `range`
///
/// A range reaching past the end of the store is clamped to it first. Ranges with fewer
/// than two points have no distance or elevation change and report zero sums.
pub fn range_metrics(store: &TrackStore, range: SelectionRange) -> AggregateMetrics {
    #[cfg(feature = "profiling")]
    profiling::scope!("metrics::range_metrics");

    let range = range.clamped(store.len());
    points_metrics(&store.points()[range.as_range()])
}

/// Metrics of an arbitrary point slice, in slice order
pub fn points_metrics(points: &[TrackPoint]) -> AggregateMetrics {
    if points.len() < 2 {
        return AggregateMetrics::zeroed(points.len());
    }

    let mut metrics = AggregateMetrics::zeroed(points.len());
    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        metrics.distance_m += utils::haversine_distance(prev.position(), curr.position());

        // A missing elevation on either side contributes nothing
        if let (Some(a), Some(b)) = (prev.elevation(), curr.elevation()) {
            let delta = b - a;
            if delta > 0.0 {
                metrics.elevation_gain_m += delta;
            } else if delta < 0.0 {
                metrics.elevation_loss_m -= delta;
            }
        }
    }

    metrics.duration_s = match (points[0].time(), points[points.len() - 1].time()) {
        (Some(first), Some(last)) => Some((last - first).as_seconds_f64()),
        _ => None,
    };

    metrics
}
