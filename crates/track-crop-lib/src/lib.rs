//! Track Crop Library - Selection and Metrics Engine for Recorded GPS Tracks
//!
//! This library holds the logic behind an interactive track cropper: it maps pointer input to
//! track-point indices, keeps a contiguous selection range while the user drags or edits
//! bounds, recomputes distance and elevation statistics, and produces the cropped point
//! sequence handed to the serializer.
//!
//! # Architecture
//!
//! - **[`TrackStore`]**: Immutable-after-load ordered sequence of [`TrackPoint`]s
//! - **[`metrics`]**: Stateless distance and elevation aggregation over index ranges
//! - **[`locator`]**: Maps axis coordinates and longitudes to point indices
//! - **[`SelectionModel`]**: Drag/bounds state machine over a half-open [`SelectionRange`]
//! - **[`crop`]**: Pure sub-sequence extraction for export
//! - **[`CropSession`]**: Host-facing API tying all of the above to one loaded track
//!
//! Parsing, serialization and drawing are collaborators behind the [`TrackParser`],
//! [`TrackSerializer`] and [`Renderer`] traits; [`GpxFormat`] implements the first two.
//!
//! # Usage Example
//!
//! ```rust
//! use track_crop_lib::{Config, CropSession, TrackPoint, TrackStore};
//!
//! let points = (0..10)
//!     .map(|i| TrackPoint::new(51.5, -0.1 + i as f64 * 0.001).with_elevation(i as f64))
//!     .collect();
//! let mut session = CropSession::new(Config::default());
//! session.load(TrackStore::load(points));
//!
//! session.begin_drag(7.0);
//! session.update_drag(2.0);
//! let update = session.end_drag(2.0).unwrap();
//! assert_eq!((update.range.start, update.range.end), (2, 8));
//! assert_eq!(update.metrics.point_count, 6);
//! ```

pub mod crop;
mod format;
pub mod locator;
pub mod metrics;
mod point;
mod render;
mod selection;
mod session;
mod store;
pub mod utils;

// Public API exports
pub use format::{GpxFormat, TrackParser, TrackSerializer};
pub use metrics::AggregateMetrics;
pub use point::TrackPoint;
pub use render::{ElevationView, Renderer, RouteView};
pub use selection::{DragState, SelectionModel, SelectionRange};
pub use session::{Config, CropSession, SessionUpdate};
pub use store::{TrackMetadata, TrackStore};

/// Error types for the track crop engine
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("GPX parsing error: {0}")]
    Parse(#[from] gpx::errors::GpxError),

    #[error("GPX writing error: {0}")]
    Serialize(#[source] gpx::errors::GpxError),

    #[error("Invalid range [{start}, {end}) for a track of {len} points")]
    Range { start: usize, end: usize, len: usize },

    #[error("Empty selection, nothing to export")]
    EmptySelection,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(Config) -> CropSession = CropSession::new;
        let _: fn() -> Config = Config::default;
        let _: fn() -> TrackStore = TrackStore::empty;
    }

    #[test]
    fn test_range_error_display() {
        let err = CropError::Range {
            start: 3,
            end: 2,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid range [3, 2) for a track of 10 points"
        );
    }
}
