//! Track storage module
//!
//! This module provides the `TrackStore` struct: the ordered, index-addressed sequence of
//! points everything else in the crate refers to, plus the descriptive metadata read from
//! the GPX header.

use crate::{CropError, Result, TrackPoint};
use geo::Point;
use time::OffsetDateTime;

/// Descriptive fields of a track, carried through cropping and export
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub time: Option<OffsetDateTime>,
}

impl TrackMetadata {
    /// Read the header fields of a GPX document, falling back to the first track's
    /// name and description when the header has none
    pub fn from_gpx(gpx: &gpx::Gpx) -> Self {
        let header = gpx.metadata.as_ref();
        let first_track = gpx.tracks.first();
        let author = header.and_then(|m| m.author.as_ref());

        Self {
            name: header
                .and_then(|m| m.name.clone())
                .or_else(|| first_track.and_then(|t| t.name.clone())),
            description: header
                .and_then(|m| m.description.clone())
                .or_else(|| first_track.and_then(|t| t.description.clone())),
            author_name: author.and_then(|a| a.name.clone()),
            author_email: author.and_then(|a| a.email.clone()),
            time: header.and_then(|m| m.time.clone()).map(OffsetDateTime::from),
        }
    }

    /// Convert into a GPX header block
    pub fn to_gpx_metadata(&self) -> gpx::Metadata {
        let mut metadata = gpx::Metadata::default();
        metadata.name = self.name.clone();
        metadata.description = self.description.clone();
        metadata.time = self.time.map(gpx::Time::from);

        if self.author_name.is_some() || self.author_email.is_some() {
            let mut author = gpx::Person::default();
            author.name = self.author_name.clone();
            author.email = self.author_email.clone();
            metadata.author = Some(author);
        }

        metadata
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Ordered sequence of track points, indexed `0..len()` in recording order
///
/// The point sequence never changes after construction. Operations that would reorder
/// points ([`TrackStore::reverse`]) build a new store so that indices held elsewhere can
/// never silently refer to different points.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackStore {
    points: Vec<TrackPoint>,
    metadata: TrackMetadata,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackStore {
    /// Create a store holding the given points in order
    ///
    /// Empty tracks are legal; consumers treat them as "nothing to display or select".
    pub fn load(points: Vec<TrackPoint>) -> Self {
        let skipped = points
            .iter()
            .filter(|p| !p.latitude().is_finite() || !p.longitude().is_finite())
            .count();
        if skipped > 0 {
            tracing::warn!("Track contains {skipped} points with non-finite coordinates");
        }
        tracing::debug!("Loaded track store with {} points", points.len());

        Self {
            points,
            metadata: TrackMetadata::default(),
        }
    }

    /// Create an empty store
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a store from GPX data
    ///
    /// All segments of all tracks are concatenated in document order.
    pub fn from_gpx(gpx: &gpx::Gpx) -> Self {
        #[cfg(feature = "profiling")]
        profiling::scope!("store::from_gpx");

        let points = gpx
            .tracks
            .iter()
            .flat_map(|track| track.segments.iter())
            .flat_map(|segment| segment.points.iter())
            .map(TrackPoint::from)
            .collect();

        Self::load(points).with_metadata(TrackMetadata::from_gpx(gpx))
    }

    pub fn with_metadata(mut self, metadata: TrackMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Return a new store with the point order reversed
    ///
    /// Index `i` of the result holds the point at index `len() - 1 - i` of `self`.
    pub fn reverse(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            metadata: self.metadata.clone(),
        }
    }

    /// Copy out the points in `start..end`
    ///
    /// Fails with [`CropError::Range`] unless `start <= end <= len()`.
    pub fn slice(&self, start: usize, end: usize) -> Result<Vec<TrackPoint>> {
        if start > end || end > self.points.len() {
            return Err(CropError::Range {
                start,
                end,
                len: self.points.len(),
            });
        }
        Ok(self.points[start..end].to_vec())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&TrackPoint> {
        self.points.get(index)
    }

    #[inline]
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    #[inline]
    pub fn metadata(&self) -> &TrackMetadata {
        &self.metadata
    }

    #[inline]
    pub fn metadata_mut(&mut self) -> &mut TrackMetadata {
        &mut self.metadata
    }

    /// Positions as `geo` points, in index order
    pub fn positions(&self) -> Vec<Point<f64>> {
        self.points.iter().map(TrackPoint::position).collect()
    }

    pub fn longitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(TrackPoint::longitude)
    }

    pub fn latitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(TrackPoint::latitude)
    }

    /// Elevations in index order, `None` where a point has no elevation
    pub fn elevations(&self) -> Vec<Option<f64>> {
        self.points.iter().map(TrackPoint::elevation).collect()
    }
}
