//! Track file parsing and serialization
//!
//! The engine only ever sees [`TrackStore`]s; turning bytes into points and back is the job
//! of a [`TrackParser`] / [`TrackSerializer`]. [`GpxFormat`] implements both for GPX files.

use crate::{CropError, Result, TrackStore};
use std::io::BufReader;
use std::path::Path;

/// Turns a track file's bytes into an ordered point sequence
pub trait TrackParser {
    fn parse(&self, bytes: &[u8]) -> Result<TrackStore>;
}

/// Turns an ordered point sequence back into a track file's bytes
pub trait TrackSerializer {
    fn serialize(&self, store: &TrackStore) -> Result<Vec<u8>>;
}

/// GPX 1.1 reader and writer
#[derive(Clone, Debug)]
pub struct GpxFormat {
    /// Value of the `creator` attribute on written files
    pub creator: String,
    /// Whether to write name, description and author back out
    pub keep_metadata: bool,
}

impl Default for GpxFormat {
    fn default() -> Self {
        Self {
            creator: "track-crop".to_string(),
            keep_metadata: true,
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl GpxFormat {
    pub fn new(creator: impl Into<String>, keep_metadata: bool) -> Self {
        Self {
            creator: creator.into(),
            keep_metadata,
        }
    }

    /// Build the GPX document written for `store`: one track with one segment
    pub fn to_gpx(&self, store: &TrackStore) -> gpx::Gpx {
        let mut segment = gpx::TrackSegment::default();
        segment.points = store.points().iter().map(|p| p.to_waypoint()).collect();

        let mut track = gpx::Track::default();
        if self.keep_metadata {
            track.name = store.metadata().name.clone();
        }
        track.segments.push(segment);

        let mut gpx = gpx::Gpx::default();
        gpx.version = gpx::GpxVersion::Gpx11;
        gpx.creator = Some(self.creator.clone());
        if self.keep_metadata && !store.metadata().is_empty() {
            gpx.metadata = Some(store.metadata().to_gpx_metadata());
        }
        gpx.tracks.push(track);
        gpx
    }

    /// Read and parse a GPX file from disk
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<TrackStore> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let gpx = gpx::read(BufReader::new(file))?;
        let store = TrackStore::from_gpx(&gpx);
        tracing::info!("Loaded {} points from {}", store.len(), path.display());
        Ok(store)
    }

    /// Serialize `store` and write it to disk
    pub fn write_file(&self, path: impl AsRef<Path>, store: &TrackStore) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.serialize(store)?;
        std::fs::write(path, bytes)?;
        tracing::info!("Wrote {} points to {}", store.len(), path.display());
        Ok(())
    }
}

impl TrackParser for GpxFormat {
    fn parse(&self, bytes: &[u8]) -> Result<TrackStore> {
        let gpx = gpx::read(bytes)?;
        Ok(TrackStore::from_gpx(&gpx))
    }
}

impl TrackSerializer for GpxFormat {
    fn serialize(&self, store: &TrackStore) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        gpx::write(&self.to_gpx(store), &mut bytes).map_err(CropError::Serialize)?;
        Ok(bytes)
    }
}
