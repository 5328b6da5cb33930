//! Extraction of the selected sub-sequence for export
//!
//! Cropping is a plain copy of consecutive points: no resampling, interpolation or
//! smoothing. It either yields the whole requested range or fails.

use crate::{CropError, Result, SelectionRange, TrackPoint, TrackStore};

/// Copy the points in `range` out of `store`
///
/// Fails with [`CropError::EmptySelection`] when the range selects nothing, and with
/// [`CropError::Range`] when it reaches past the end of the store.
pub fn crop(store: &TrackStore, range: SelectionRange) -> Result<Vec<TrackPoint>> {
    if range.is_empty() {
        return Err(CropError::EmptySelection);
    }
    store.slice(range.start, range.end)
}

/// Like [`crop`], but keeps the track metadata alongside the cropped points
pub fn crop_store(store: &TrackStore, range: SelectionRange) -> Result<TrackStore> {
    let points = crop(store, range)?;
    tracing::debug!(
        "Cropped [{}, {}) out of {} points",
        range.start,
        range.end,
        store.len()
    );
    Ok(TrackStore::load(points).with_metadata(store.metadata().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrackMetadata;
    use time::macros::datetime;

    fn sample_store() -> TrackStore {
        let start = datetime!(2024-06-01 08:00:00 UTC);
        TrackStore::load(
            (0..10)
                .map(|i| {
                    TrackPoint::new(47.0 + i as f64 * 0.001, 11.0)
                        .with_elevation(600.0 + i as f64)
                        .with_time(start + time::Duration::seconds(i * 10))
                })
                .collect(),
        )
        .with_metadata(TrackMetadata {
            name: Some("Valley walk".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_crop_copies_points_unchanged() {
        let store = sample_store();
        let cropped = crop(&store, SelectionRange { start: 3, end: 7 }).unwrap();
        assert_eq!(cropped.len(), 4);
        assert_eq!(cropped.as_slice(), &store.points()[3..7]);
    }

    #[test]
    fn test_empty_selection_fails() {
        let store = sample_store();
        assert!(matches!(
            crop(&store, SelectionRange { start: 4, end: 4 }),
            Err(CropError::EmptySelection)
        ));
        assert!(matches!(
            crop(&TrackStore::empty(), SelectionRange::full(0)),
            Err(CropError::EmptySelection)
        ));
    }

    #[test]
    fn test_range_past_end_fails() {
        let store = sample_store();
        assert!(matches!(
            crop(&store, SelectionRange { start: 5, end: 12 }),
            Err(CropError::Range { len: 10, .. })
        ));
    }

    #[test]
    fn test_crop_store_keeps_metadata() {
        let store = sample_store();
        let cropped = crop_store(&store, SelectionRange { start: 0, end: 2 }).unwrap();
        assert_eq!(cropped.len(), 2);
        assert_eq!(cropped.metadata().name.as_deref(), Some("Valley walk"));
    }
}
