//! CropSession - Host-facing API for one loaded track
//!
//! The session owns the current [`TrackStore`], the [`SelectionModel`] over it and the
//! hovered index. Hosts call it once per input event (load, bound edit, pointer
//! press/drag/release, hover, reverse, reset, export); every call applies its effects fully
//! and returns plain data or a typed error. Errors never change the session state.

use crate::{
    AggregateMetrics, DragState, ElevationView, GpxFormat, Renderer, Result, RouteView,
    SelectionModel, SelectionRange, TrackMetadata, TrackParser, TrackSerializer, TrackStore,
    crop, locator, metrics,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a crop session
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// `creator` attribute written into exported files
    pub creator: String,
    /// Carry name, description and author of the loaded track into exports
    pub keep_metadata: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            creator: "track-crop".to_string(),
            keep_metadata: true,
        }
    }
}

/// Selection and its metrics after a state-changing call
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionUpdate {
    pub range: SelectionRange,
    pub metrics: AggregateMetrics,
}

/// One loaded track plus the user's current selection of it
#[derive(Debug, Clone)]
pub struct CropSession {
    config: Config,
    store: TrackStore,
    selection: SelectionModel,
    hover: Option<usize>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl CropSession {
    /// Create a session with no track loaded
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: TrackStore::empty(),
            selection: SelectionModel::new(0),
            hover: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GPX reader/writer matching this session's configuration
    pub fn gpx_format(&self) -> GpxFormat {
        GpxFormat::new(self.config.creator.clone(), self.config.keep_metadata)
    }

    /// Replace the loaded track, selecting all of it
    pub fn load(&mut self, store: TrackStore) -> SessionUpdate {
        tracing::info!("Loading track with {} points", store.len());
        self.store = store;
        self.selection.reset_to(self.store.len());
        self.hover = None;
        self.update()
    }

    /// Parse `bytes` and load the result
    ///
    /// On a parse error the previously loaded track and selection are kept.
    pub fn load_bytes(&mut self, parser: &dyn TrackParser, bytes: &[u8]) -> Result<SessionUpdate> {
        let store = parser.parse(bytes).inspect_err(|e| {
            tracing::warn!("Keeping current track, parse failed: {e}");
        })?;
        Ok(self.load(store))
    }

    #[inline]
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Edit the descriptive fields written on export
    #[inline]
    pub fn metadata_mut(&mut self) -> &mut TrackMetadata {
        self.store.metadata_mut()
    }

    #[inline]
    pub fn selection(&self) -> SelectionRange {
        self.selection.range()
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.selection.drag_state()
    }

    #[inline]
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Set the selection from typed-in bounds `[start, end)`
    pub fn set_bounds(&mut self, start: usize, end: usize) -> Result<SessionUpdate> {
        self.selection.set_bounds(start, end).inspect_err(|e| {
            tracing::debug!("Rejected bounds: {e}");
        })?;
        Ok(self.update())
    }

    /// Pointer pressed on the elevation axis at `x`; returns the anchor index
    pub fn begin_drag(&mut self, x: f64) -> Option<usize> {
        let index = locator::index_at_axis(x, self.store.len())?;
        self.selection.begin_drag(index as i64)
    }

    /// Pointer moved to `x` while pressed
    pub fn update_drag(&mut self, x: f64) -> Option<SessionUpdate> {
        let index = locator::index_at_axis(x, self.store.len())?;
        self.hover = Some(index);
        self.selection.update_drag(index as i64)?;
        Some(self.update())
    }

    /// Pointer released at `x`, fixing the dragged selection
    ///
    /// A release with no usable coordinate still ends the drag, keeping the last selection.
    pub fn end_drag(&mut self, x: f64) -> Option<SessionUpdate> {
        let Some(index) = locator::index_at_axis(x, self.store.len()) else {
            if self.selection.cancel_drag() {
                tracing::debug!("Drag released at unusable coordinate {x}");
            }
            return None;
        };
        self.selection.end_drag(index as i64)?;
        Some(self.update())
    }

    /// Pointer hovering the elevation axis at `x`
    pub fn hover_axis(&mut self, x: f64) -> Option<usize> {
        self.hover = locator::index_at_axis(x, self.store.len());
        self.hover
    }

    /// Pointer hovering the route view at longitude `lon`
    pub fn hover_longitude(&mut self, lon: Option<f64>) -> Option<usize> {
        self.hover = locator::nearest_by_longitude(&self.store, lon);
        self.hover
    }

    /// Reverse the track direction
    ///
    /// Old indices no longer name the same points, so the selection, any drag and the hover
    /// are all reset.
    pub fn reverse(&mut self) -> SessionUpdate {
        tracing::info!("Reversing track of {} points", self.store.len());
        let reversed = self.store.reverse();
        self.load(reversed)
    }

    /// Select the whole track again, cancelling any drag
    pub fn reset(&mut self) -> SessionUpdate {
        self.selection.reset();
        self.update()
    }

    /// Metrics of the whole loaded track
    pub fn full_metrics(&self) -> AggregateMetrics {
        metrics::full_track_metrics(&self.store)
    }

    /// Metrics of the current selection
    pub fn selection_metrics(&self) -> AggregateMetrics {
        metrics::range_metrics(&self.store, self.selection.range())
    }

    /// The selected points as a standalone store
    pub fn cropped(&self) -> Result<TrackStore> {
        crop::crop_store(&self.store, self.selection.range())
    }

    /// Crop the selection and serialize it
    ///
    /// Fails without producing any bytes when the selection is empty.
    pub fn export(&self, serializer: &dyn TrackSerializer) -> Result<Vec<u8>> {
        let cropped = self.cropped()?;
        let bytes = serializer.serialize(&cropped)?;
        tracing::info!(
            "Exported {} points ({} bytes)",
            cropped.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Hand fresh route and elevation views to `renderer`
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let coords = self.store.positions();
        let elevations = self.store.elevations();
        let highlight = self.selection.range();

        renderer.render_route(RouteView {
            coords: &coords,
            highlight,
            hover: self.hover,
        });
        renderer.render_elevation(ElevationView {
            elevations: &elevations,
            highlight,
            hover: self.hover,
        });
    }

    fn update(&self) -> SessionUpdate {
        SessionUpdate {
            range: self.selection.range(),
            metrics: self.selection_metrics(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CropError, TrackPoint};

    const ELEVATIONS: [f64; 10] = [0.0, 5.0, 3.0, 8.0, 2.0, 9.0, 1.0, 4.0, 6.0, 0.0];

    fn loaded_session() -> CropSession {
        let points = ELEVATIONS
            .iter()
            .enumerate()
            .map(|(i, &e)| TrackPoint::new(46.0, 8.0 + i as f64 * 0.001).with_elevation(e))
            .collect();
        let mut session = CropSession::new(Config::default());
        session.load(TrackStore::load(points));
        session
    }

    #[derive(Default)]
    struct RecordingRenderer {
        route: Option<(usize, SelectionRange, Option<usize>)>,
        elevation: Option<(usize, SelectionRange, Option<usize>)>,
    }

    impl Renderer for RecordingRenderer {
        fn render_route(&mut self, view: RouteView<'_>) {
            self.route = Some((view.coords.len(), view.highlight, view.hover));
        }

        fn render_elevation(&mut self, view: ElevationView<'_>) {
            self.elevation = Some((view.elevations.len(), view.highlight, view.hover));
        }
    }

    #[test]
    fn test_load_selects_everything() {
        let session = loaded_session();
        assert_eq!(session.selection(), SelectionRange::full(10));
        assert_eq!(session.selection_metrics(), session.full_metrics());
    }

    #[test]
    fn test_drag_scenario() {
        let mut session = loaded_session();
        assert_eq!(session.begin_drag(7.0), Some(7));
        session.update_drag(2.0);
        let update = session.end_drag(2.0).unwrap();
        assert_eq!(update.range, SelectionRange { start: 2, end: 8 });
        assert_eq!(update.metrics.point_count, 6);
        assert_eq!(session.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_invalid_bounds_keep_selection() {
        let mut session = loaded_session();
        session.set_bounds(2, 6).unwrap();
        assert!(matches!(
            session.set_bounds(3, 2),
            Err(CropError::Range { .. })
        ));
        assert_eq!(session.selection(), SelectionRange { start: 2, end: 6 });

        let update = session.set_bounds(2, 6).unwrap();
        assert_eq!(update.metrics.elevation_gain_m, 12.0);
        assert_eq!(update.metrics.elevation_loss_m, 6.0);
    }

    #[test]
    fn test_reverse_resets_selection_and_hover() {
        let mut session = loaded_session();
        session.set_bounds(1, 4).unwrap();
        session.hover_axis(3.0);
        let before = session.full_metrics();

        let update = session.reverse();
        assert_eq!(update.range, SelectionRange::full(10));
        assert_eq!(session.hover(), None);
        assert_eq!(session.store().get(0).and_then(|p| p.elevation()), Some(0.0));
        assert_eq!(session.store().get(1).and_then(|p| p.elevation()), Some(6.0));

        let after = session.full_metrics();
        assert_eq!(after.elevation_gain_m, before.elevation_loss_m);
        assert_eq!(after.elevation_loss_m, before.elevation_gain_m);
    }

    #[test]
    fn test_release_at_non_finite_coordinate_ends_drag() {
        let mut session = loaded_session();
        session.begin_drag(3.0);
        session.update_drag(5.0);
        assert_eq!(session.end_drag(f64::NAN), None);
        assert_eq!(session.drag_state(), DragState::Idle);
        assert_eq!(session.selection(), SelectionRange { start: 3, end: 6 });

        // A later drag event no longer edits the selection
        assert_eq!(session.update_drag(1.0), None);
        assert_eq!(session.selection(), SelectionRange { start: 3, end: 6 });

        session.begin_drag(2.0);
        assert_eq!(session.end_drag(f64::INFINITY), None);
        assert_eq!(session.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_reset_cancels_drag() {
        let mut session = loaded_session();
        session.begin_drag(4.0);
        session.update_drag(6.0);
        let update = session.reset();
        assert_eq!(update.range, SelectionRange::full(10));
        assert_eq!(session.update_drag(1.0), None);
    }

    #[test]
    fn test_parse_error_keeps_track() {
        let mut session = loaded_session();
        session.set_bounds(1, 3).unwrap();
        let result = session.load_bytes(&GpxFormat::default(), b"<gpx");
        assert!(matches!(result, Err(CropError::Parse(_))));
        assert_eq!(session.store().len(), 10);
        assert_eq!(session.selection(), SelectionRange { start: 1, end: 3 });
    }

    #[test]
    fn test_empty_track_is_inert() {
        let mut session = CropSession::new(Config::default());
        assert_eq!(session.selection(), SelectionRange::full(0));
        assert_eq!(session.full_metrics(), AggregateMetrics::zeroed(0));
        assert_eq!(session.begin_drag(0.0), None);
        assert_eq!(session.hover_axis(0.0), None);
        assert_eq!(session.hover_longitude(Some(8.0)), None);
        assert!(matches!(
            session.export(&GpxFormat::default()),
            Err(CropError::EmptySelection)
        ));
    }

    #[test]
    fn test_hover_by_longitude() {
        let mut session = loaded_session();
        assert_eq!(session.hover_longitude(Some(8.0031)), Some(3));
        assert_eq!(session.hover_longitude(None), None);
    }

    #[test]
    fn test_export_round_trip() {
        let mut session = loaded_session();
        session.set_bounds(3, 7).unwrap();
        let format = session.gpx_format();
        let bytes = session.export(&format).unwrap();

        let reloaded = format.parse(&bytes).unwrap();
        assert_eq!(reloaded.len(), 4);
        for (got, want) in reloaded.points().iter().zip(&session.store().points()[3..7]) {
            assert!((got.latitude() - want.latitude()).abs() < 1e-9);
            assert!((got.longitude() - want.longitude()).abs() < 1e-9);
            assert_eq!(got.elevation(), want.elevation());
        }
    }

    #[test]
    fn test_render_receives_current_state() {
        let mut session = loaded_session();
        session.set_bounds(2, 5).unwrap();
        session.hover_axis(4.2);

        let mut renderer = RecordingRenderer::default();
        session.render(&mut renderer);
        let expected = (10, SelectionRange { start: 2, end: 5 }, Some(4));
        assert_eq!(renderer.route, Some(expected));
        assert_eq!(renderer.elevation, Some(expected));
    }
}
