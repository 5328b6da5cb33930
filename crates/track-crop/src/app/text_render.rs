//! Plain-text renderer for terminals
//!
//! Draws the elevation profile as a one-line sparkline with the selection and hover marked
//! underneath, and summarizes the route view in a single line.

use std::fmt::Write;
use std::ops::Range;
use track_crop_lib::{ElevationView, Renderer, RouteView};

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders into an in-memory buffer the caller prints
pub struct TextRenderer {
    width: usize,
    output: String,
}

impl TextRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            output: String::new(),
        }
    }

    /// Take everything rendered so far
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Point index range covered by each of the `columns` columns of an `n` point profile
    fn bucket(column: usize, columns: usize, n: usize) -> Range<usize> {
        (column * n / columns)..((column + 1) * n / columns)
    }
}

impl Renderer for TextRenderer {
    fn render_route(&mut self, view: RouteView<'_>) {
        if view.coords.is_empty() {
            let _ = writeln!(self.output, "Route: no points");
            return;
        }

        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lon, mut max_lon) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in view.coords {
            min_lat = min_lat.min(p.y());
            max_lat = max_lat.max(p.y());
            min_lon = min_lon.min(p.x());
            max_lon = max_lon.max(p.x());
        }

        let _ = write!(
            self.output,
            "Route: {} points in lat [{min_lat:.5}, {max_lat:.5}] lon [{min_lon:.5}, {max_lon:.5}], selected [{}, {})",
            view.coords.len(),
            view.highlight.start,
            view.highlight.end,
        );
        if let Some(p) = view.hover.and_then(|i| view.coords.get(i).map(|p| (i, p))) {
            let _ = write!(self.output, ", hover #{} at ({:.5}, {:.5})", p.0, p.1.y(), p.1.x());
        }
        let _ = writeln!(self.output);
    }

    fn render_elevation(&mut self, view: ElevationView<'_>) {
        let n = view.elevations.len();
        let Some((lo, hi)) = view.elevation_bounds() else {
            let _ = writeln!(self.output, "Elevation: no data");
            return;
        };

        let columns = self.width.min(n);
        let span = (hi - lo).max(f64::EPSILON);
        let mut profile = String::with_capacity(columns * 3);
        let mut marks = String::with_capacity(columns);

        for column in 0..columns {
            let bucket = Self::bucket(column, columns, n);
            let peak = view.elevations[bucket.clone()]
                .iter()
                .flatten()
                .fold(None::<f64>, |acc, &e| Some(acc.map_or(e, |a| a.max(e))));

            profile.push(match peak {
                Some(e) => {
                    let level = ((e - lo) / span * (LEVELS.len() - 1) as f64).round() as usize;
                    LEVELS[level.min(LEVELS.len() - 1)]
                }
                None => ' ',
            });

            let hovered = view.hover.is_some_and(|h| bucket.contains(&h));
            let selected =
                bucket.start < view.highlight.end && bucket.end > view.highlight.start;
            marks.push(match (hovered, selected) {
                (true, _) => '^',
                (false, true) => '=',
                (false, false) => ' ',
            });
        }

        let _ = writeln!(self.output, "Elevation: {lo:.0} m .. {hi:.0} m");
        let _ = writeln!(self.output, "  {profile}");
        let _ = writeln!(self.output, "  {}", marks.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use track_crop_lib::{SelectionRange, TrackPoint};

    #[test]
    fn test_profile_marks_selection_and_hover() {
        let elevations: Vec<Option<f64>> = (0..8).map(|i| Some(i as f64 * 10.0)).collect();
        let mut renderer = TextRenderer::new(80);
        renderer.render_elevation(ElevationView {
            elevations: &elevations,
            highlight: SelectionRange { start: 2, end: 5 },
            hover: Some(6),
        });

        let output = renderer.take_output();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Elevation: 0 m .. 70 m");
        assert_eq!(lines[1], "  ▁▂▃▄▅▆▇█");
        assert_eq!(lines[2], "    === ^");
        assert!(renderer.take_output().is_empty());
    }

    #[test]
    fn test_profile_is_downsampled() {
        let elevations: Vec<Option<f64>> = (0..1000).map(|i| Some((i % 50) as f64)).collect();
        let mut renderer = TextRenderer::new(40);
        renderer.render_elevation(ElevationView {
            elevations: &elevations,
            highlight: SelectionRange::full(1000),
            hover: None,
        });
        let output = renderer.take_output();
        let profile = output.lines().nth(1).unwrap();
        assert_eq!(profile.trim_start().chars().count(), 40);
    }

    #[test]
    fn test_missing_elevation() {
        let mut renderer = TextRenderer::new(10);
        renderer.render_elevation(ElevationView {
            elevations: &[None, None],
            highlight: SelectionRange::full(2),
            hover: None,
        });
        assert_eq!(renderer.take_output(), "Elevation: no data\n");
    }

    #[test]
    fn test_route_summary() {
        let coords = [
            TrackPoint::new(46.0, 8.0).position(),
            TrackPoint::new(46.5, 8.25).position(),
        ];
        let mut renderer = TextRenderer::new(10);
        renderer.render_route(RouteView {
            coords: &coords,
            highlight: SelectionRange { start: 0, end: 1 },
            hover: Some(1),
        });
        let output = renderer.take_output();
        assert!(output.contains("2 points"));
        assert!(output.contains("selected [0, 1)"));
        assert!(output.contains("hover #1 at (46.50000, 8.25000)"));
    }
}
