//! Data handed to a renderer
//!
//! The engine never draws anything itself. On every event the host asks the session for
//! fresh views and passes them to whatever implements [`Renderer`].

use crate::SelectionRange;
use geo::Point;

/// Route (map) view: positions in index order, the selected range and the hovered point
#[derive(Clone, Copy, Debug)]
pub struct RouteView<'a> {
    pub coords: &'a [Point<f64>],
    pub highlight: SelectionRange,
    pub hover: Option<usize>,
}

/// Elevation profile view, indexed like the route view
#[derive(Clone, Copy, Debug)]
pub struct ElevationView<'a> {
    pub elevations: &'a [Option<f64>],
    pub highlight: SelectionRange,
    pub hover: Option<usize>,
}

impl ElevationView<'_> {
    /// Lowest and highest known elevation, if any point has one
    pub fn elevation_bounds(&self) -> Option<(f64, f64)> {
        self.elevations
            .iter()
            .flatten()
            .fold(None, |acc, &e| match acc {
                None => Some((e, e)),
                Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
            })
    }
}

/// Something that can draw the route and elevation views
pub trait Renderer {
    fn render_route(&mut self, view: RouteView<'_>);
    fn render_elevation(&mut self, view: ElevationView<'_>);
}
