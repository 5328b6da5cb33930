//! Single recorded track sample

use geo::Point;
use time::OffsetDateTime;

/// One recorded sample of a track: position, optional elevation and optional timestamp
///
/// Positions follow the `geo` convention (x = longitude, y = latitude, degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPoint {
    position: Point<f64>,
    elevation: Option<f64>,
    time: Option<OffsetDateTime>,
}

impl TrackPoint {
    /// Create a point without elevation or timestamp
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Point::new(longitude, latitude),
            elevation: None,
            time: None,
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn with_time(mut self, time: OffsetDateTime) -> Self {
        self.time = Some(time);
        self
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.position.x()
    }

    #[inline]
    pub fn position(&self) -> Point<f64> {
        self.position
    }

    #[inline]
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    #[inline]
    pub fn time(&self) -> Option<OffsetDateTime> {
        self.time
    }

    /// Convert back into a GPX waypoint, carrying elevation and time unchanged
    pub fn to_waypoint(&self) -> gpx::Waypoint {
        let mut waypoint = gpx::Waypoint::new(self.position);
        waypoint.elevation = self.elevation;
        waypoint.time = self.time.map(gpx::Time::from);
        waypoint
    }
}

impl From<&gpx::Waypoint> for TrackPoint {
    fn from(waypoint: &gpx::Waypoint) -> Self {
        Self {
            position: waypoint.point(),
            elevation: waypoint.elevation,
            time: waypoint.time.clone().map(OffsetDateTime::from),
        }
    }
}
