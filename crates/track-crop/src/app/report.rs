//! Human and JSON summaries of tracks and selections

use serde::Serialize;
use std::fmt::Write;
use track_crop_lib::{AggregateMetrics, SelectionRange, TrackMetadata};

/// JSON shape of one inspected file
#[derive(Serialize, Debug)]
pub struct FileReport<'a> {
    pub file: String,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub metrics: AggregateMetrics,
}

/// JSON shape of a crop result
#[derive(Serialize, Debug)]
pub struct CropReport {
    pub range: SelectionRange,
    pub metrics: AggregateMetrics,
    pub output: String,
}

/// Metrics as an aligned key/value table
pub fn metrics_table(metrics: &AggregateMetrics) -> String {
    let duration = metrics
        .duration_hours()
        .map(|h| format!("{h:.2}"))
        .unwrap_or_else(|| "-".to_string());

    let mut out = String::new();
    let rows = [
        ("Points", metrics.point_count.to_string()),
        ("Distance (km)", format!("{:.2}", metrics.distance_km())),
        ("Duration (hrs)", duration),
        ("Elevation Gain (m)", format!("{:.0}", metrics.elevation_gain_m)),
        ("Elevation Loss (m)", format!("{:.0}", metrics.elevation_loss_m)),
    ];
    for (key, value) in rows {
        let _ = writeln!(out, "  {:<20}{value}", format!("{key}:"));
    }
    out
}

/// Descriptive fields that are present, one per line
pub fn metadata_table(metadata: &TrackMetadata) -> String {
    let time = metadata.time.map(|t| t.to_string());
    let rows = [
        ("Name", metadata.name.as_deref()),
        ("Description", metadata.description.as_deref()),
        ("Author Name", metadata.author_name.as_deref()),
        ("Author Email", metadata.author_email.as_deref()),
        ("Time", time.as_deref()),
    ];

    let mut out = String::new();
    for (key, value) in rows {
        if let Some(value) = value {
            let _ = writeln!(out, "  {:<20}{value}", format!("{key}:"));
        }
    }
    out
}

/// One-line selection summary
pub fn selection_line(range: SelectionRange, metrics: &AggregateMetrics) -> String {
    format!(
        "Selection [{}, {}): {} points, {:.2} km, +{:.0} m / -{:.0} m",
        range.start,
        range.end,
        metrics.point_count,
        metrics.distance_km(),
        metrics.elevation_gain_m,
        metrics.elevation_loss_m,
    )
}
