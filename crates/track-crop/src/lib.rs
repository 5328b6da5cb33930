//! Track Crop - Application Library
//!
//! This is the host shell around `track-crop-lib`: it parses the command line, sets up
//! logging, reads and writes track files, and feeds input events to a crop session.

mod app;

pub use app::settings::{Command, Settings};
pub use app::{AppError, TrackCropApp};

use std::process::ExitCode;

/// Native entry point
pub fn run_native() -> ExitCode {
    let settings = Settings::from_cli();
    app::logging::setup_logging(settings.verbose, settings.quiet);
    app::logging::log_version_info();

    match TrackCropApp::new(settings).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
