use crate::app::cli::get_env;
use tracing_subscriber::EnvFilter;

/// Default filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn,track_crop=info,track_crop_lib=info",
        (false, 1) => "info,track_crop=debug,track_crop_lib=debug",
        (false, _) => "debug,track_crop=trace,track_crop_lib=trace",
    }
}

/// Initialize logging to stderr, keeping stdout for results.
///
/// Behavior:
/// - If RUST_LOG is set, it wins.
/// - Otherwise the level follows the `-v`/`--quiet` flags.
pub fn setup_logging(verbose: u8, quiet: bool) {
    let filter = match get_env::<String>("RUST_LOG") {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(default_filter(verbose, quiet)),
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(err) = result {
        eprintln!("Logging already initialized: {err}");
    }
}

/// Log name and version of this build.
pub fn log_version_info() {
    tracing::info!("{}", short_version_info());
}

pub fn short_version_info() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0, true), "error");
        assert_eq!(default_filter(3, true), "error");
        assert!(default_filter(0, false).starts_with("warn"));
        assert!(default_filter(1, false).contains("track_crop_lib=debug"));
        assert!(default_filter(5, false).contains("trace"));
    }

    #[test]
    fn test_short_version_info() {
        assert!(short_version_info().starts_with("track-crop "));
    }
}
