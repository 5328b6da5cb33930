use clap::Parser;

/// Generic function to get environment variable, parsing it to the desired type.
pub fn get_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

/// Parses from the command line arguments, leaving error reporting to the caller.
pub fn parse_args<T: Parser>() -> Result<T, clap::Error> {
    T::try_parse()
}
