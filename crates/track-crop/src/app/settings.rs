use crate::app::cli::parse_args;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use track_crop_lib::Config;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Track Crop - Inspect a recorded GPS track and keep only the part you want
pub struct Settings {
    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[clap(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Value of the `creator` attribute in written GPX files
    #[clap(long, default_value = "track-crop", global = true)]
    pub creator: String,

    /// Do not copy name, description and author into written files
    #[clap(long, default_value = "false", global = true)]
    pub strip_metadata: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show metrics of one or more GPX files
    Info {
        /// GPX files to inspect
        #[clap(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Print JSON instead of a table
        #[clap(long)]
        json: bool,
    },

    /// Crop a GPX file to an index range and write the result
    Crop {
        /// GPX file to read
        #[clap(value_name = "INPUT")]
        input: PathBuf,

        /// Where to write the cropped track
        #[clap(short, long, value_name = "FILE")]
        output: PathBuf,

        /// First point to keep (default: 0)
        #[clap(short, long)]
        start: Option<usize>,

        /// One past the last point to keep (default: number of points)
        #[clap(short, long)]
        end: Option<usize>,

        /// Reverse the track before selecting
        #[clap(long)]
        reverse: bool,

        /// Name written into the cropped file
        #[clap(long)]
        name: Option<String>,

        /// Print the selection metrics as JSON
        #[clap(long)]
        json: bool,
    },

    /// Edit a selection interactively, one event per line on standard input
    Edit {
        /// GPX file to read
        #[clap(value_name = "INPUT")]
        input: PathBuf,

        /// Default path for the `export` event
        #[clap(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Settings {
    /// Parse settings from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match parse_args::<Settings>() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Session configuration derived from the global flags
    pub fn session_config(&self) -> Config {
        Config {
            creator: self.creator.clone(),
            keep_metadata: !self.strip_metadata,
        }
    }
}
