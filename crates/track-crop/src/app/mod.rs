//! Application module
//!
//! Dispatches the parsed command line to one of three front-ends over the library:
//! - `info`: metrics of one or more files, loaded in parallel
//! - `crop`: one-shot crop by index range
//! - `edit`: the line-driven editing shell on standard input

pub(crate) mod cli;
pub(crate) mod logging;
mod report;
pub(crate) mod settings;
mod shell;
mod text_render;

use crate::app::report::{CropReport, FileReport, metadata_table, metrics_table, selection_line};
use crate::app::settings::{Command, Settings};
use crate::app::shell::Shell;
use rayon::prelude::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use track_crop_lib::{CropError, CropSession, GpxFormat, TrackStore};

/// Errors surfaced to the user by the command line front-end
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Crop(#[from] CropError),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{failed} of {total} files could not be read")]
    Failed { failed: usize, total: usize },
}

/// Main application structure
pub struct TrackCropApp {
    settings: Settings,
}

#[profiling::all_functions]
impl TrackCropApp {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run the selected command to completion
    pub fn run(self) -> Result<(), AppError> {
        let format = self.format();
        match &self.settings.command {
            Command::Info { files, json } => self.info(&format, files, *json),
            Command::Crop {
                input,
                output,
                start,
                end,
                reverse,
                name,
                json,
            } => {
                let mut session = self.open(&format, input)?;
                if *reverse {
                    session.reverse();
                }
                let len = session.store().len();
                let update = session.set_bounds(start.unwrap_or(0), end.unwrap_or(len))?;
                if let Some(name) = name {
                    session.metadata_mut().name = Some(name.clone());
                }

                let cropped = session.cropped()?;
                format.write_file(output, &cropped)?;

                let mut stdout = io::stdout().lock();
                if *json {
                    let report = CropReport {
                        range: update.range,
                        metrics: update.metrics,
                        output: output.display().to_string(),
                    };
                    serde_json::to_writer_pretty(&mut stdout, &report)?;
                    writeln!(stdout)?;
                } else {
                    writeln!(stdout, "{}", selection_line(update.range, &update.metrics))?;
                    writeln!(stdout, "Saved to {}", output.display())?;
                }
                Ok(())
            }
            Command::Edit { input, output } => {
                let session = self.open(&format, input)?;
                self.edit(session, output.clone(), io::stdin().lock(), &mut io::stdout())
            }
        }
    }

    fn format(&self) -> GpxFormat {
        let config = self.settings.session_config();
        GpxFormat::new(config.creator, config.keep_metadata)
    }

    fn open(&self, format: &GpxFormat, input: &Path) -> Result<CropSession, AppError> {
        let mut session = CropSession::new(self.settings.session_config());
        session.load(format.read_file(input)?);
        Ok(session)
    }

    fn info(&self, format: &GpxFormat, files: &[PathBuf], json: bool) -> Result<(), AppError> {
        let loaded: Vec<(&PathBuf, Result<TrackStore, CropError>)> = files
            .par_iter()
            .map(|path| {
                profiling::scope!("info::read_file");
                (path, format.read_file(path))
            })
            .collect();

        let mut failed = 0;
        let mut reports = Vec::with_capacity(loaded.len());
        for (path, result) in &loaded {
            match result {
                Ok(store) => reports.push((path, store)),
                Err(e) => {
                    failed += 1;
                    tracing::error!("{}: {e}", path.display());
                }
            }
        }

        let mut stdout = io::stdout().lock();
        if json {
            let reports: Vec<FileReport<'_>> = reports
                .iter()
                .map(|(path, store)| FileReport {
                    file: path.display().to_string(),
                    name: store.metadata().name.as_deref(),
                    description: store.metadata().description.as_deref(),
                    metrics: track_crop_lib::metrics::full_track_metrics(store),
                })
                .collect();
            serde_json::to_writer_pretty(&mut stdout, &reports)?;
            writeln!(stdout)?;
        } else {
            for (path, store) in &reports {
                writeln!(stdout, "{}", path.display())?;
                write!(stdout, "{}", metadata_table(store.metadata()))?;
                write!(
                    stdout,
                    "{}",
                    metrics_table(&track_crop_lib::metrics::full_track_metrics(store))
                )?;
            }
        }

        if failed > 0 {
            return Err(AppError::Failed {
                failed,
                total: files.len(),
            });
        }
        Ok(())
    }

    fn edit<R: BufRead, W: Write>(
        &self,
        session: CropSession,
        output: Option<PathBuf>,
        input: R,
        out: &mut W,
    ) -> Result<(), AppError> {
        tracing::info!(
            "Editing {} points, type `help` for the list of events",
            session.store().len()
        );
        let mut shell = Shell::new(session, output);
        shell.run(input, out)
    }
}
