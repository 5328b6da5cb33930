//! Event-driven editing shell
//!
//! Reads one input event per line and applies it to a [`CropSession`]. Each event's
//! effects are applied and reported before the next line is read. A failing event is
//! reported once and the shell moves on; nothing is retried.

use crate::app::AppError;
use crate::app::report::{metadata_table, metrics_table, selection_line};
use crate::app::text_render::TextRenderer;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use track_crop_lib::{CropSession, SessionUpdate};

const HELP: &str = "\
Events:
  bounds START END   select [START, END) directly
  press X            start a drag on the elevation axis at X
  drag X             extend the drag to X
  release X          finish the drag at X
  hover X            hover the elevation axis at X
  hover-lon [LON]    hover the route at longitude LON
  reverse            reverse the track (resets the selection)
  reset              select the whole track
  name TEXT          set the name written on export
  show               draw the route and elevation profile
  stats              show whole-track and selection metrics
  export [PATH]      write the selection as GPX
  help               show this text
  quit               leave the shell";

/// One line of shell input
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Bounds(usize, usize),
    Press(f64),
    Drag(f64),
    Release(f64),
    Hover(f64),
    HoverLongitude(Option<f64>),
    Reverse,
    Reset,
    Name(String),
    Show,
    Stats,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

fn parse_arg<T: FromStr>(command: &str, value: Option<&str>) -> Result<T, AppError> {
    let value = value.ok_or_else(|| AppError::InvalidEvent(format!("`{command}` needs a value")))?;
    value
        .parse()
        .map_err(|_| AppError::InvalidEvent(format!("`{command}`: cannot parse `{value}`")))
}

impl FromStr for Event {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        let event = match command {
            "bounds" => Event::Bounds(
                parse_arg(command, args.next())?,
                parse_arg(command, args.next())?,
            ),
            "press" => Event::Press(parse_arg(command, args.next())?),
            "drag" => Event::Drag(parse_arg(command, args.next())?),
            "release" => Event::Release(parse_arg(command, args.next())?),
            "hover" => Event::Hover(parse_arg(command, args.next())?),
            "hover-lon" => Event::HoverLongitude(match args.next() {
                Some(value) => Some(parse_arg(command, Some(value))?),
                None => None,
            }),
            "reverse" => Event::Reverse,
            "reset" => Event::Reset,
            "name" if rest.is_empty() => {
                return Err(AppError::InvalidEvent("`name` needs a value".to_string()));
            }
            "name" => Event::Name(rest.to_string()),
            "show" => Event::Show,
            "stats" => Event::Stats,
            "export" => Event::Export(args.next().map(PathBuf::from)),
            "help" | "?" => Event::Help,
            "quit" | "exit" => Event::Quit,
            other => return Err(AppError::InvalidEvent(format!("unknown event `{other}`"))),
        };
        Ok(event)
    }
}

/// What the shell does after an event
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Interactive editor over one loaded track
pub struct Shell {
    session: CropSession,
    output_path: Option<PathBuf>,
    renderer: TextRenderer,
}

impl Shell {
    pub fn new(session: CropSession, output_path: Option<PathBuf>) -> Self {
        Self {
            session,
            output_path,
            renderer: TextRenderer::new(72),
        }
    }

    pub fn session(&self) -> &CropSession {
        &self.session
    }

    /// Process events from `input` until it ends or a `quit` event arrives
    ///
    /// Only I/O failures on `input`/`out` abort the loop; event errors are printed.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), AppError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let result = trimmed.parse::<Event>().and_then(|event| {
                tracing::debug!("Event: {event:?}");
                self.apply(event)
            });
            match result {
                Ok(Outcome::Continue(message)) => {
                    if !message.is_empty() {
                        writeln!(out, "{}", message.trim_end())?;
                    }
                }
                Ok(Outcome::Quit) => break,
                Err(e) => {
                    tracing::warn!("{e}");
                    writeln!(out, "error: {e}")?;
                }
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Apply a single event to the session
    pub fn apply(&mut self, event: Event) -> Result<Outcome, AppError> {
        let message = match event {
            Event::Bounds(start, end) => describe(self.session.set_bounds(start, end)?),
            Event::Press(x) => match self.session.begin_drag(x) {
                Some(anchor) => format!("Drag anchored at {anchor}"),
                None => "Nothing to select".to_string(),
            },
            Event::Drag(x) => match self.session.update_drag(x) {
                Some(update) => describe(update),
                None => "No drag in progress".to_string(),
            },
            Event::Release(x) => match self.session.end_drag(x) {
                Some(update) => describe(update),
                None => "No drag in progress".to_string(),
            },
            Event::Hover(x) => {
                let index = self.session.hover_axis(x);
                self.describe_hover(index)
            }
            Event::HoverLongitude(lon) => {
                let index = self.session.hover_longitude(lon);
                self.describe_hover(index)
            }
            Event::Reverse => describe(self.session.reverse()),
            Event::Reset => describe(self.session.reset()),
            Event::Name(name) => {
                self.session.metadata_mut().name = Some(name.clone());
                format!("Name set to {name}")
            }
            Event::Show => {
                self.session.render(&mut self.renderer);
                self.renderer.take_output()
            }
            Event::Stats => self.stats(),
            Event::Export(path) => self.export(path)?,
            Event::Help => HELP.to_string(),
            Event::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(message))
    }

    fn describe_hover(&self, index: Option<usize>) -> String {
        match index.and_then(|i| self.session.store().get(i).map(|p| (i, p))) {
            Some((i, point)) => {
                let elevation = point
                    .elevation()
                    .map(|e| format!("{e:.1} m"))
                    .unwrap_or_else(|| "no elevation".to_string());
                format!(
                    "Point {i}: ({:.6}, {:.6}), {elevation}",
                    point.latitude(),
                    point.longitude()
                )
            }
            None => "No point under the pointer".to_string(),
        }
    }

    fn stats(&self) -> String {
        let mut out = metadata_table(self.session.store().metadata());
        out.push_str("Whole track:\n");
        out.push_str(&metrics_table(&self.session.full_metrics()));
        let range = self.session.selection();
        out.push_str(&format!("Selection [{}, {}):\n", range.start, range.end));
        out.push_str(&metrics_table(&self.session.selection_metrics()));
        out
    }

    fn export(&self, path: Option<PathBuf>) -> Result<String, AppError> {
        let path = path
            .or_else(|| self.output_path.clone())
            .ok_or_else(|| AppError::InvalidEvent("`export` needs a path".to_string()))?;

        // Serialize first so an empty selection never touches the file
        let bytes = self.session.export(&self.session.gpx_format())?;
        std::fs::write(&path, bytes)?;
        Ok(format!(
            "Saved {} points to {}",
            self.session.selection().len(),
            path.display()
        ))
    }
}

fn describe(update: SessionUpdate) -> String {
    selection_line(update.range, &update.metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use track_crop_lib::{Config, SelectionRange, TrackPoint, TrackStore};

    fn shell_with_track() -> Shell {
        let elevations = [0.0, 5.0, 3.0, 8.0, 2.0, 9.0, 1.0, 4.0, 6.0, 0.0];
        let points = elevations
            .iter()
            .enumerate()
            .map(|(i, &e)| TrackPoint::new(46.0, 8.0 + i as f64 * 0.001).with_elevation(e))
            .collect();
        let mut session = CropSession::new(Config::default());
        session.load(TrackStore::load(points));
        Shell::new(session, None)
    }

    fn run_script(shell: &mut Shell, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_events() {
        assert_eq!("bounds 3 7".parse::<Event>().unwrap(), Event::Bounds(3, 7));
        assert_eq!("  press 7.5 ".parse::<Event>().unwrap(), Event::Press(7.5));
        assert_eq!(
            "hover-lon -0.12".parse::<Event>().unwrap(),
            Event::HoverLongitude(Some(-0.12))
        );
        assert_eq!("hover-lon".parse::<Event>().unwrap(), Event::HoverLongitude(None));
        assert_eq!(
            "name Lake  loop".parse::<Event>().unwrap(),
            Event::Name("Lake  loop".to_string())
        );
        assert_eq!("export".parse::<Event>().unwrap(), Event::Export(None));
        assert!("bounds 3".parse::<Event>().is_err());
        assert!("drag left".parse::<Event>().is_err());
        assert!("name".parse::<Event>().is_err());
        assert!("jump 4".parse::<Event>().is_err());
    }

    #[test]
    fn test_drag_script() {
        let mut shell = shell_with_track();
        let output = run_script(&mut shell, "press 7\ndrag 4\nrelease 2\n");
        assert_eq!(shell.session().selection(), SelectionRange { start: 2, end: 8 });
        assert!(output.contains("Drag anchored at 7"));
        assert!(output.ends_with("Selection [2, 8): 6 points, 0.39 km, +15 m / -14 m\n"));
    }

    #[test]
    fn test_errors_do_not_stop_the_shell() {
        let mut shell = shell_with_track();
        let output = run_script(
            &mut shell,
            "# comment\n\nbounds 2 6\nbounds 3 2\nfly away\nreset\nquit\nbounds 1 2\n",
        );
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Selection [2, 6): 4 points"));
        assert!(lines[1].starts_with("error: Invalid range [3, 2)"));
        assert!(lines[2].starts_with("error: Invalid event: unknown event `fly`"));
        assert!(lines[3].starts_with("Selection [0, 10)"));
        // Nothing after quit is applied
        assert_eq!(shell.session().selection(), SelectionRange::full(10));
    }

    #[test]
    fn test_hover_reports_point() {
        let mut shell = shell_with_track();
        let output = run_script(&mut shell, "hover 3.2\nhover-lon 8.0049\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Point 3: (46.000000, 8.003000), 8.0 m");
        assert_eq!(lines[1], "Point 5: (46.000000, 8.005000), 9.0 m");
    }

    #[test]
    fn test_release_nan_ends_drag() {
        let mut shell = shell_with_track();
        let output = run_script(&mut shell, "press 3\ndrag 5\nrelease nan\ndrag 1\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[2], "No drag in progress");
        assert_eq!(lines[3], "No drag in progress");
        assert_eq!(shell.session().selection(), SelectionRange { start: 3, end: 6 });
    }

    #[test]
    fn test_export_without_path_fails() {
        let mut shell = shell_with_track();
        let output = run_script(&mut shell, "export\n");
        assert_eq!(output, "error: Invalid event: `export` needs a path\n");
    }

    #[test]
    fn test_show_renders_profile() {
        let mut shell = shell_with_track();
        let output = run_script(&mut shell, "bounds 2 5\nshow\n");
        assert!(output.contains("Route: 10 points"));
        assert!(output.contains("Elevation: 0 m .. 9 m"));
    }
}
