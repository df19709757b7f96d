//! Selection orchestrator: turns a run configuration into the ordered
//! file list the encoder consumes.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime, Utc};

use crate::archive;
use crate::matching;
use crate::pattern::{pattern_match, FileFilter};
use crate::timebase;

/// How the frame set is chosen. A closed set of modes; each arm calls
/// a narrowly-typed handler.
#[derive(Debug, Clone)]
pub enum SelectMode {
    /// Window around "now": `past` days back to `future` days ahead.
    Forecast { past_days: f64, future_days: f64 },
    /// Explicit start/end window.
    Range {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Verbatim frame list from a flat text file.
    List { list_file: PathBuf },
    /// Everything in the search directory matching the filter; time is
    /// not considered.
    Standard,
}

/// Inputs to one selection run.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    pub mode: SelectMode,
    /// `None` means no directory was given; list-file lines are then
    /// used as full paths.
    pub search_dir: Option<PathBuf>,
    pub filter: FileFilter,
    /// Image format suffix required of every candidate, e.g. `.png`.
    pub img_format: String,
    /// Time array step in hours.
    pub step_hours: f64,
}

#[derive(Debug)]
pub enum SelectError {
    Io(io::Error),
    /// The selected mode requires a search directory.
    NoSearchDir,
}

impl From<io::Error> for SelectError {
    fn from(e: io::Error) -> Self {
        SelectError::Io(e)
    }
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::NoSearchDir => write!(f, "this mode requires a search directory"),
        }
    }
}

impl std::error::Error for SelectError {}

/// Produce the ordered frame list for the encoder.
///
/// Time-window modes either pattern-match a flat directory and then
/// cross-match time tokens against it, or walk the structured archive
/// when no pattern was given. The result is sorted lexicographically,
/// except for list input, whose order is preserved verbatim.
pub fn select_files(config: &SelectConfig) -> Result<Vec<PathBuf>, SelectError> {
    let mut files = match &config.mode {
        SelectMode::Forecast {
            past_days,
            future_days,
        } => {
            let now = Utc::now().naive_utc();
            let start = now - days(*past_days);
            let end = now + days(*future_days);
            tracing::info!(%start, %end, "forecast window");
            select_window(config, start, end)?
        }
        SelectMode::Range { start, end } => select_window(config, *start, *end)?,
        SelectMode::List { list_file } => {
            tracing::info!(list = %list_file.display(), "reading list file");
            return Ok(read_list(config.search_dir.as_deref(), list_file)?);
        }
        SelectMode::Standard => {
            let dir = search_dir(config)?;
            pattern_match(dir, &config.filter, &config.img_format)?
        }
    };
    files.sort();
    Ok(files)
}

fn days(d: f64) -> Duration {
    Duration::milliseconds((d * 86_400_000.0).round() as i64)
}

fn search_dir(config: &SelectConfig) -> Result<&Path, SelectError> {
    config
        .search_dir
        .as_deref()
        .ok_or(SelectError::NoSearchDir)
}

fn select_window(
    config: &SelectConfig,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<PathBuf>, SelectError> {
    let times = timebase::build_time_array(start, end, config.step_hours);
    let dir = search_dir(config)?;
    match &config.filter {
        FileFilter::Substrings(_) => {
            let candidates = pattern_match(dir, &config.filter, &config.img_format)?;
            Ok(matching::match_times(candidates, &times))
        }
        // No pattern: the directory is a year/month archive.
        FileFilter::All => Ok(archive::structured_search(dir, &times, &config.img_format)),
    }
}

/// Read a flat list file, one path per line. With a search directory
/// each line is a filename joined to it; without one the lines are
/// full paths. Order is preserved as-is and never re-sorted.
pub fn read_list(search_dir: Option<&Path>, list_file: &Path) -> io::Result<Vec<PathBuf>> {
    let raw = fs::read_to_string(list_file)?;
    let files = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match search_dir {
            Some(dir) => dir.join(line),
            None => PathBuf::from(line),
        })
        .collect::<Vec<_>>();
    tracing::info!(count = files.len(), "list file read");
    Ok(files)
}
