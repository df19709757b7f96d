//! Parameter file loading.
//!
//! A parameter file carries the run defaults as colon-delimited
//! `key: value` lines. Individual fields are overridden afterwards by
//! CLI flags; the merge happens at the configuration boundary, not
//! here.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Run defaults from a parameter file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Params {
    pub version: String,
    pub log_path: PathBuf,
    pub log_file: String,
    /// Directory holding user-produced animations.
    pub store_dir: PathBuf,
    /// Time array step in hours.
    pub time_step: f64,
    /// MP4 bitrate in k.
    pub bitrate: u32,
    pub fps: u32,
    /// GIF inter-frame delay, hundredths of a second.
    pub delay: u32,
    /// GIF loop count, 0 = endless.
    pub loop_count: u32,
    /// Animation count above which the store directory is swept.
    pub user_limit: usize,
    /// Forecast window: days before now.
    pub past: f64,
    /// Forecast window: days after now.
    pub future: f64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            version: env!("CARGO_PKG_VERSION").to_owned(),
            log_path: PathBuf::from("."),
            log_file: "ianimate.log".to_owned(),
            store_dir: PathBuf::from("."),
            time_step: 6.0,
            bitrate: 1000,
            fps: 10,
            delay: 20,
            loop_count: 0,
            user_limit: 600,
            past: 3.0,
            future: 4.0,
        }
    }
}

#[derive(Debug)]
pub enum ParamsError {
    Io(io::Error),
    /// Line without a `key: value` separator.
    Malformed { line: usize },
    /// Known key whose value failed to parse.
    Invalid { key: String, value: String },
}

impl From<io::Error> for ParamsError {
    fn from(e: io::Error) -> Self {
        ParamsError::Io(e)
    }
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Malformed { line } => {
                write!(f, "parameter file line {line} is not 'key: value'")
            }
            Self::Invalid { key, value } => {
                write!(f, "parameter '{key}' has invalid value '{value}'")
            }
        }
    }
}

impl std::error::Error for ParamsError {}

/// Load a parameter file over the built-in defaults.
///
/// Blank lines and `#` comments are skipped; unknown keys are logged
/// and ignored so parameter files can carry site-local extras.
pub fn load(path: &Path) -> Result<Params, ParamsError> {
    let raw = fs::read_to_string(path)?;
    let mut params = Params::default();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(ParamsError::Malformed { line: idx + 1 });
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "version" => params.version = value.to_owned(),
            "log_path" => params.log_path = PathBuf::from(value),
            "log_file" => params.log_file = value.to_owned(),
            "store_dir" => params.store_dir = PathBuf::from(value),
            "time_step" => params.time_step = parse_value(key, value)?,
            "bitrate" => params.bitrate = parse_value(key, value)?,
            "fps" => params.fps = parse_value(key, value)?,
            "delay" => params.delay = parse_value(key, value)?,
            "loop" => params.loop_count = parse_value(key, value)?,
            "user_limit" => params.user_limit = parse_value(key, value)?,
            "past" => params.past = parse_value(key, value)?,
            "future" => params.future = parse_value(key, value)?,
            other => tracing::debug!(key = other, "ignoring unknown parameter"),
        }
    }
    tracing::info!(path = %path.display(), "parameter file loaded");
    Ok(params)
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ParamsError> {
    value.parse().map_err(|_| ParamsError::Invalid {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}
