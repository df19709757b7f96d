//! Top-level run: housekeeping → selection → encode → success check.
//!
//! Mirrors what an operator reads in the run log: the mode banner, the
//! matched-file count, and the final file location or failure line.

use std::fmt;
use std::path::PathBuf;

use crate::contract::{EncodeError, EncodeRequest, Encoder};
use crate::encode;
use crate::logfile::{self, RunLog};
use crate::params::Params;
use crate::select::{self, SelectConfig, SelectError, SelectMode};

/// One animation run, fully resolved. Built by the CLI layer from
/// flags merged over the parameter file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub select: SelectConfig,
    pub out_dir: PathBuf,
    /// Output file name without extension.
    pub outfile: String,
    pub format: crate::contract::MediaFormat,
}

/// Outcome of a run, for the caller's summary output.
#[derive(Debug)]
pub struct RunReport {
    pub files_matched: usize,
    pub output: PathBuf,
    /// Decided by the post-hoc output-directory scan, not the encoder
    /// exit status.
    pub success: bool,
}

#[derive(Debug)]
pub enum RunError {
    Select(SelectError),
    Encode(EncodeError),
}

impl From<SelectError> for RunError {
    fn from(e: SelectError) -> Self {
        RunError::Select(e)
    }
}

impl From<EncodeError> for RunError {
    fn from(e: EncodeError) -> Self {
        RunError::Encode(e)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(e) => write!(f, "selection failed: {e}"),
            Self::Encode(e) => write!(f, "encode step failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

/// Run one animation build end to end.
pub fn run<E: Encoder>(
    config: &RunConfig,
    params: &Params,
    encoder: &E,
) -> Result<RunReport, RunError> {
    let log = RunLog::new(&params.log_path, &params.log_file);
    log.init(&params.version);
    logfile::check_user_files(&params.store_dir, params.user_limit, &log);

    log.append(&mode_banner(&config.select.mode));
    let files = select::select_files(&config.select)?;
    let files_matched = files.len();
    log.append(&format!("FOUND {files_matched} MATCHED FILES"));
    tracing::info!(count = files_matched, "selection complete");

    let request = EncodeRequest {
        files,
        out_dir: config.out_dir.clone(),
        outfile: config.outfile.clone(),
        format: config.format.clone(),
    };
    let output = request.output_path();
    encode::prevent_overwrite(&output, &log);
    encoder.encode(&request)?;

    let success = encode::output_written(&request.out_dir, &request.outfile);
    if success {
        log.append(&format!(
            "PROCESS COMPLETE: FILE LOCATION - {}",
            output.display()
        ));
        tracing::info!(output = %output.display(), "animation written");
    } else {
        log.append("Animation creation failed...");
        tracing::error!(output = %output.display(), "animation creation failed");
    }

    Ok(RunReport {
        files_matched,
        output,
        success,
    })
}

fn mode_banner(mode: &SelectMode) -> String {
    match mode {
        SelectMode::Forecast {
            past_days,
            future_days,
        } => format!("FORECAST MODE: -{past_days} / +{future_days} days around now"),
        SelectMode::Range { start, end } => {
            format!("RANGE MODE: user input --- START {start} | END {end} ---")
        }
        SelectMode::List { list_file } => {
            format!("LIST MODE: list input --- LISTFILE {}", list_file.display())
        }
        SelectMode::Standard => "STANDARD MODE: no time specification".to_owned(),
    }
}
