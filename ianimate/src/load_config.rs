//! Merges CLI flags over parameter-file defaults into the typed run
//! configuration the core pipeline consumes.
//!
//! This is the configuration boundary: every validation that must
//! happen before filesystem or subprocess work (pattern shape, date
//! formats, step size) happens here and aborts the run on failure.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;

use ianimate_core::contract::MediaFormat;
use ianimate_core::params::{self, Params};
use ianimate_core::pattern::FileFilter;
use ianimate_core::pipeline::RunConfig;
use ianimate_core::select::{SelectConfig, SelectMode};

use crate::cli::{Commands, CommonArgs, VideoFormat};

/// Accepted timestamp format for `--start` / `--end`.
pub const TIME_FORMAT: &str = "%Y-%m-%d-%H:%M";

/// Fully resolved run inputs.
#[derive(Debug)]
pub struct ResolvedRun {
    pub config: RunConfig,
    pub params: Params,
    pub command_file: PathBuf,
}

/// Resolve one subcommand into a validated [`ResolvedRun`].
pub fn resolve(command: Commands) -> Result<ResolvedRun> {
    let (common, mode_inputs) = split(command);

    let mut params = match &common.parameter_file {
        Some(path) => params::load(path)
            .with_context(|| format!("failed to load parameter file {}", path.display()))?,
        None => Params::default(),
    };
    apply_overrides(&mut params, &common);

    if params.time_step <= 0.0 {
        bail!("step size must be a positive number of hours");
    }

    // Pattern shape is a configuration error; reject before any
    // filesystem access.
    let filter = FileFilter::parse(&common.pattern)?;

    let mode = match mode_inputs {
        ModeInputs::Forecast => SelectMode::Forecast {
            past_days: params.past,
            future_days: params.future,
        },
        ModeInputs::Range { start, end } => SelectMode::Range {
            start: parse_time(&start, "start")?,
            end: parse_time(&end, "end")?,
        },
        ModeInputs::List { list_file } => SelectMode::List { list_file },
        ModeInputs::Standard => SelectMode::Standard,
    };

    let search_dir = match common.search_dir {
        Some(dir) if dir.as_os_str() == "0" => None,
        Some(dir) => Some(dir),
        None => match &mode {
            // List lines are full paths without a directory; every
            // other mode searches the current directory by default.
            SelectMode::List { .. } => None,
            _ => Some(PathBuf::from(".")),
        },
    };

    let out_dir = common.out_dir.unwrap_or_else(|| params.store_dir.clone());
    let outfile = common
        .outfile
        .unwrap_or_else(|| default_outfile(&mode, &common.pattern));
    let format = match common.video_format {
        VideoFormat::Mp4 => MediaFormat::Mp4 {
            fps: params.fps,
            bitrate_k: params.bitrate,
        },
        VideoFormat::Gif => MediaFormat::Gif {
            delay: params.delay,
            loop_count: params.loop_count,
        },
    };

    let config = RunConfig {
        select: SelectConfig {
            mode,
            search_dir,
            filter,
            img_format: common.image_format,
            step_hours: params.time_step,
        },
        out_dir,
        outfile,
        format,
    };

    Ok(ResolvedRun {
        config,
        params,
        command_file: common.command_file,
    })
}

enum ModeInputs {
    Forecast,
    Range { start: String, end: String },
    List { list_file: PathBuf },
    Standard,
}

fn split(command: Commands) -> (CommonArgs, ModeInputs) {
    match command {
        Commands::Forecast { common } => (common, ModeInputs::Forecast),
        Commands::Range { common, start, end } => (common, ModeInputs::Range { start, end }),
        Commands::List { common, list_file } => (common, ModeInputs::List { list_file }),
        Commands::Standard { common } => (common, ModeInputs::Standard),
    }
}

fn apply_overrides(params: &mut Params, common: &CommonArgs) {
    if let Some(step) = common.step_hours {
        params.time_step = step;
    }
    if let Some(bitrate) = common.bitrate {
        params.bitrate = bitrate;
    }
    if let Some(fps) = common.fps {
        params.fps = fps;
    }
    if let Some(delay) = common.delay {
        params.delay = delay;
    }
    if let Some(loop_count) = common.loop_count {
        params.loop_count = loop_count;
    }
    if let Some(out_dir) = &common.out_dir {
        params.store_dir = out_dir.clone();
    }
}

fn parse_time(raw: &str, which: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .with_context(|| format!("invalid {which} time '{raw}', expected YYYY-MM-DD-HH:MM"))
}

/// Without an explicit outfile, forecast runs are named after the
/// pattern with the `*` separators stripped; every other mode falls
/// back to the plain default.
fn default_outfile(mode: &SelectMode, pattern: &str) -> String {
    match mode {
        SelectMode::Forecast { .. } if pattern != "0" => pattern.replace('*', ""),
        _ => "animation".to_owned(),
    }
}
