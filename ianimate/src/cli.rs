//! CLI surface for ianimate.
//!
//! All business logic lives in `ianimate-core`; this module is
//! argument parsing, the merge of flags over parameter-file defaults,
//! and the run summary.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ianimate_core::encode::SubprocessEncoder;
use ianimate_core::pipeline;

use crate::load_config;

/// CLI for ianimate: build MP4/GIF animations from time-stamped image sets.
#[derive(Parser)]
#[clap(
    name = "ianimate",
    version,
    about = "Build time-ordered MP4/GIF animations from sets of image files"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VideoFormat {
    Mp4,
    Gif,
}

/// Flags shared by every mode.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Directory where images are stored. Omit (or pass `0`) to use
    /// list-file lines as full paths.
    #[clap(long = "search-dir", short = 's')]
    pub search_dir: Option<PathBuf>,

    /// Filename pattern, literal1*literal2*literalN. `0` selects every
    /// file of the image format.
    #[clap(long, short, default_value = "0")]
    pub pattern: String,

    /// Video export format.
    #[clap(long = "video-format", value_enum, default_value_t = VideoFormat::Mp4)]
    pub video_format: VideoFormat,

    /// Input image format suffix.
    #[clap(long = "image-format", default_value = ".png")]
    pub image_format: String,

    /// Parameter file with run defaults. Built-in defaults are used
    /// when omitted.
    #[clap(long = "params")]
    pub parameter_file: Option<PathBuf>,

    /// ffmpeg command template (MP4 only).
    #[clap(long = "command-file", default_value = "commands/default.command")]
    pub command_file: PathBuf,

    /// Output directory. Defaults to the parameter file's store_dir.
    #[clap(long = "out-dir", short = 'o')]
    pub out_dir: Option<PathBuf>,

    /// Output file name, without extension.
    #[clap(long)]
    pub outfile: Option<String>,

    /// Step size in hours between frames.
    #[clap(long = "step-hours")]
    pub step_hours: Option<f64>,

    /// MP4 bitrate in k.
    #[clap(long)]
    pub bitrate: Option<u32>,

    /// MP4 frames per second.
    #[clap(long)]
    pub fps: Option<u32>,

    /// GIF inter-frame delay, hundredths of a second.
    #[clap(long)]
    pub delay: Option<u32>,

    /// GIF loop count, 0 = endless.
    #[clap(long = "loop")]
    pub loop_count: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Time window around now, sized by the parameter file's past/future days.
    Forecast {
        #[clap(flatten)]
        common: CommonArgs,
    },
    /// Explicit start/end time window.
    Range {
        #[clap(flatten)]
        common: CommonArgs,
        /// Window start, YYYY-MM-DD-HH:MM.
        #[clap(long)]
        start: String,
        /// Window end, YYYY-MM-DD-HH:MM.
        #[clap(long)]
        end: String,
    },
    /// Frames listed in a flat text file; order is preserved verbatim.
    List {
        #[clap(flatten)]
        common: CommonArgs,
        /// List file, one path or filename per line.
        #[clap(long = "list-file")]
        list_file: PathBuf,
    },
    /// Everything in the search directory matching the filter; no time matching.
    Standard {
        #[clap(flatten)]
        common: CommonArgs,
    },
}

/// Entrypoint shared by `main` and the CLI tests.
pub fn run(cli: Cli) -> Result<()> {
    let resolved = load_config::resolve(cli.command)?;
    tracing::info!("configuration resolved, starting run");

    let encoder = SubprocessEncoder::new(&resolved.command_file);
    let report = pipeline::run(&resolved.config, &resolved.params, &encoder)?;

    if report.success {
        println!(
            "Animation creation - SUCCESS\n{} frames -> {}",
            report.files_matched,
            report.output.display()
        );
        Ok(())
    } else {
        println!("Animation creation - FAILED");
        anyhow::bail!("no output was written to {}", report.output.display())
    }
}
