//! Subprocess encoders: ImageMagick `convert` for GIF, ffmpeg for MP4.
//!
//! The MP4 path is driven by a command file so operators can change
//! the ffmpeg invocation without touching code. The frame list is
//! handed to ffmpeg through a concat demuxer manifest written next to
//! the output and removed afterwards.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::contract::{EncodeError, EncodeRequest, Encoder, MediaFormat};
use crate::logfile::RunLog;

/// Manifest file name for the ffmpeg concat demuxer.
const INPUT_LIST_NAME: &str = "temp_png_list.txt";

/// Encoder that shells out to `convert` / `ffmpeg`.
pub struct SubprocessEncoder {
    command_file: PathBuf,
}

impl SubprocessEncoder {
    pub fn new(command_file: impl Into<PathBuf>) -> Self {
        Self {
            command_file: command_file.into(),
        }
    }
}

impl Encoder for SubprocessEncoder {
    fn encode(&self, request: &EncodeRequest) -> Result<(), EncodeError> {
        match request.format {
            MediaFormat::Gif { delay, loop_count } => encode_gif(request, delay, loop_count),
            MediaFormat::Mp4 { fps, bitrate_k } => {
                encode_mp4(request, &self.command_file, fps, bitrate_k)
            }
        }
    }
}

fn encode_gif(request: &EncodeRequest, delay: u32, loop_count: u32) -> Result<(), EncodeError> {
    let output = request.output_path();
    let mut cmd = Command::new("convert");
    cmd.arg("-delay")
        .arg(delay.to_string())
        .arg("-loop")
        .arg(loop_count.to_string());
    for file in &request.files {
        cmd.arg(file);
    }
    cmd.arg(&output);

    tracing::info!(frames = request.files.len(), output = %output.display(), "creating GIF");
    let status = cmd
        .status()
        .map_err(|e| EncodeError::Spawn(format!("convert: {e}")))?;
    // Exit status is logged only; success is decided by the caller's
    // output-existence check.
    if !status.success() {
        tracing::warn!(status = ?status, "convert exited with non-zero code");
    }
    Ok(())
}

fn encode_mp4(
    request: &EncodeRequest,
    command_file: &Path,
    fps: u32,
    bitrate_k: u32,
) -> Result<(), EncodeError> {
    let output = request.output_path();
    let input_list = request.out_dir.join(INPUT_LIST_NAME);

    let mut manifest = fs::File::create(&input_list)?;
    for file in &request.files {
        writeln!(manifest, "file '{}'", file.display())?;
    }
    drop(manifest);

    let argv = read_command_template(command_file, &input_list, fps, bitrate_k, &output)?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| EncodeError::Template("command file is empty".to_owned()))?;

    tracing::info!(
        frames = request.files.len(),
        output = %output.display(),
        command = ?argv,
        "creating MP4"
    );
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| EncodeError::Spawn(format!("{program}: {e}")));
    let _ = fs::remove_file(&input_list);
    let status = status?;
    if !status.success() {
        tracing::warn!(status = ?status, "ffmpeg exited with non-zero code");
    }
    Ok(())
}

/// Render the command-file template into a full argv.
///
/// The template is one line of comma-separated tokens. Tokens
/// containing `fps`, `input_list`, `bitrate` or `outfile` are replaced
/// with the run's values; everything else passes through trimmed. The
/// bitrate is rendered with its `k` suffix.
pub fn read_command_template(
    command_file: &Path,
    input_list: &Path,
    fps: u32,
    bitrate_k: u32,
    output: &Path,
) -> Result<Vec<String>, EncodeError> {
    let raw = fs::read_to_string(command_file)?;
    let mut argv = Vec::new();
    for token in raw.trim().split(',') {
        if token.contains("fps") {
            argv.push(fps.to_string());
        } else if token.contains("input_list") {
            argv.push(input_list.to_string_lossy().into_owned());
        } else if token.contains("bitrate") {
            argv.push(format!("{bitrate_k}k"));
        } else if token.contains("outfile") {
            argv.push(output.to_string_lossy().into_owned());
        } else {
            argv.push(token.trim().to_owned());
        }
    }
    Ok(argv)
}

/// Remove a pre-existing output file of the same name before encoding.
pub fn prevent_overwrite(output: &Path, log: &RunLog) {
    if output.exists() {
        match fs::remove_file(output) {
            Ok(()) => log.append(&format!("Existing file {} removed.", output.display())),
            Err(e) => tracing::warn!(error = ?e, path = %output.display(), "could not remove existing output"),
        }
    }
}

/// Post-hoc success check: scan the output directory for any file
/// whose name contains the output stem. A stale file with a matching
/// name counts as written.
pub fn output_written(out_dir: &Path, outfile: &str) -> bool {
    let entries = match fs::read_dir(out_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = ?e, dir = %out_dir.display(), "could not list output directory");
            return false;
        }
    };
    for entry in entries.filter_map(|e| e.ok()) {
        if entry.file_name().to_string_lossy().contains(outfile) {
            return true;
        }
    }
    false
}
