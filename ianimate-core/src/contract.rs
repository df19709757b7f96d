//! Encoder collaborator interface.
//!
//! The selection pipeline never encodes media itself; it hands an
//! ordered frame list plus format parameters to an [`Encoder`]. The
//! trait is implemented by the subprocess encoders in
//! [`crate::encode`] and by generated mocks in tests.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Media format parameters forwarded to the encoder.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MediaFormat {
    Mp4 { fps: u32, bitrate_k: u32 },
    Gif { delay: u32, loop_count: u32 },
}

impl MediaFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            MediaFormat::Mp4 { .. } => "mp4",
            MediaFormat::Gif { .. } => "gif",
        }
    }
}

/// One encode job: the ordered frames plus output placement.
#[derive(Debug, Clone)]
pub struct EncodeRequest {
    pub files: Vec<PathBuf>,
    pub out_dir: PathBuf,
    /// Output file name without extension.
    pub outfile: String,
    pub format: MediaFormat,
}

impl EncodeRequest {
    pub fn output_path(&self) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", self.outfile, self.format.extension()))
    }
}

#[derive(Debug)]
pub enum EncodeError {
    Io(io::Error),
    /// The encoder process could not be launched at all.
    Spawn(String),
    /// The command file did not yield a usable argv.
    Template(String),
}

impl From<io::Error> for EncodeError {
    fn from(e: io::Error) -> Self {
        EncodeError::Io(e)
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Spawn(msg) => write!(f, "failed to launch encoder: {msg}"),
            Self::Template(msg) => write!(f, "command file error: {msg}"),
        }
    }
}

impl std::error::Error for EncodeError {}

/// External encoder collaborator.
///
/// Implementations produce `{out_dir}/{outfile}.{mp4|gif}` from the
/// ordered frames. Callers decide success by inspecting the output
/// directory afterwards, not by this method's result; `Ok` only means
/// the collaborator was invoked.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Encoder {
    fn encode(&self, request: &EncodeRequest) -> Result<(), EncodeError>;
}
