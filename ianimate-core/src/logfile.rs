//! Append-only run log and store-directory housekeeping.
//!
//! The run log is a product artifact, separate from tracing: operators
//! tail it to audit what each batch run selected and produced. Writes
//! are best-effort; a failing log never fails the run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

/// Handle to the configured log file.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(log_path: &Path, log_file: &str) -> Self {
        Self {
            path: log_path.join(log_file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one UTC-stamped line. Failures are swallowed and only
    /// surfaced as a warning.
    pub fn append(&self, message: &str) {
        let stamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let line = format!("{stamp} - {message}\n");
        let result = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| f.write_all(line.as_bytes()));
        if let Err(e) = result {
            tracing::warn!(error = ?e, path = %self.path.display(), "log file not updated");
            println!("Error - logfile not updated: {}", self.path.display());
        }
    }

    /// Create the log on first run and record program startup.
    pub fn init(&self, version: &str) {
        if !self.path.exists() {
            self.append("LOG FILE CREATED");
        }
        self.append(&format!("Initializing Program: Version {version}"));
    }
}

/// Sweep user animations from the store directory once the file count
/// exceeds the configured limit. Only `.gif` and `.mp4` files are
/// removed; everything else stays.
pub fn check_user_files(store_dir: &Path, user_limit: usize, log: &RunLog) {
    let entries: Vec<_> = match fs::read_dir(store_dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).collect(),
        Err(e) => {
            tracing::warn!(error = ?e, dir = %store_dir.display(), "could not list store directory");
            return;
        }
    };

    if entries.len() > user_limit {
        for entry in &entries {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.ends_with(".gif") || name.ends_with(".mp4") {
                if let Err(e) = fs::remove_file(entry.path()) {
                    tracing::warn!(error = ?e, file = %name, "could not remove user animation");
                }
            }
        }
        log.append("User animations removed");
    } else {
        log.append(&format!("Checked user animations ({} files)", entries.len()));
    }
}
