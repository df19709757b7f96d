//! Coarse filename filtering by composite substring patterns.
//!
//! A pattern is a `*`-delimited set of literal substrings. Matching is
//! plain co-occurrence: a file matches when the configured image-format
//! suffix and every literal substring appear somewhere in its name, in
//! any order. There are no glob semantics beyond the split on `*`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq, Eq)]
pub enum PatternError {
    /// Pattern argument was an empty string.
    Empty,
    /// `*` at the first or last position would produce an empty
    /// substring, which matches everything.
    StarAtEdge,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "a pattern must be provided in this mode"),
            Self::StarAtEdge => write!(
                f,
                "* must be placed within the pattern (e.g. pattern1*pattern2*pattern3)"
            ),
        }
    }
}

impl std::error::Error for PatternError {}

/// Filename filter built from the user's pattern argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFilter {
    /// The `0` sentinel: keep every file of the configured image format.
    All,
    /// Literal substrings split from the pattern, all of which must occur.
    Substrings(Vec<String>),
}

impl FileFilter {
    /// Parse the raw pattern argument. `"0"` selects everything of the
    /// image format and bypasses validation; anything else must be
    /// non-empty and must not start or end with `*`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if raw == "0" {
            return Ok(FileFilter::All);
        }
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        if raw.starts_with('*') || raw.ends_with('*') {
            return Err(PatternError::StarAtEdge);
        }
        let substrings = raw.split('*').map(str::to_owned).collect();
        Ok(FileFilter::Substrings(substrings))
    }

    /// Substring co-occurrence test against one file name.
    pub fn matches(&self, file_name: &str, img_format: &str) -> bool {
        if !file_name.contains(img_format) {
            return false;
        }
        match self {
            FileFilter::All => true,
            FileFilter::Substrings(subs) => subs.iter().all(|s| file_name.contains(s.as_str())),
        }
    }
}

/// List `search_dir` and keep the entries the filter accepts.
///
/// Result order is the directory listing order; sorting, where
/// required, happens at the selection orchestrator boundary.
pub fn pattern_match(
    search_dir: &Path,
    filter: &FileFilter,
    img_format: &str,
) -> io::Result<Vec<PathBuf>> {
    let mut matched = Vec::new();
    for entry in fs::read_dir(search_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if filter.matches(&name.to_string_lossy(), img_format) {
            matched.push(entry.path());
        }
    }
    tracing::info!(
        count = matched.len(),
        dir = %search_dir.display(),
        "pattern match complete"
    );
    Ok(matched)
}
