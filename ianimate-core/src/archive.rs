//! Search over a year/month partitioned image archive.
//!
//! The archive lays source imagery out as `root/YYYY/<MonthName>/`.
//! This is the same greedy pairing problem as [`crate::matching`], but
//! against directory listings resolved per token instead of one flat
//! candidate list.

use std::fs;
use std::path::{Path, PathBuf};

use crate::timebase::TimeToken;

/// Directory name for a two-digit month component.
fn month_name(mm: &str) -> Option<&'static str> {
    Some(match mm {
        "01" => "January",
        "02" => "February",
        "03" => "March",
        "04" => "April",
        "05" => "May",
        "06" => "June",
        "07" => "July",
        "08" => "August",
        "09" => "September",
        "10" => "October",
        "11" => "November",
        "12" => "December",
        _ => return None,
    })
}

/// Find one archive file per time token.
///
/// Consecutive tokens in the same year and month share one directory
/// listing, which is depleted as files match so no file is selected
/// twice. A file counts only when its name contains both the token and
/// the image-format suffix. Missing year/month directories are logged
/// and skipped; their tokens contribute zero matches and the search
/// continues.
pub fn structured_search(root: &Path, times: &[TimeToken], img_format: &str) -> Vec<PathBuf> {
    let mut matched = Vec::new();
    let mut prev_key: Option<(String, &'static str)> = None;
    let mut listing: Vec<String> = Vec::new();
    let mut current_dir = PathBuf::new();

    for token in times {
        let Some(month) = month_name(token.month()) else {
            tracing::warn!(time = %token, "token has no valid month component");
            continue;
        };
        let key = (token.year().to_owned(), month);
        if prev_key.as_ref() != Some(&key) {
            current_dir = root.join(token.year()).join(month);
            listing = match fs::read_dir(&current_dir) {
                Ok(entries) => entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect(),
                Err(_) => {
                    tracing::warn!(
                        dir = %current_dir.display(),
                        "archive directory does not exist, skipping"
                    );
                    Vec::new()
                }
            };
            prev_key = Some(key);
        }

        let hit = listing
            .iter()
            .position(|name| name.contains(token.as_str()) && name.contains(img_format));
        if let Some(i) = hit {
            let name = listing.remove(i);
            tracing::debug!(time = %token, file = %name, "found archive file");
            matched.push(current_dir.join(name));
        }
    }

    tracing::info!(count = matched.len(), "structured search complete");
    matched
}

#[cfg(test)]
mod tests {
    use super::month_name;

    #[test]
    fn month_table_covers_all_twelve_months() {
        assert_eq!(month_name("01"), Some("January"));
        assert_eq!(month_name("06"), Some("June"));
        assert_eq!(month_name("09"), Some("September"));
        assert_eq!(month_name("12"), Some("December"));
        assert_eq!(month_name("13"), None);
        assert_eq!(month_name("1"), None);
    }
}
