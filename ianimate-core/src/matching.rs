//! Greedy cross-matching of time tokens against candidate files.

use std::path::PathBuf;

use crate::timebase::TimeToken;

/// Pair each time token, in array order, with the first remaining
/// candidate whose path contains the token. A matched candidate is
/// moved out of the pool, so no file appears twice even when the token
/// sequence carries duplicates. Tokens with no remaining match
/// contribute nothing; the result may be shorter than either input.
pub fn match_times(files: Vec<PathBuf>, times: &[TimeToken]) -> Vec<PathBuf> {
    let mut pool = files;
    let mut matched = Vec::new();
    for token in times {
        let hit = pool
            .iter()
            .position(|path| path.to_string_lossy().contains(token.as_str()));
        match hit {
            Some(i) => {
                let file = pool.remove(i);
                tracing::debug!(time = %token, file = %file.display(), "matched time to file");
                matched.push(file);
            }
            None => tracing::debug!(time = %token, "no file for time"),
        }
    }
    tracing::info!(count = matched.len(), "time matching complete");
    matched
}
