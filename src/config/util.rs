//! Configuration utility functions.

use super::Format;
use std::path::{Path, PathBuf};

/// Find a document `<stem>.toml` or `<stem>.json` directly inside `dir`.
///
/// TOML wins when both exist.
pub fn find_document(dir: &Path, stem: &str) -> Option<PathBuf> {
    [Format::Toml, Format::Json]
        .iter()
        .map(|format| dir.join(format!("{stem}.{}", format.extension())))
        .find(|candidate| candidate.is_file())
}

/// Find a config document by searching upward from `start`
///
/// Walks up parent directories until a directory holds `<stem>.toml` or
/// `<stem>.json`. Returns the path of the document.
///
/// # Example
/// ```text
/// /home/user/docs/content/guide/  ← start
/// /home/user/docs/site.toml       ← found!
/// ```
pub fn find_config_file(start: &Path, stem: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if let Some(found) = find_document(current, stem) {
            return Some(found);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================
