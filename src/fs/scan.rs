//! Best-effort directory enumeration

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::entry::Entry;

/// Read the direct children of `folder`, in the order the OS returns them.
///
/// Never fails: if the folder cannot be listed (permission denied, vanished
/// mid-scan) the result is empty, never a partial listing. Children that
/// cannot be stat'ed are skipped.
pub fn scan_folder(folder: &Path) -> Vec<Entry> {
    match fs::read_dir(folder) {
        Ok(read_dir) => collect_entries(folder, read_dir.map(|child| child.map(|c| c.path()))),
        Err(e) => {
            tracing::warn!("Cannot list {}: {}", folder.display(), e);
            Vec::new()
        }
    }
}

fn collect_entries(folder: &Path, children: impl IntoIterator<Item = io::Result<PathBuf>>) -> Vec<Entry> {
    let mut entries = Vec::new();
    for child in children {
        let path = match child {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Scan of {} interrupted: {}", folder.display(), e);
                return Vec::new();
            }
        };
        match Entry::from_path(&path) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    tracing::debug!("Scanned {} ({} entries)", folder.display(), entries.len());
    entries
}

/// Number of direct children of a folder, 0 if it cannot be listed
pub fn count_children(folder: &Path) -> u64 {
    fs::read_dir(folder)
        .map(|read_dir| read_dir.count() as u64)
        .unwrap_or(0)
}
