//! Bounded cache of scanned folders

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::fs::Entry;

/// Default number of folders kept before the cache is flushed
pub const DEFAULT_CAPACITY: usize = 100;

/// Scanned entries of one folder, in scan order
#[derive(Clone, Debug)]
pub struct FolderListing {
    pub folder_path: PathBuf,
    pub entries: Vec<Entry>,
}

/// Maps a folder path (exact spelling, not canonicalized) to its last scan.
/// Keys are the raw path bytes, so `a/` and `a` are different folders here.
///
/// When an insert of a new folder would exceed the capacity the whole cache
/// is cleared first. There is no per-entry eviction.
#[derive(Debug)]
pub struct FolderCache {
    capacity: usize,
    folders: HashMap<OsString, FolderListing>,
}

impl Default for FolderCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl FolderCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            folders: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    #[cfg(test)]
    pub fn contains(&self, folder_path: &Path) -> bool {
        self.folders.contains_key(folder_path.as_os_str())
    }

    pub fn get(&self, folder_path: &Path) -> Option<&FolderListing> {
        self.folders.get(folder_path.as_os_str())
    }

    /// Insert or overwrite a listing, flushing everything first if a new
    /// folder would not fit.
    pub fn insert(&mut self, listing: FolderListing) {
        if !self.folders.contains_key(listing.folder_path.as_os_str()) && self.len() >= self.capacity() {
            tracing::debug!(
                "Folder cache full ({}/{} folders), clearing before caching {}",
                self.len(),
                self.capacity(),
                listing.folder_path.display()
            );
            self.folders.clear();
        }
        self.folders.insert(listing.folder_path.as_os_str().to_owned(), listing);
    }

}
