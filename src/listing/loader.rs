//! Folder loading: cache lookup, filtering and ordering

use std::path::Path;

use crate::fs::{Entry, scan_folder};

use super::cache::{FolderCache, FolderListing};
use super::sort::{SortMode, sort_entries};

/// The view settings a displayed listing depends on
#[derive(Clone, Copy, Debug)]
pub struct ListingFilter<'a> {
    pub show_hidden: bool,
    pub sort_mode: SortMode,
    /// Case-sensitive substring; empty means no filtering
    pub query: &'a str,
}

impl Default for ListingFilter<'_> {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort_mode: SortMode::default(),
            query: "",
        }
    }
}

impl ListingFilter<'_> {
    /// Whether an entry survives the hidden and search filters
    pub fn admits(&self, entry: &Entry) -> bool {
        (self.show_hidden || !entry.is_hidden())
            && (self.query.is_empty() || entry.name.contains(self.query))
    }
}

/// Produce the ordered, filtered entries of `folder`.
///
/// Uses the cached scan unless `force_reload` is set or the folder was never
/// scanned; a fresh scan is stored back in the cache. Unlistable folders give
/// an empty result.
pub fn load_folder(
    cache: &mut FolderCache,
    folder: &Path,
    filter: &ListingFilter<'_>,
    force_reload: bool,
) -> Vec<Entry> {
    let cached = if force_reload { None } else { cache.get(folder) };
    let mut entries: Vec<Entry> = match cached {
        Some(listing) => {
            tracing::debug!("Folder cache hit for {}", folder.display());
            listing.entries.iter().filter(|e| filter.admits(e)).cloned().collect()
        }
        None => {
            let scanned = scan_folder(folder);
            let admitted = scanned.iter().filter(|e| filter.admits(e)).cloned().collect();
            cache.insert(FolderListing {
                folder_path: folder.to_path_buf(),
                entries: scanned,
            });
            tracing::debug!("Folder cache holds {}/{} folders", cache.len(), cache.capacity());
            admitted
        }
    };

    sort_entries(&mut entries, filter.sort_mode);
    entries
}
