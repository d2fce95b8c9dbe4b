//! Preview of the selected entry

use std::fs::File;
use std::io::Read;

use crate::fs::{Entry, EntryKind};
use crate::listing::{FolderCache, ListingFilter, SortMode, load_folder};

/// Bytes read from a file to decide how to show it
pub const READ_LIMIT: u64 = 64 * 1024;
/// Text lines kept for display
pub const MAX_LINES: usize = 256;

const TAB: &str = "    ";

/// Known binary signatures, checked against the start of a file
const MAGIC_NUMBERS: &[(&[u8], &str)] = &[
    (b"\x7fELF", "ELF"),
    (b"\x89PNG\r\n\x1a\n", "PNG"),
    (b"\xff\xd8\xff", "JPEG"),
    (b"GIF8", "GIF"),
    (b"%PDF", "PDF"),
    (b"PK\x03\x04", "ZIP"),
    (b"\x1f\x8b", "GZIP"),
];

/// What the preview pane shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// "Missing permissions"
    Unreadable,
    EmptyFile,
    EmptyFolder,
    /// Ordered listing of a directory
    Folder(Vec<Entry>),
    /// Leading lines of a text file
    Text { lines: Vec<String>, size: u64 },
    /// A non-text file, identified by its signature when known
    Binary { kind: &'static str, size: u64 },
    /// The entry could not be opened or is not a file or folder
    Unavailable,
}

/// Build the preview for `entry`.
///
/// Folders go through `load_folder`, so they share the listing cache and the
/// current hidden/sort settings but ignore the search query.
pub fn build(
    entry: &Entry,
    cache: &mut FolderCache,
    show_hidden: bool,
    sort_mode: SortMode,
    force_reload: bool,
) -> Preview {
    if !entry.readable {
        return Preview::Unreadable;
    }

    if entry.is_dir() {
        let filter = ListingFilter {
            show_hidden,
            sort_mode,
            query: "",
        };
        let entries = load_folder(cache, &entry.path, &filter, force_reload);
        return if entries.is_empty() {
            Preview::EmptyFolder
        } else {
            Preview::Folder(entries)
        };
    }

    // Never open fifos, sockets or devices: reading them can block
    if entry.resolved_kind() != EntryKind::File {
        return Preview::Unavailable;
    }
    if entry.size == 0 {
        return Preview::EmptyFile;
    }

    let mut head = Vec::new();
    let read = File::open(&entry.path).and_then(|file| file.take(READ_LIMIT).read_to_end(&mut head));
    if let Err(e) = read {
        tracing::debug!("Cannot preview {}: {}", entry.path.display(), e);
        return Preview::Unavailable;
    }

    match text_lines(&head) {
        Some(lines) => Preview::Text {
            lines,
            size: entry.size,
        },
        None => Preview::Binary {
            kind: sniff(&head),
            size: entry.size,
        },
    }
}

/// Decode `bytes` as displayable text; `None` for binary content.
/// A multi-byte character cut off at the end of the buffer is tolerated.
fn text_lines(bytes: &[u8]) -> Option<Vec<String>> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&bytes[..e.valid_up_to()]).ok()?,
        Err(_) => return None,
    };

    if text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\r' | '\n'))
    {
        return None;
    }

    Some(
        text.lines()
            .take(MAX_LINES)
            .map(|line| line.replace('\t', TAB))
            .collect(),
    )
}

/// Name of the file type announced by the leading bytes
fn sniff(head: &[u8]) -> &'static str {
    MAGIC_NUMBERS
        .iter()
        .find(|(magic, _)| head.starts_with(magic))
        .map(|(_, kind)| *kind)
        .unwrap_or("Unknown")
}
