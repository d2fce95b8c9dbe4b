//! Directory entry snapshot

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::scan::count_children;

/// What kind of filesystem object an entry is, as seen without following links
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl EntryKind {
    fn from_metadata(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// A single file, directory or link observed at scan time.
///
/// Entries are immutable snapshots: they are not refreshed when the
/// filesystem changes, only replaced by the next scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// File name (not full path)
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    /// Kind of the entry itself (links are not followed)
    pub kind: EntryKind,
    /// Kind of the link target, for symlinks that resolve
    pub target_kind: Option<EntryKind>,
    /// Size in bytes of the (followed) regular file, 0 otherwise
    pub size: u64,
    /// Last modification time
    pub modified: Option<SystemTime>,
    /// Whether the current user may read the entry
    pub readable: bool,
    /// Raw link target, for symlinks
    pub symlink_target: Option<PathBuf>,
    /// Number of direct children, for (followed) directories
    pub child_count: Option<u64>,
}

impl Entry {
    /// Build an entry from a path. Fails only if the path itself cannot be stat'ed.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let kind = EntryKind::from_metadata(&metadata);
        let (symlink_target, target_metadata) = if kind == EntryKind::Symlink {
            (fs::read_link(path).ok(), fs::metadata(path).ok())
        } else {
            (None, None)
        };
        let target_kind = target_metadata.as_ref().map(EntryKind::from_metadata);

        let effective = target_kind.unwrap_or(kind);
        let followed = target_metadata.as_ref().unwrap_or(&metadata);

        let size = if effective == EntryKind::File {
            followed.len()
        } else {
            0
        };
        let child_count = if effective == EntryKind::Directory {
            Some(count_children(path))
        } else {
            None
        };

        Ok(Self {
            name,
            path: path.to_path_buf(),
            kind,
            target_kind,
            size,
            modified: followed.modified().ok().or_else(|| metadata.modified().ok()),
            readable: is_readable(path),
            symlink_target,
            child_count,
        })
    }

    /// Kind after following a symlink (the link's own kind if it dangles)
    pub fn resolved_kind(&self) -> EntryKind {
        match self.kind {
            EntryKind::Symlink => self.target_kind.unwrap_or(EntryKind::Symlink),
            kind => kind,
        }
    }

    /// Directory, following symlinks
    pub fn is_dir(&self) -> bool {
        self.resolved_kind() == EntryKind::Directory
    }

    /// Regular file, following symlinks
    pub fn is_regular_file(&self) -> bool {
        self.resolved_kind() == EntryKind::File
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    /// Dot-prefixed name
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Whether entering this entry should change folder.
    ///
    /// A link whose literal target is `.` (e.g. `/usr/bin/X11`) is never
    /// navigable, even though it resolves to a directory.
    pub fn is_navigable(&self) -> bool {
        if !self.is_dir() {
            return false;
        }
        match &self.symlink_target {
            Some(target) => target.as_os_str() != ".",
            None => true,
        }
    }
}

/// Check read permission for the current user
#[cfg(unix)]
pub fn is_readable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(path_cstr) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };

    // SAFETY: path_cstr is a valid NUL-terminated string for the duration of the call
    unsafe { libc::access(path_cstr.as_ptr(), libc::R_OK) == 0 }
}

/// Check read permission by trying to open or list the path
#[cfg(not(unix))]
pub fn is_readable(path: &Path) -> bool {
    if path.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        fs::File::open(path).is_ok()
    }
}
