//! Ordering policies for folder listings

use std::cmp::Ordering;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::fs::Entry;

/// The eight display orders, cycled in declaration order
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Case-insensitive name, A to Z
    #[default]
    AlphaAsc,
    /// Case-insensitive name, Z to A
    AlphaDesc,
    /// Byte-order name, A to Z
    AlphaAscCase,
    /// Byte-order name, Z to A
    AlphaDescCase,
    /// Smallest first (directories by child count)
    SizeAsc,
    /// Largest first (directories by child count)
    SizeDesc,
    NewestFirst,
    OldestFirst,
}

impl SortMode {
    pub const ALL: [SortMode; 8] = [
        SortMode::AlphaAsc,
        SortMode::AlphaDesc,
        SortMode::AlphaAscCase,
        SortMode::AlphaDescCase,
        SortMode::SizeAsc,
        SortMode::SizeDesc,
        SortMode::NewestFirst,
        SortMode::OldestFirst,
    ];

    /// Next mode, wrapping after the last one
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Short indicator shown on the listing border
    pub fn indicator(self) -> &'static str {
        match self {
            SortMode::AlphaAsc => "aA->zZ",
            SortMode::AlphaDesc => "zZ->aA",
            SortMode::AlphaAscCase => "A->Z a->z",
            SortMode::AlphaDescCase => "z->a Z->A",
            SortMode::SizeAsc => "small->big",
            SortMode::SizeDesc => "big->small",
            SortMode::NewestFirst => "new->old",
            SortMode::OldestFirst => "old->new",
        }
    }

    fn is_size_mode(self) -> bool {
        matches!(self, SortMode::SizeAsc | SortMode::SizeDesc)
    }
}

/// Sort entries in place. Stable: entries that compare equal keep scan order.
pub fn sort_entries(entries: &mut [Entry], mode: SortMode) {
    entries.sort_by(|a, b| compare(a, b, mode));
}

/// Full comparator: partition first, then the mode's secondary key
pub fn compare(a: &Entry, b: &Entry, mode: SortMode) -> Ordering {
    partition(a, mode)
        .cmp(&partition(b, mode))
        .then_with(|| secondary(a, b, mode))
}

/// 0 sorts before 1.
/// Size modes put everything that is not a regular file first, the others
/// put directories first. Links are classified by their target.
fn partition(entry: &Entry, mode: SortMode) -> u8 {
    let leading = if mode.is_size_mode() {
        !entry.is_regular_file()
    } else {
        entry.is_dir()
    };
    if leading { 0 } else { 1 }
}

fn secondary(a: &Entry, b: &Entry, mode: SortMode) -> Ordering {
    match mode {
        SortMode::AlphaAsc => name_nocase(a, b),
        SortMode::AlphaDesc => name_nocase(a, b).reverse(),
        SortMode::AlphaAscCase => a.name.as_bytes().cmp(b.name.as_bytes()),
        SortMode::AlphaDescCase => a.name.as_bytes().cmp(b.name.as_bytes()).reverse(),
        SortMode::SizeAsc => size_key(a).cmp(&size_key(b)),
        SortMode::SizeDesc => size_key(a).cmp(&size_key(b)).reverse(),
        SortMode::NewestFirst => mtime(a).cmp(&mtime(b)).reverse(),
        SortMode::OldestFirst => mtime(a).cmp(&mtime(b)),
    }
}

/// Folds full Unicode case, not just ASCII
fn name_nocase(a: &Entry, b: &Entry) -> Ordering {
    a.name
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.name.chars().flat_map(char::to_lowercase))
}

/// Byte size for files, child count for everything else
fn size_key(entry: &Entry) -> u64 {
    if entry.is_regular_file() {
        entry.size
    } else {
        entry.child_count.unwrap_or(0)
    }
}

fn mtime(entry: &Entry) -> SystemTime {
    entry.modified.unwrap_or(SystemTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::EntryKind;
    use crate::fs::entry::tests::fake;
    use std::time::Duration;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn dir_with_children(name: &str, children: u64) -> Entry {
        let mut entry = fake(name, EntryKind::Directory, 0);
        entry.child_count = Some(children);
        entry
    }

    fn aged(name: &str, kind: EntryKind, secs: u64) -> Entry {
        let mut entry = fake(name, kind, 0);
        entry.modified = Some(SystemTime::UNIX_EPOCH + Duration::from_secs(secs));
        entry
    }

    fn mixed() -> Vec<Entry> {
        vec![
            fake("beta.txt", EntryKind::File, 30),
            fake("Zeta", EntryKind::Directory, 0),
            fake("alpha.txt", EntryKind::File, 10),
            fake("Alpha", EntryKind::Directory, 0),
            fake("Gamma.txt", EntryKind::File, 20),
        ]
    }

    #[test]
    fn cycle_visits_all_modes_and_wraps() {
        let mut mode = SortMode::default();
        assert_eq!(mode, SortMode::AlphaAsc);
        for expected in SortMode::ALL.iter().skip(1) {
            mode = mode.next();
            assert_eq!(mode, *expected);
        }
        assert_eq!(mode.next(), SortMode::AlphaAsc);
    }

    #[test]
    fn alpha_ascending_ignores_case() {
        let mut entries = mixed();
        sort_entries(&mut entries, SortMode::AlphaAsc);
        assert_eq!(names(&entries), vec!["Alpha", "Zeta", "alpha.txt", "beta.txt", "Gamma.txt"]);
    }

    #[test]
    fn case_folding_covers_accented_letters() {
        let mut entries = vec![fake("Éb", EntryKind::File, 0), fake("éa", EntryKind::File, 0)];
        sort_entries(&mut entries, SortMode::AlphaAsc);
        assert_eq!(names(&entries), vec!["éa", "Éb"]);
    }

    #[test]
    fn alpha_descending_keeps_directories_first() {
        let mut entries = mixed();
        sort_entries(&mut entries, SortMode::AlphaDesc);
        assert_eq!(names(&entries), vec!["Zeta", "Alpha", "Gamma.txt", "beta.txt", "alpha.txt"]);
    }

    #[test]
    fn case_sensitive_uses_byte_order() {
        let mut entries = mixed();
        sort_entries(&mut entries, SortMode::AlphaAscCase);
        assert_eq!(names(&entries), vec!["Alpha", "Zeta", "Gamma.txt", "alpha.txt", "beta.txt"]);

        sort_entries(&mut entries, SortMode::AlphaDescCase);
        assert_eq!(names(&entries), vec!["Zeta", "Alpha", "beta.txt", "alpha.txt", "Gamma.txt"]);
    }

    #[test]
    fn size_modes_order_dirs_by_child_count() {
        let mut entries = vec![
            fake("big", EntryKind::File, 500),
            dir_with_children("many", 9),
            fake("small", EntryKind::File, 5),
            dir_with_children("few", 1),
        ];
        sort_entries(&mut entries, SortMode::SizeAsc);
        assert_eq!(names(&entries), vec!["few", "many", "small", "big"]);

        sort_entries(&mut entries, SortMode::SizeDesc);
        assert_eq!(names(&entries), vec!["many", "few", "big", "small"]);
    }

    #[test]
    fn size_modes_put_other_kinds_before_files() {
        let mut entries = vec![
            fake("file", EntryKind::File, 1),
            fake("socket", EntryKind::Other, 0),
        ];
        sort_entries(&mut entries, SortMode::SizeAsc);
        assert_eq!(names(&entries), vec!["socket", "file"]);

        // Name modes partition on directories only
        sort_entries(&mut entries, SortMode::AlphaAsc);
        assert_eq!(names(&entries), vec!["file", "socket"]);
    }

    #[test]
    fn time_modes() {
        let mut entries = vec![
            aged("old.txt", EntryKind::File, 100),
            aged("new.txt", EntryKind::File, 300),
            aged("dir", EntryKind::Directory, 1),
            aged("mid.txt", EntryKind::File, 200),
        ];
        sort_entries(&mut entries, SortMode::NewestFirst);
        assert_eq!(names(&entries), vec!["dir", "new.txt", "mid.txt", "old.txt"]);

        sort_entries(&mut entries, SortMode::OldestFirst);
        assert_eq!(names(&entries), vec!["dir", "old.txt", "mid.txt", "new.txt"]);
    }

    #[test]
    fn ties_keep_scan_order_in_every_mode() {
        for mode in SortMode::ALL {
            let mut entries = vec![
                fake("same", EntryKind::File, 7),
                fake("same", EntryKind::File, 7),
                fake("same", EntryKind::File, 7),
            ];
            for (i, entry) in entries.iter_mut().enumerate() {
                entry.path = format!("/scan/{}", i).into();
            }
            sort_entries(&mut entries, mode);
            let order: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
            let expected: Vec<std::path::PathBuf> =
                (0..3).map(|i| format!("/scan/{}", i).into()).collect();
            assert_eq!(order, expected, "mode {:?}", mode);
        }
    }

    #[test]
    fn partition_holds_in_every_mode() {
        for mode in SortMode::ALL {
            let mut entries = mixed();
            sort_entries(&mut entries, mode);
            let first_file = entries.iter().position(|e| !e.is_dir()).unwrap();
            assert!(entries[..first_file].iter().all(Entry::is_dir), "mode {:?}", mode);
            assert!(entries[first_file..].iter().all(|e| !e.is_dir()), "mode {:?}", mode);
        }
    }

    #[test]
    fn symlinks_classified_by_target() {
        let mut link = fake("link", EntryKind::Symlink, 0);
        link.target_kind = Some(EntryKind::Directory);
        let mut entries = vec![fake("a.txt", EntryKind::File, 1), link];
        sort_entries(&mut entries, SortMode::AlphaAsc);
        assert_eq!(names(&entries), vec!["link", "a.txt"]);
    }

    #[test]
    fn mode_names_from_config() {
        #[derive(Deserialize)]
        struct Holder {
            sort: SortMode,
        }
        let holder: Holder = toml_edit::de::from_str("sort = \"size_desc\"").unwrap();
        assert_eq!(holder.sort, SortMode::SizeDesc);
        let holder: Holder = toml_edit::de::from_str("sort = \"alpha_asc_case\"").unwrap();
        assert_eq!(holder.sort, SortMode::AlphaAscCase);
    }
}
