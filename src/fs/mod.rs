//! Filesystem module

pub mod entry;
pub mod scan;

pub use entry::{Entry, EntryKind};
pub use scan::scan_folder;
