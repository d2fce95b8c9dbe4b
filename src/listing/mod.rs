//! Folder listings: ordering, caching and loading

pub mod cache;
pub mod loader;
pub mod sort;

pub use cache::FolderCache;
pub use loader::{ListingFilter, load_folder};
pub use sort::SortMode;
