//! Navigation and view state machine

use std::path::{Path, PathBuf};

use crate::fs::Entry;
use crate::listing::{ListingFilter, SortMode};

use super::intent::{Intent, SearchEdit, ShellEdit};
use super::mode::Mode;

/// What the owner of the view must do after a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing beyond what the view already did
    Continue,
    /// A shell line edit for the owner to apply
    Shell(ShellEdit),
    /// End the main loop
    Quit,
}

/// What is on screen: folder, displayed entries, selection, filters and mode.
///
/// The fields the listing depends on (`cwd`, `show_hidden`, `sort_mode`,
/// `search_query`) are only changed through methods that mark the listing
/// dirty, so a rebuild is always requested before the next render.
#[derive(Debug)]
pub struct ViewState {
    cwd: PathBuf,
    entries: Vec<Entry>,
    selection: usize,
    sort_mode: SortMode,
    show_hidden: bool,
    search_query: String,
    mode: Mode,
    /// Preview pane visible (an overlay, independent of `mode`)
    pub preview: bool,
    /// Rows the file list can show, reported by the renderer
    pub visible_rows: usize,
    dirty: bool,
    force_reload: bool,
}

impl ViewState {
    pub fn new(cwd: PathBuf, sort_mode: SortMode, show_hidden: bool, preview: bool) -> Self {
        Self {
            cwd,
            entries: Vec::new(),
            selection: 0,
            sort_mode,
            show_hidden,
            search_query: String::new(),
            mode: Mode::Browsing,
            preview,
            visible_rows: 1,
            dirty: true,
            force_reload: false,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Selected index; meaningless when the listing is empty
    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.entries.get(self.selection)
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn needs_force_reload(&self) -> bool {
        self.force_reload
    }

    /// Filter settings for rebuilding the displayed listing
    pub fn listing_filter(&self) -> ListingFilter<'_> {
        ListingFilter {
            show_hidden: self.show_hidden,
            sort_mode: self.sort_mode,
            query: &self.search_query,
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Request a rescan of the current folder, bypassing the cache
    pub fn request_reload(&mut self) {
        self.dirty = true;
        self.force_reload = true;
    }

    /// Install a freshly built listing and clear the dirty flags.
    /// The selection is clamped to the new length.
    pub fn set_listing(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.selection = self.selection.min(self.entries.len().saturating_sub(1));
        self.dirty = false;
        self.force_reload = false;
    }

    /// Apply one intent. Help swallows everything except closing it.
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        if self.mode == Mode::Help {
            if intent == Intent::ToggleHelp {
                self.mode = Mode::Browsing;
            }
            return Outcome::Continue;
        }

        match intent {
            Intent::ToggleHelp => self.mode = Mode::Help,
            Intent::Quit => return Outcome::Quit,
            Intent::ToggleHidden => {
                self.show_hidden = !self.show_hidden;
                self.mark_dirty();
            }
            Intent::CycleSort => {
                self.sort_mode = self.sort_mode.next();
                self.mark_dirty();
            }
            Intent::TogglePreview => self.preview = !self.preview,
            Intent::Refresh => self.request_reload(),
            Intent::MoveSelection(delta) => self.move_selection(delta),
            Intent::PageUp => self.move_selection(-(self.page_size() as isize)),
            Intent::PageDown => self.move_selection(self.page_size() as isize),
            Intent::JumpToStart => self.selection = 0,
            Intent::JumpToEnd => self.selection = self.entries.len().saturating_sub(1),
            Intent::EnterSelected => self.enter_selected(),
            Intent::GoToParent => self.go_to_parent(),
            Intent::EnterShellMode => {
                if self.mode == Mode::Browsing {
                    self.mode = Mode::Shell;
                }
            }
            Intent::ExitShellMode => {
                if self.mode == Mode::Shell {
                    self.mode = Mode::Browsing;
                }
            }
            Intent::EnterSearchMode => {
                if self.mode == Mode::Browsing {
                    self.mode = Mode::Search;
                }
            }
            Intent::ExitSearchMode => {
                if self.mode == Mode::Search {
                    self.mode = Mode::Browsing;
                }
            }
            Intent::CancelSearch => {
                if self.mode == Mode::Search {
                    self.mode = Mode::Browsing;
                }
                self.clear_search();
            }
            Intent::Search(edit) => {
                if self.mode == Mode::Search {
                    self.edit_search(edit);
                }
            }
            Intent::Shell(edit) => {
                if self.mode != Mode::Shell {
                    return Outcome::Continue;
                }
                if edit == ShellEdit::Submit {
                    self.mode = Mode::Browsing;
                }
                return Outcome::Shell(edit);
            }
        }
        Outcome::Continue
    }

    fn page_size(&self) -> usize {
        self.visible_rows.max(1)
    }

    /// Clamped move; never wraps, no-op on an empty listing
    fn move_selection(&mut self, delta: isize) {
        let Some(last) = self.entries.len().checked_sub(1) else {
            return;
        };
        let moved = if delta < 0 {
            self.selection.saturating_sub(delta.unsigned_abs())
        } else {
            self.selection.saturating_add(delta as usize)
        };
        self.selection = moved.min(last);
    }

    fn enter_selected(&mut self) {
        let Some(entry) = self.selected() else {
            return;
        };
        if !entry.is_navigable() {
            return;
        }
        let target = entry.path.clone();
        // Resolve links and `..` like chdir + getcwd would
        match std::fs::canonicalize(&target) {
            Ok(resolved) if resolved.is_dir() => {
                tracing::info!("Entering {}", resolved.display());
                self.change_folder(resolved);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Cannot enter {}: {}", target.display(), e);
            }
        }
    }

    fn go_to_parent(&mut self) {
        let Some(parent) = self.cwd.parent() else {
            return;
        };
        let parent = parent.to_path_buf();
        tracing::info!("Leaving {} for {}", self.cwd.display(), parent.display());
        self.change_folder(parent);
    }

    fn change_folder(&mut self, folder: PathBuf) {
        self.cwd = folder;
        self.selection = 0;
        self.search_query.clear();
        self.entries.clear();
        self.mark_dirty();
    }

    fn clear_search(&mut self) {
        if !self.search_query.is_empty() {
            self.search_query.clear();
            self.selection = 0;
            self.mark_dirty();
        }
    }

    fn edit_search(&mut self, edit: SearchEdit) {
        match edit {
            SearchEdit::Insert(c) => self.search_query.push(c),
            SearchEdit::Backspace => {
                if self.search_query.pop().is_none() {
                    return;
                }
            }
        }
        self.selection = 0;
        self.mark_dirty();
    }
}
