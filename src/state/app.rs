//! Application state: the view plus everything derived from it

use std::path::PathBuf;

use crate::config::Config;
use crate::git;
use crate::input::keymap::Keymap;
use crate::listing::{FolderCache, SortMode, load_folder};
use crate::preview::{self, Preview};
use crate::shell;
use crate::ui::theme::Theme;
use crate::utils::shell_quote_os;

use super::command_state::CommandLine;
use super::intent::{Intent, ShellEdit};
use super::view::{Outcome, ViewState};

/// Settings a folder preview depends on
type PreviewKey = (PathBuf, bool, SortMode);

/// Main application state
pub struct App {
    // === View and listings ===
    pub view: ViewState,
    pub cache: FolderCache,

    // === Control ===
    pub should_quit: bool,

    // === Shell prompt ===
    pub cmd: CommandLine,
    /// Resolved shell program
    shell: String,

    // === Derived from the current folder / selection ===
    /// Repository label for the current folder
    pub git_label: Option<String>,
    /// Folder the git label was computed for
    git_path: Option<PathBuf>,
    /// Preview of the selected entry, while the pane is shown
    pub preview: Option<Preview>,
    preview_key: Option<PreviewKey>,

    // === Configuration ===
    pub theme: Theme,
    pub keymap: Keymap,
}

impl App {
    pub fn new(config: Config, cwd: PathBuf) -> Self {
        let general = &config.general;
        let view = ViewState::new(cwd, general.sort, general.show_hidden, general.preview);
        let cache = FolderCache::new(general.cache_capacity);
        let shell = shell::resolve_shell(&general.shell);
        let theme = config.theme.build_theme();
        let keymap = Keymap::new(config.keybindings);

        Self {
            view,
            cache,
            should_quit: false,
            cmd: CommandLine::default(),
            shell,
            git_label: None,
            git_path: None,
            preview: None,
            preview_key: None,
            theme,
            keymap,
        }
    }

    /// Apply one intent to the view, running shell commands it hands back
    pub fn handle_intent(&mut self, intent: Intent) {
        tracing::trace!("{:?} in {}", intent, self.view.mode().label());
        match self.view.apply(intent) {
            Outcome::Continue => {}
            Outcome::Quit => self.should_quit = true,
            Outcome::Shell(edit) => self.apply_shell_edit(edit),
        }
    }

    fn apply_shell_edit(&mut self, edit: ShellEdit) {
        match edit {
            ShellEdit::Insert(c) => self.cmd.insert(c),
            ShellEdit::Backspace => self.cmd.backspace(),
            ShellEdit::Left => self.cmd.left(),
            ShellEdit::Right => self.cmd.right(),
            ShellEdit::HistoryUp => self.cmd.history_up(),
            ShellEdit::HistoryDown => self.cmd.history_down(),
            ShellEdit::InsertSelected => {
                if let Some(name) = self.view.selected().and_then(|e| e.path.file_name()) {
                    self.cmd.insert_str(&shell_quote_os(name));
                }
            }
            ShellEdit::Submit => {
                let Some(command) = self.cmd.submit() else {
                    return;
                };
                if let Err(e) = shell::run_silent(&self.shell, &command, self.view.cwd()) {
                    tracing::warn!("Could not run `{}`: {}", command, e);
                }
                // The command may have changed the folder
                self.view.request_reload();
            }
        }
    }

    /// Bring the listing, git label and preview up to date with the view
    pub fn refresh(&mut self) {
        let forced = self.view.needs_force_reload();

        if self.view.is_dirty() {
            let cwd = self.view.cwd().to_path_buf();
            let entries = load_folder(&mut self.cache, &cwd, &self.view.listing_filter(), forced);
            self.view.set_listing(entries);
        }

        self.update_git_label(forced);
        self.update_preview(forced);
    }

    fn update_git_label(&mut self, forced: bool) {
        let cwd = self.view.cwd();
        if forced || self.git_path.as_deref() != Some(cwd) {
            self.git_label = git::repo_label(cwd);
            self.git_path = Some(cwd.to_path_buf());
        }
    }

    fn update_preview(&mut self, forced: bool) {
        let selected = match self.view.selected() {
            Some(entry) if self.view.preview => entry.clone(),
            _ => {
                self.preview = None;
                self.preview_key = None;
                return;
            }
        };

        let key = (selected.path.clone(), self.view.show_hidden(), self.view.sort_mode());
        if !forced && self.preview_key.as_ref() == Some(&key) {
            return;
        }
        self.preview = Some(preview::build(
            &selected,
            &mut self.cache,
            self.view.show_hidden(),
            self.view.sort_mode(),
            forced,
        ));
        self.preview_key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::intent::SearchEdit;
    use crate::state::mode::Mode;
    use std::fs;
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> App {
        let mut app = App::new(Config::default(), dir.path().to_path_buf());
        app.refresh();
        app
    }

    fn names(app: &App) -> Vec<String> {
        app.view.entries().iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_initial_listing_and_preview() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("README"), "hello\n").unwrap();

        let mut app = app_in(&dir);
        assert_eq!(names(&app), vec!["src", "README"]);
        assert_eq!(app.preview, Some(Preview::EmptyFolder));

        app.handle_intent(Intent::MoveSelection(1));
        app.refresh();
        assert_eq!(
            app.preview,
            Some(Preview::Text {
                lines: vec!["hello".to_string()],
                size: 6
            })
        );

        app.handle_intent(Intent::TogglePreview);
        app.refresh();
        assert_eq!(app.preview, None);
    }

    #[test]
    fn test_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.handle_intent(Intent::ToggleHelp);
        app.handle_intent(Intent::Quit);
        assert!(!app.should_quit);
        app.handle_intent(Intent::ToggleHelp);
        app.handle_intent(Intent::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_search_filters_listing() {
        let dir = TempDir::new().unwrap();
        for name in ["alpha.rs", "beta.rs", "Alpha.md"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let mut app = app_in(&dir);
        app.handle_intent(Intent::EnterSearchMode);
        for c in "lpha".chars() {
            app.handle_intent(Intent::Search(SearchEdit::Insert(c)));
        }
        app.refresh();
        assert_eq!(names(&app), vec!["Alpha.md", "alpha.rs"]);

        app.handle_intent(Intent::CancelSearch);
        app.refresh();
        assert_eq!(app.view.entries().len(), 3);
        assert_eq!(app.view.mode(), Mode::Browsing);
    }

    #[test]
    fn test_insert_selected_name_quoted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("my notes.txt"), "x").unwrap();
        let mut app = app_in(&dir);
        app.handle_intent(Intent::EnterShellMode);
        for c in "cat ".chars() {
            app.handle_intent(Intent::Shell(ShellEdit::Insert(c)));
        }
        app.handle_intent(Intent::Shell(ShellEdit::InsertSelected));
        assert_eq!(app.cmd.as_str(), "cat \"my notes.txt\"");
    }

    #[cfg(unix)]
    #[test]
    fn test_insert_selected_runs_on_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join(OsStr::from_bytes(b"caf\xe9 menu"));
        fs::write(&file, "x").unwrap();
        let mut app = app_in(&dir);

        app.handle_intent(Intent::EnterShellMode);
        for c in "rm ".chars() {
            app.handle_intent(Intent::Shell(ShellEdit::Insert(c)));
        }
        app.handle_intent(Intent::Shell(ShellEdit::InsertSelected));
        app.handle_intent(Intent::Shell(ShellEdit::Submit));
        assert!(!file.exists());

        app.refresh();
        assert!(app.view.entries().is_empty());
    }

    #[test]
    fn test_typing_outside_shell_mode_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.handle_intent(Intent::Shell(ShellEdit::Insert('x')));
        assert_eq!(app.cmd.as_str(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command_reloads_listing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        let mut app = app_in(&dir);
        assert_eq!(names(&app), vec!["a.txt"]);

        app.handle_intent(Intent::EnterShellMode);
        for c in "touch b.txt".chars() {
            app.handle_intent(Intent::Shell(ShellEdit::Insert(c)));
        }
        app.handle_intent(Intent::Shell(ShellEdit::Submit));
        assert_eq!(app.view.mode(), Mode::Browsing);
        assert_eq!(app.cmd.as_str(), "");
        assert!(app.view.needs_force_reload());

        app.refresh();
        assert_eq!(names(&app), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_git_label_follows_folder() {
        let dir = TempDir::new().unwrap();
        let repo = dir.path().join("tool");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::write(
            repo.join(".git").join("config"),
            "[remote \"origin\"]\n\turl = https://example.com/me/tool.git\n",
        )
        .unwrap();
        fs::write(repo.join(".git").join("HEAD"), "ref: refs/heads/main\n").unwrap();

        let mut app = app_in(&dir);
        assert_eq!(app.git_label, None);

        app.handle_intent(Intent::EnterSelected);
        app.refresh();
        assert_eq!(app.git_label.as_deref(), Some("tool <main>"));

        app.handle_intent(Intent::GoToParent);
        app.refresh();
        assert_eq!(app.git_label, None);
    }

    #[test]
    fn test_folder_preview_follows_sort_order() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("a"), "").unwrap();
        fs::write(sub.join("b"), "").unwrap();

        let mut app = app_in(&dir);
        let preview_names = |app: &App| match &app.preview {
            Some(Preview::Folder(entries)) => entries.iter().map(|e| e.name.clone()).collect(),
            _ => Vec::new(),
        };
        assert_eq!(preview_names(&app), vec!["a", "b"]);

        app.handle_intent(Intent::CycleSort);
        app.refresh();
        assert_eq!(preview_names(&app), vec!["b", "a"]);
    }
}
