//! Key to intent translation per mode

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::KeyBindings;
use crate::state::intent::{Intent, SearchEdit, ShellEdit};
use crate::state::mode::Mode;

/// Configurable browsing actions, in help order.
/// An `_alt` action is a second key for the action right before it.
pub const ACTIONS: &[(&str, Intent, &str)] = &[
    ("move_up", Intent::MoveSelection(-1), "Move up"),
    ("move_up_alt", Intent::MoveSelection(-1), ""),
    ("move_down", Intent::MoveSelection(1), "Move down"),
    ("move_down_alt", Intent::MoveSelection(1), ""),
    ("page_up", Intent::PageUp, "Page up"),
    ("page_down", Intent::PageDown, "Page down"),
    ("jump_start", Intent::JumpToStart, "First entry"),
    ("jump_end", Intent::JumpToEnd, "Last entry"),
    ("enter", Intent::EnterSelected, "Enter folder"),
    ("enter_alt", Intent::EnterSelected, ""),
    ("go_parent", Intent::GoToParent, "Parent folder"),
    ("go_parent_alt", Intent::GoToParent, ""),
    ("toggle_hidden", Intent::ToggleHidden, "Show/hide hidden files"),
    ("toggle_preview", Intent::TogglePreview, "Show/hide preview"),
    ("cycle_sort", Intent::CycleSort, "Next sort order"),
    ("search", Intent::EnterSearchMode, "Search"),
    ("shell", Intent::EnterShellMode, "Shell command"),
    ("refresh", Intent::Refresh, "Rescan folder"),
    ("help", Intent::ToggleHelp, "Help"),
    ("quit", Intent::Quit, "Quit"),
    ("quit_alt", Intent::Quit, ""),
];

/// Fixed keys of the text prompts, for the help screen
pub const PROMPT_HELP: &[(&str, &str)] = &[
    ("Enter", "Search: keep filter / Shell: run"),
    ("Esc", "Search: clear filter / Shell: leave"),
    ("Tab", "Shell: insert selected name"),
    ("Up / Down", "Shell: command history"),
];

/// Resolves key presses to intents using the configured bindings
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: KeyBindings,
}

impl Keymap {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// Intent for `key` in `mode`, if any
    pub fn resolve(&self, mode: Mode, key: &KeyEvent) -> Option<Intent> {
        match mode {
            Mode::Browsing => self.resolve_browsing(key),
            Mode::Help => self.resolve_help(key),
            Mode::Shell => self.resolve_shell(key),
            Mode::Search => self.resolve_search(key),
        }
    }

    fn resolve_browsing(&self, key: &KeyEvent) -> Option<Intent> {
        ACTIONS
            .iter()
            .find(|(action, _, _)| self.bindings.matches(action, key))
            .map(|(_, intent, _)| *intent)
    }

    fn resolve_help(&self, key: &KeyEvent) -> Option<Intent> {
        let closes = key.code == KeyCode::Esc
            || ["help", "quit", "quit_alt"]
                .iter()
                .any(|action| self.bindings.matches(action, key));
        closes.then_some(Intent::ToggleHelp)
    }

    fn resolve_shell(&self, key: &KeyEvent) -> Option<Intent> {
        if self.bindings.matches("quit_alt", key) {
            return Some(Intent::Quit);
        }
        let edit = match key.code {
            KeyCode::Esc => return Some(Intent::ExitShellMode),
            KeyCode::Enter => ShellEdit::Submit,
            KeyCode::Backspace => ShellEdit::Backspace,
            KeyCode::Left => ShellEdit::Left,
            KeyCode::Right => ShellEdit::Right,
            KeyCode::Up => ShellEdit::HistoryUp,
            KeyCode::Down => ShellEdit::HistoryDown,
            KeyCode::Tab => ShellEdit::InsertSelected,
            KeyCode::Char(c) if is_typed(key) => ShellEdit::Insert(c),
            _ => return None,
        };
        Some(Intent::Shell(edit))
    }

    fn resolve_search(&self, key: &KeyEvent) -> Option<Intent> {
        if self.bindings.matches("quit_alt", key) {
            return Some(Intent::Quit);
        }
        match key.code {
            KeyCode::Esc => Some(Intent::CancelSearch),
            KeyCode::Enter => Some(Intent::ExitSearchMode),
            KeyCode::Up => Some(Intent::MoveSelection(-1)),
            KeyCode::Down => Some(Intent::MoveSelection(1)),
            KeyCode::Backspace => Some(Intent::Search(SearchEdit::Backspace)),
            KeyCode::Char(c) if is_typed(key) => Some(Intent::Search(SearchEdit::Insert(c))),
            _ => None,
        }
    }

    /// Help screen rows: key names and what they do
    pub fn help_lines(&self) -> Vec<(String, &'static str)> {
        let mut lines: Vec<(String, &'static str)> = Vec::new();
        for (action, _, description) in ACTIONS {
            let key = self.bindings.get(action);
            if action.ends_with("_alt") {
                if let Some((keys, _)) = lines.last_mut() {
                    keys.push_str(" / ");
                    keys.push_str(key);
                }
            } else {
                lines.push((key.to_string(), *description));
            }
        }
        lines.extend(PROMPT_HELP.iter().map(|(key, description)| (key.to_string(), *description)));
        lines
    }
}

/// Printable input: no Ctrl or Alt held
fn is_typed(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
