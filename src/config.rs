//! Configuration loading
//!
//! The config file is only ever read. A missing file means defaults; a broken
//! one is reported in the log and replaced by defaults.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};
use crate::listing::SortMode;
use crate::listing::cache::DEFAULT_CAPACITY;
use crate::ui::theme::ThemeConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Theme settings
    pub theme: ThemeConfig,
    /// Keyboard shortcuts
    pub keybindings: KeyBindings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Show dot-prefixed entries at startup
    pub show_hidden: bool,
    /// Initial sort mode
    pub sort: SortMode,
    /// Show the preview pane at startup
    pub preview: bool,
    /// Folder listings kept before the cache is flushed
    pub cache_capacity: usize,
    /// Shell for commands typed at the prompt (empty = platform default)
    pub shell: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort: SortMode::AlphaAsc,
            preview: true,
            cache_capacity: DEFAULT_CAPACITY,
            shell: String::new(),
        }
    }
}

/// Keyboard shortcut configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeyBindings {
    /// Custom keybindings (action -> key)
    #[serde(flatten)]
    pub bindings: HashMap<String, String>,
}

impl KeyBindings {
    /// Get the key binding for an action, falling back to default
    pub fn get(&self, action: &str) -> &str {
        self.bindings
            .get(action)
            .map(|s| s.as_str())
            .unwrap_or_else(|| default_keybinding(action))
    }

    /// Check if a key event matches an action
    pub fn matches(&self, action: &str, key: &KeyEvent) -> bool {
        parse_key_binding(self.get(action))
            .map(|(code, mods)| {
                // Shift is implied by the character itself
                let key_mods = match key.code {
                    KeyCode::Char(_) => key.modifiers - KeyModifiers::SHIFT,
                    _ => key.modifiers,
                };
                if key_mods != mods {
                    return false;
                }
                match (&key.code, &code) {
                    (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(b),
                    _ => key.code == code,
                }
            })
            .unwrap_or(false)
    }

    /// Bindings naming an unknown action or an unparsable key
    pub fn invalid(&self) -> Vec<(&str, &str)> {
        self.bindings
            .iter()
            .filter(|(action, key)| {
                default_keybinding(action).is_empty() || parse_key_binding(key).is_none()
            })
            .map(|(action, key)| (action.as_str(), key.as_str()))
            .collect()
    }
}

/// Get the default key binding for an action
pub fn default_keybinding(action: &str) -> &'static str {
    match action {
        // Application
        "quit" => "q",
        "quit_alt" => "Ctrl+C",
        "help" => "h",
        "shell" => "t",

        // View
        "toggle_hidden" => "a",
        "toggle_preview" => "p",
        "search" => "f",
        "cycle_sort" => "s",
        "refresh" => "Ctrl+R",

        // Navigation
        "move_up" => "Up",
        "move_up_alt" => "k",
        "move_down" => "Down",
        "move_down_alt" => "j",
        "page_up" => "PageUp",
        "page_down" => "PageDown",
        "jump_start" => "Home",
        "jump_end" => "End",
        "go_parent" => "Left",
        "go_parent_alt" => "Backspace",
        "enter" => "Enter",
        "enter_alt" => "Right",

        // Unknown action
        _ => "",
    }
}

/// Parse a key binding string like "Ctrl+C", "Alt+F1", "F10", etc.
pub fn parse_key_binding(s: &str) -> Option<(KeyCode, KeyModifiers)> {
    let s = s.trim();
    let mut modifiers = KeyModifiers::NONE;
    // "+" alone (or as the last part, e.g. "Ctrl++") names the plus key
    let (mods, key_str) = match s.rsplit_once('+') {
        Some((mods, "")) => (mods.strip_suffix('+'), "+"),
        Some((mods, key)) => (Some(mods), key),
        None => (None, s),
    };

    if let Some(mods) = mods.filter(|m| !m.is_empty()) {
        for modifier in mods.split('+') {
            match modifier.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None, // Unknown modifier
            }
        }
    }

    let code = parse_key_code(key_str.trim())?;
    Some((code, modifiers))
}

/// Parse a key code string
fn parse_key_code(s: &str) -> Option<KeyCode> {
    let s_lower = s.to_lowercase();

    // Function keys
    if s_lower.starts_with('f')
        && s_lower.len() >= 2
        && let Ok(n) = s_lower[1..].parse::<u8>()
        && (1..=12).contains(&n)
    {
        return Some(KeyCode::F(n));
    }

    // Named keys
    match s_lower.as_str() {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "backspace" | "bs" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "insert" | "ins" => Some(KeyCode::Insert),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),
        // Single character
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Get the config directory path for the current platform
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // Windows: %APPDATA%\peruse
        std::env::var("APPDATA")
            .ok()
            .map(|p| PathBuf::from(p).join("peruse"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        // XDG_CONFIG_HOME first, then ~/.config
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|p| PathBuf::from(p).join(".config")))
            .map(|p| p.join("peruse"))
    }
}

/// Get the config file path
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

impl Config {
    /// Load configuration from the config file, or defaults
    pub fn load() -> Self {
        let Some(config_path) = config_file() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Config::default();
        };

        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}", config_path.display());
                return Config::default();
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {}", config_path.display(), e);
                return Config::default();
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using default configuration", e);
                Config::default()
            }
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml_edit::de::from_str(content)
            .map_err(|e| AppError::Config(format!("Could not parse config file: {}", e)))?;
        for (action, key) in config.keybindings.invalid() {
            tracing::warn!("Ignoring key binding {} = {:?}", action, key);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_key_binding() {
        assert_eq!(parse_key_binding("q"), Some((KeyCode::Char('q'), KeyModifiers::NONE)));
        assert_eq!(
            parse_key_binding("Ctrl+R"),
            Some((KeyCode::Char('R'), KeyModifiers::CONTROL))
        );
        assert_eq!(parse_key_binding("PageDown"), Some((KeyCode::PageDown, KeyModifiers::NONE)));
        assert_eq!(
            parse_key_binding("ctrl+alt+F5"),
            Some((KeyCode::F(5), KeyModifiers::CONTROL | KeyModifiers::ALT))
        );
        assert_eq!(parse_key_binding("+"), Some((KeyCode::Char('+'), KeyModifiers::NONE)));
        assert_eq!(
            parse_key_binding("Ctrl++"),
            Some((KeyCode::Char('+'), KeyModifiers::CONTROL))
        );
        assert_eq!(parse_key_binding("Hyper+x"), None);
        assert_eq!(parse_key_binding("nonsense"), None);
        assert_eq!(parse_key_binding("é"), Some((KeyCode::Char('é'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_default_matches() {
        let bindings = KeyBindings::default();
        assert!(bindings.matches("quit", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(bindings.matches("quit_alt", &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(bindings.matches("refresh", &key(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!bindings.matches("refresh", &key(KeyCode::Char('r'), KeyModifiers::NONE)));
        assert!(bindings.matches("go_parent_alt", &key(KeyCode::Backspace, KeyModifiers::NONE)));
        assert!(!bindings.matches("no_such_action", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_shift_is_ignored_for_characters() {
        let bindings = KeyBindings::default();
        assert!(bindings.matches("search", &key(KeyCode::Char('F'), KeyModifiers::SHIFT)));
        assert!(!bindings.matches("move_up", &key(KeyCode::Up, KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            [general]
            show_hidden = true
            sort = "size_desc"
            preview = false
            cache_capacity = 8
            shell = "/bin/bash"

            [theme]
            preset = "light"

            [keybindings]
            quit = "x"
            search = "/"
            "#,
        )
        .unwrap();
        assert!(config.general.show_hidden);
        assert_eq!(config.general.sort, SortMode::SizeDesc);
        assert!(!config.general.preview);
        assert_eq!(config.general.cache_capacity, 8);
        assert_eq!(config.general.shell, "/bin/bash");
        assert_eq!(config.theme.preset, "light");
        assert_eq!(config.keybindings.get("quit"), "x");
        assert_eq!(config.keybindings.get("help"), "h");
        assert!(config.keybindings.matches("search", &key(KeyCode::Char('/'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml_str("[general]\nshow_hidden = true\n").unwrap();
        assert!(config.general.show_hidden);
        assert_eq!(config.general.sort, SortMode::AlphaAsc);
        assert!(config.general.preview);
        assert_eq!(config.general.cache_capacity, DEFAULT_CAPACITY);
        assert_eq!(config.theme.preset, "dark");

        let empty = Config::from_toml_str("").unwrap();
        assert!(!empty.general.show_hidden);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(matches!(
            Config::from_toml_str("[general]\nsort = \"random\"\n"),
            Err(AppError::Config(_))
        ));
        assert!(Config::from_toml_str("not toml [").is_err());
    }

    #[test]
    fn test_invalid_bindings_are_reported() {
        let config = Config::from_toml_str(
            "[keybindings]\nquit = \"x\"\nfly = \"z\"\nhelp = \"Hyper+h\"\n",
        )
        .unwrap();
        let mut invalid = config.keybindings.invalid();
        invalid.sort();
        assert_eq!(invalid, vec![("fly", "z"), ("help", "Hyper+h")]);
    }
}
