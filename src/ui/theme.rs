//! Color themes
//!
//! Built-in presets (dark, light, mono) plus per-color overrides from config.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Colors used by the widgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub border: Color,
    /// Border of the prompt line while typing a shell command
    pub border_active: Color,
    pub title: Color,
    pub git_label: Color,
    pub sort_indicator: Color,

    // Listing
    pub file_regular: Color,
    pub file_directory: Color,
    pub file_symlink: Color,
    pub file_unreadable: Color,
    pub file_other: Color,

    // Preview
    pub preview_text: Color,
    pub preview_error: Color,

    // Help
    pub help_key: Color,
    pub help_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// ANSI colors, matching classic terminal file browsers
    pub fn dark() -> Self {
        Self {
            border: Color::Gray,
            border_active: Color::Yellow,
            title: Color::White,
            git_label: Color::LightGreen,
            sort_indicator: Color::LightBlue,

            file_regular: Color::Green,
            file_directory: Color::Cyan,
            file_symlink: Color::Magenta,
            file_unreadable: Color::Red,
            file_other: Color::Reset,

            preview_text: Color::Reset,
            preview_error: Color::Red,

            help_key: Color::Yellow,
            help_text: Color::Reset,
        }
    }

    /// Darker hues that stay legible on a light background
    pub fn light() -> Self {
        Self {
            border: Color::DarkGray,
            border_active: Color::Rgb(180, 95, 0),
            title: Color::Black,
            git_label: Color::Rgb(0, 120, 60),
            sort_indicator: Color::Blue,

            file_regular: Color::Rgb(0, 110, 0),
            file_directory: Color::Rgb(0, 95, 135),
            file_symlink: Color::Rgb(135, 0, 135),
            file_unreadable: Color::Rgb(175, 0, 0),
            file_other: Color::Black,

            preview_text: Color::Black,
            preview_error: Color::Rgb(175, 0, 0),

            help_key: Color::Rgb(180, 95, 0),
            help_text: Color::Black,
        }
    }

    /// The terminal's own colors everywhere
    pub fn mono() -> Self {
        Self {
            border: Color::Reset,
            border_active: Color::Reset,
            title: Color::Reset,
            git_label: Color::Reset,
            sort_indicator: Color::Reset,
            file_regular: Color::Reset,
            file_directory: Color::Reset,
            file_symlink: Color::Reset,
            file_unreadable: Color::Reset,
            file_other: Color::Reset,
            preview_text: Color::Reset,
            preview_error: Color::Reset,
            help_key: Color::Reset,
            help_text: Color::Reset,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    /// Apply custom color overrides from config
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (key, value) in overrides {
            let Some(color) = parse_color(value) else {
                tracing::warn!("Ignoring invalid color {:?} for {}", value, key);
                continue;
            };
            match key.as_str() {
                "border" => self.border = color,
                "border_active" => self.border_active = color,
                "title" => self.title = color,
                "git_label" => self.git_label = color,
                "sort_indicator" => self.sort_indicator = color,
                "file_regular" => self.file_regular = color,
                "file_directory" => self.file_directory = color,
                "file_symlink" => self.file_symlink = color,
                "file_unreadable" => self.file_unreadable = color,
                "file_other" => self.file_other = color,
                "preview_text" => self.preview_text = color,
                "preview_error" => self.preview_error = color,
                "help_key" => self.help_key = color,
                "help_text" => self.help_text = color,
                _ => tracing::warn!("Ignoring unknown theme color {}", key),
            }
        }
        self
    }
}

/// `[theme]` section of the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preset name: "dark", "light" or "mono"
    pub preset: String,
    /// Per-color overrides applied on top of the preset
    pub colors: HashMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: "dark".to_string(),
            colors: HashMap::new(),
        }
    }
}

impl ThemeConfig {
    /// Build a Theme from this config; unknown presets fall back to dark
    pub fn build_theme(&self) -> Theme {
        let base = Theme::by_name(&self.preset).unwrap_or_else(|| {
            tracing::warn!("Unknown theme preset {:?}, using dark", self.preset);
            Theme::dark()
        });
        base.with_overrides(&self.colors)
    }
}

/// Parse a color string into a ratatui Color
///
/// Supports:
/// - Named colors: "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "gray"
/// - Light variants: "light_red", "light_green", etc.
/// - RGB hex: "#RRGGBB" or "RRGGBB"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "white" => return Some(Color::White),
        "gray" | "grey" => return Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "light_red" | "lightred" => return Some(Color::LightRed),
        "light_green" | "lightgreen" => return Some(Color::LightGreen),
        "light_yellow" | "lightyellow" => return Some(Color::LightYellow),
        "light_blue" | "lightblue" => return Some(Color::LightBlue),
        "light_magenta" | "lightmagenta" => return Some(Color::LightMagenta),
        "light_cyan" | "lightcyan" => return Some(Color::LightCyan),
        "reset" | "default" => return Some(Color::Reset),
        _ => {}
    }

    let hex = s.strip_prefix('#').unwrap_or(&s);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    None
}
