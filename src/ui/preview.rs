//! Preview pane

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::fs::Entry;
use crate::preview::Preview;
use crate::utils::{format_bytes, truncate_name};

use super::Theme;
use super::file_list::{display_name, entry_color};

/// Shows the preview of the selected entry
pub struct PreviewPane<'a> {
    preview: Option<&'a Preview>,
    entry: Option<&'a Entry>,
    theme: &'a Theme,
}

impl<'a> PreviewPane<'a> {
    pub fn new(preview: Option<&'a Preview>, entry: Option<&'a Entry>, theme: &'a Theme) -> Self {
        Self { preview, entry, theme }
    }

    fn title(&self) -> String {
        let (Some(preview), Some(entry)) = (self.preview, self.entry) else {
            return String::new();
        };
        let name = &entry.name;
        match preview {
            Preview::Text { size, .. } => format!(" Text file [{}] - {} ", name, format_bytes(*size)),
            Preview::Binary { kind, size } => format!(" {} file [{}] - {} ", kind, name, format_bytes(*size)),
            Preview::Folder(entries) => format!(
                " Folder [{}] - {} {} ",
                name,
                entries.len(),
                if entries.len() > 1 { "files" } else { "file" }
            ),
            Preview::EmptyFolder => format!(" Folder [{}] - Empty ", name),
            _ => format!(" [{}] ", name),
        }
    }

    /// Message shown in place of content
    fn message(preview: &Preview) -> Option<&'static str> {
        match preview {
            Preview::Unreadable => Some("Missing permissions"),
            Preview::EmptyFile => Some("Empty file"),
            Preview::EmptyFolder => Some("Directory is empty"),
            Preview::Unavailable => Some("Couldn't preview file"),
            _ => None,
        }
    }
}

impl Widget for PreviewPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(Span::styled(self.title(), Style::default().fg(self.theme.title)));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(preview) = self.preview else {
            return;
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;
        let height = inner.height as usize;

        if let Some(message) = Self::message(preview) {
            buf.set_string(inner.x, inner.y, message, Style::default().fg(self.theme.preview_error));
            return;
        }

        match preview {
            Preview::Text { lines, .. } => {
                let style = Style::default().fg(self.theme.preview_text);
                for (row, line) in lines.iter().take(height).enumerate() {
                    let visible: String = line.chars().take(width).collect();
                    buf.set_string(inner.x, inner.y + row as u16, visible, style);
                }
            }
            Preview::Folder(entries) => {
                for (row, entry) in entries.iter().take(height).enumerate() {
                    let name = truncate_name(&display_name(entry), width);
                    let style = Style::default().fg(entry_color(entry, self.theme));
                    buf.set_string(inner.x, inner.y + row as u16, name, style);
                }
            }
            // Binary files show only the title
            _ => {}
        }
    }
}
