//! Listing of the current folder

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, StatefulWidget, Widget},
};

use crate::fs::Entry;
use crate::state::view::ViewState;
use crate::utils::{format_bytes, truncate_name};

use super::Theme;

/// Width of the right-aligned size column
const SIZE_WIDTH: usize = 7;

/// Color of an entry's row
pub fn entry_color(entry: &Entry, theme: &Theme) -> Color {
    if !entry.readable {
        theme.file_unreadable
    } else if entry.is_symlink() {
        theme.file_symlink
    } else if entry.is_dir() {
        theme.file_directory
    } else if entry.is_regular_file() {
        theme.file_regular
    } else {
        theme.file_other
    }
}

/// Name as listed; symlinks show their target
pub fn display_name(entry: &Entry) -> String {
    match &entry.symlink_target {
        Some(target) => format!("{} -> {}", entry.name, target.display()),
        None => entry.name.clone(),
    }
}

/// Byte size for files, child count for folders
fn size_column(entry: &Entry) -> String {
    match entry.child_count {
        Some(count) => count.to_string(),
        None if entry.is_regular_file() => format_bytes(entry.size),
        None => String::new(),
    }
}

/// Rows to show so that the selection stays centered once the list overflows
pub fn visible_window(selection: usize, len: usize, height: usize) -> Range<usize> {
    if len <= height {
        return 0..len;
    }
    let start = selection
        .saturating_sub(height / 2)
        .min(len - height);
    start..start + height
}

/// The file list pane; reports its height back to the view for paging
pub struct FileList<'a> {
    theme: &'a Theme,
    git_label: Option<&'a str>,
}

impl<'a> FileList<'a> {
    pub fn new(theme: &'a Theme, git_label: Option<&'a str>) -> Self {
        Self { theme, git_label }
    }

    fn title(state: &ViewState) -> String {
        let cwd = state.cwd().display();
        if state.entries().is_empty() {
            format!(" [{}] - Empty ", cwd)
        } else {
            format!(
                " [{}] - Entry {}/{} ",
                cwd,
                state.selection() + 1,
                state.entries().len()
            )
        }
    }
}

impl StatefulWidget for FileList<'_> {
    type State = ViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = Style::default().fg(self.theme.border);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                Self::title(state),
                Style::default().fg(self.theme.title),
            ))
            .title_bottom(
                Line::from(Span::styled(
                    format!(" {} ", state.sort_mode().indicator()),
                    Style::default().fg(self.theme.sort_indicator),
                ))
                .right_aligned(),
            );
        if let Some(label) = self.git_label {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" Git: {} ", label),
                Style::default().fg(self.theme.git_label),
            )));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        state.visible_rows = (inner.height as usize).max(1);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let name_width = width.saturating_sub(SIZE_WIDTH + 1);
        let window = visible_window(state.selection(), state.entries().len(), inner.height as usize);

        for (row, index) in window.enumerate() {
            let entry = &state.entries()[index];
            let name = truncate_name(&display_name(entry), name_width);
            let line = format!(
                "{:<name_w$} {:>size_w$}",
                name,
                size_column(entry),
                name_w = name_width,
                size_w = SIZE_WIDTH,
            );

            let mut style = Style::default().fg(entry_color(entry, self.theme));
            if index == state.selection() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let line: String = line.chars().take(width).collect();
            buf.set_string(inner.x, inner.y + row as u16, line, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::EntryKind;
    use crate::fs::entry::tests::fake;
    use crate::listing::SortMode;
    use std::path::PathBuf;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_visible_window() {
        assert_eq!(visible_window(0, 3, 10), 0..3);
        assert_eq!(visible_window(0, 100, 10), 0..10);
        assert_eq!(visible_window(50, 100, 10), 45..55);
        assert_eq!(visible_window(99, 100, 10), 90..100);
        assert_eq!(visible_window(0, 0, 10), 0..0);
    }

    #[test]
    fn test_entry_colors() {
        let theme = Theme::dark();
        assert_eq!(entry_color(&fake("d", EntryKind::Directory, 0), &theme), Color::Cyan);
        assert_eq!(entry_color(&fake("f", EntryKind::File, 1), &theme), Color::Green);
        assert_eq!(entry_color(&fake("l", EntryKind::Symlink, 0), &theme), Color::Magenta);
        let mut locked = fake("x", EntryKind::Directory, 0);
        locked.readable = false;
        assert_eq!(entry_color(&locked, &theme), Color::Red);
    }

    #[test]
    fn test_render_listing() {
        let theme = Theme::dark();
        let mut view = ViewState::new(PathBuf::from("/data"), SortMode::AlphaAsc, false, false);
        let mut dir = fake("docs", EntryKind::Directory, 0);
        dir.child_count = Some(4);
        let mut link = fake("latest", EntryKind::Symlink, 0);
        link.symlink_target = Some(PathBuf::from("docs"));
        view.set_listing(vec![dir, fake("a_rather_long_file_name.txt", EntryKind::File, 1500), link]);
        view.apply(crate::state::intent::Intent::MoveSelection(1));

        let area = Rect::new(0, 0, 34, 6);
        let mut buf = Buffer::empty(area);
        FileList::new(&theme, Some("peruse <main>")).render(area, &mut buf, &mut view);

        assert!(row(&buf, 0).contains("[/data] - Entry 2/3"));
        assert_eq!(row(&buf, 1), format!("│{:<24} {:>7}│", "docs", "4"));
        assert_eq!(row(&buf, 2), format!("│{:<24} {:>7}│", "a_rather_long_file_name+", "1.5 KB"));
        assert_eq!(row(&buf, 3), format!("│{:<32}│", "latest -> docs"));
        assert!(row(&buf, 5).contains("Git: peruse <main>"));
        assert!(row(&buf, 5).contains("aA->zZ"));
        assert_eq!(view.visible_rows, 4);
        assert!(buf[(1, 2)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_render_empty_folder() {
        let theme = Theme::dark();
        let mut view = ViewState::new(PathBuf::from("/empty"), SortMode::SizeDesc, false, false);
        view.set_listing(Vec::new());
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        FileList::new(&theme, None).render(area, &mut buf, &mut view);
        assert!(row(&buf, 0).contains("[/empty] - Empty"));
        assert!(!row(&buf, 3).contains("Git:"));
        assert!(row(&buf, 3).contains("big->small"));
    }
}
