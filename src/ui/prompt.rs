//! Prompt line below the listing: shell command or search query

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::state::command_state::CommandLine;
use crate::state::mode::Mode;

use super::Theme;

pub struct Prompt<'a> {
    mode: Mode,
    cmd: &'a CommandLine,
    query: &'a str,
    theme: &'a Theme,
}

impl<'a> Prompt<'a> {
    pub fn new(mode: Mode, cmd: &'a CommandLine, query: &'a str, theme: &'a Theme) -> Self {
        Self { mode, cmd, query, theme }
    }
}

/// First character to show so that `cursor` fits in `width` columns
fn scroll_start(cursor: usize, width: usize) -> usize {
    (cursor + 1).saturating_sub(width)
}

impl Widget for Prompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let in_shell = self.mode == Mode::Shell;
        let border = if in_shell {
            self.theme.border_active
        } else {
            self.theme.border
        };
        let title = match self.mode {
            Mode::Shell => " Shell ",
            Mode::Search => " Search ",
            _ if !self.query.is_empty() => " Filter ",
            _ => "",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(title, Style::default().fg(self.theme.title)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;
        let text_style = Style::default().fg(self.theme.preview_text);
        let cursor_style = Style::default().fg(border).add_modifier(Modifier::REVERSED);

        match self.mode {
            Mode::Shell => {
                let start = scroll_start(self.cmd.cursor(), width);
                let visible: String = self.cmd.as_str().chars().skip(start).take(width).collect();
                buf.set_string(inner.x, inner.y, &visible, text_style);

                // Cursor cell, drawn over the character it sits on
                let x = inner.x + (self.cmd.cursor() - start) as u16;
                let under = self
                    .cmd
                    .as_str()
                    .chars()
                    .nth(self.cmd.cursor())
                    .unwrap_or(' ');
                buf.set_string(x, inner.y, under.to_string(), cursor_style);
            }
            Mode::Search => {
                let start = scroll_start(self.query.chars().count(), width);
                let visible: String = self.query.chars().skip(start).collect();
                buf.set_string(inner.x, inner.y, &visible, text_style);
                let x = inner.x + visible.chars().count() as u16;
                buf.set_string(x, inner.y, "_", Style::default().fg(self.theme.border_active));
            }
            _ => {
                let visible: String = self.query.chars().take(width).collect();
                buf.set_string(inner.x, inner.y, &visible, text_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(mode: Mode, cmd: &CommandLine, query: &str, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        Prompt::new(mode, cmd, query, &Theme::dark()).render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_scroll_start() {
        assert_eq!(scroll_start(0, 10), 0);
        assert_eq!(scroll_start(9, 10), 0);
        assert_eq!(scroll_start(10, 10), 1);
        assert_eq!(scroll_start(25, 10), 16);
    }

    #[test]
    fn test_shell_prompt_shows_command_and_cursor() {
        let mut cmd = CommandLine::default();
        cmd.insert_str("ls -la");
        let buf = render(Mode::Shell, &cmd, "", 20);
        assert!(row(&buf, 0).contains("Shell"));
        assert!(row(&buf, 1).starts_with("│ls -la "));
        assert!(buf[(7, 1)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_long_command_scrolls_to_cursor() {
        let mut cmd = CommandLine::default();
        cmd.insert_str("abcdefghijklmnopqrstuvwxyz");
        let buf = render(Mode::Shell, &cmd, "", 12);
        // 10 columns inside the border: 9 characters and the cursor
        assert_eq!(row(&buf, 1), "│rstuvwxyz │");
    }

    #[test]
    fn test_search_prompt() {
        let cmd = CommandLine::default();
        let buf = render(Mode::Search, &cmd, "main", 20);
        assert!(row(&buf, 0).contains("Search"));
        assert!(row(&buf, 1).starts_with("│main_"));

        let buf = render(Mode::Browsing, &cmd, "main", 20);
        assert!(row(&buf, 0).contains("Filter"));
        assert!(row(&buf, 1).starts_with("│main "));
    }
}
