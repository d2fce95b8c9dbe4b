//! Help overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Widget},
};

use super::Theme;

/// Key reference drawn over the panes
pub struct HelpOverlay<'a> {
    lines: &'a [(String, &'static str)],
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(lines: &'a [(String, &'static str)], theme: &'a Theme) -> Self {
        Self { lines, theme }
    }

    /// Half-width, half-height rectangle in the middle of `area`
    pub fn centered(area: Rect) -> Rect {
        let width = (area.width / 2).max(area.width.min(30));
        let height = (area.height / 2).max(area.height.min(10));
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(Span::styled(
                " Help ",
                Style::default().fg(self.theme.title).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let key_width = self
            .lines
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(0);
        let key_style = Style::default().fg(self.theme.help_key);
        let text_style = Style::default().fg(self.theme.help_text);

        for (row, (key, description)) in self.lines.iter().take(inner.height as usize).enumerate() {
            let y = inner.y + row as u16;
            let (x, _) = buf.set_stringn(inner.x + 1, y, key, inner.width as usize, key_style);
            let desc_x = (inner.x + 1 + key_width as u16 + 2).max(x + 1);
            let remaining = (inner.x + inner.width).saturating_sub(desc_x) as usize;
            buf.set_stringn(desc_x, y, description, remaining, text_style);
        }
    }
}
