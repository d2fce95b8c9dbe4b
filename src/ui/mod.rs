//! UI components

pub mod file_list;
pub mod help;
pub mod preview;
pub mod prompt;
pub mod theme;

pub use file_list::FileList;
pub use help::HelpOverlay;
pub use preview::PreviewPane;
pub use prompt::Prompt;
pub use theme::Theme;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::state::app::App;
use crate::state::mode::Mode;

/// Height of the prompt line, borders included
const PROMPT_HEIGHT: u16 = 3;

/// Draw the whole screen for the current state
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if app.view.mode() == Mode::Help {
        let lines = app.keymap.help_lines();
        frame.render_widget(HelpOverlay::new(&lines, &app.theme), HelpOverlay::centered(area));
        return;
    }

    let (left, right) = if app.view.preview {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
        (left, Some(right))
    } else {
        (area, None)
    };

    let [list_area, prompt_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(PROMPT_HEIGHT)]).areas(left);

    frame.render_stateful_widget(
        FileList::new(&app.theme, app.git_label.as_deref()),
        list_area,
        &mut app.view,
    );
    frame.render_widget(
        Prompt::new(app.view.mode(), &app.cmd, app.view.search_query(), &app.theme),
        prompt_area,
    );

    if let Some(right) = right {
        frame.render_widget(
            PreviewPane::new(app.preview.as_ref(), app.view.selected(), &app.theme),
            right,
        );
    }
}
