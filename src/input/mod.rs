//! Input handling
//!
//! Key presses are resolved to intents for the current mode and applied to the app.

pub mod keymap;

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::state::app::App;

/// Handle a key event based on current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Windows also reports releases and repeats
    if key.kind != KeyEventKind::Press {
        return;
    }
    if let Some(intent) = app.keymap.resolve(app.view.mode(), &key) {
        app.handle_intent(intent);
    }
}
