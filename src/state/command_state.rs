//! Shell command line state and session history.

/// The shell prompt's input buffer.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// correctly. History lives only for the current session.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    /// Command line input buffer
    input: String,
    /// Cursor position in characters
    cursor: usize,
    /// Commands submitted this session (most recent last)
    history: Vec<String>,
    /// Current position in history (None = not browsing history)
    history_index: Option<usize>,
    /// Input typed before history browsing started
    history_temp: String,
}

impl CommandLine {
    pub fn as_str(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.input
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Insert text at the cursor
    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor);
        self.input.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.input.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Navigate up in command history
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let index = match self.history_index {
            None => {
                self.history_temp = self.input.clone();
                self.history.len() - 1
            }
            Some(0) => return,
            Some(idx) => idx - 1,
        };
        self.history_index = Some(index);
        self.set_input(self.history[index].clone());
    }

    /// Navigate down in command history
    pub fn history_down(&mut self) {
        match self.history_index {
            None => {}
            Some(idx) if idx + 1 >= self.history.len() => {
                self.history_index = None;
                let restored = std::mem::take(&mut self.history_temp);
                self.set_input(restored);
            }
            Some(idx) => {
                self.history_index = Some(idx + 1);
                self.set_input(self.history[idx + 1].clone());
            }
        }
    }

    fn set_input(&mut self, input: String) {
        self.input = input;
        self.cursor = self.char_len();
    }

    /// Take the typed command, recording it in history. Empty input yields None.
    pub fn submit(&mut self) -> Option<String> {
        let command = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.history_index = None;
        self.history_temp.clear();

        if command.trim().is_empty() {
            return None;
        }
        if self.history.last() != Some(&command) {
            self.history.push(command.clone());
        }
        Some(command)
    }
}
