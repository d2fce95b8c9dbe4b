/// Exclusive interaction context. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal file browsing
    #[default]
    Browsing,
    /// Typing a shell command in the prompt line
    Shell,
    /// Typing a search query (live filter)
    Search,
    /// Help overlay; swallows every intent except closing it
    Help,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Browsing => "browse",
            Mode::Shell => "shell",
            Mode::Search => "search",
            Mode::Help => "help",
        }
    }
}
