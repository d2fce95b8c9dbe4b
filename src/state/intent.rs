//! Abstract user actions, decoupled from the keys that trigger them

/// Edits to the shell command line, applied by the owner of that line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellEdit {
    Insert(char),
    Backspace,
    Left,
    Right,
    /// Recall the previous command from this session
    HistoryUp,
    /// Recall the next command from this session
    HistoryDown,
    /// Append the selected entry's name, shell-quoted
    InsertSelected,
    /// Run the command and leave shell mode
    Submit,
}

/// Edits to the search query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEdit {
    Insert(char),
    Backspace,
}

/// One state transition request. At most one is applied per input cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    ToggleHidden,
    CycleSort,
    MoveSelection(isize),
    PageUp,
    PageDown,
    JumpToStart,
    JumpToEnd,
    EnterSelected,
    GoToParent,
    EnterShellMode,
    ExitShellMode,
    EnterSearchMode,
    /// Leave search mode keeping the query as a filter
    ExitSearchMode,
    /// Leave search mode and drop the query
    CancelSearch,
    ToggleHelp,
    TogglePreview,
    /// Rescan the current folder, bypassing the cache
    Refresh,
    Shell(ShellEdit),
    Search(SearchEdit),
    Quit,
}
