//! Action enum - everything the app can be asked to do
//!
//! Components turn key events into Actions; the App applies them.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drain finished requests
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────────
    NextView,
    PrevView,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Browser
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,
    /// Fetch rows for the table under the cursor
    SelectTable,
    /// Fetch the table list again
    ReloadTables,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Schema Upload
    // ─────────────────────────────────────────────────────────────────────────
    /// Add character to the file path input
    PathInput(char),
    /// Remove last character from the file path input
    PathBackspace,
    /// Read the file at the input path and submit it
    SubmitUpload,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextView => write!(f, "NextView"),
            Action::PrevView => write!(f, "PrevView"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::SelectTable => write!(f, "SelectTable"),
            Action::ReloadTables => write!(f, "ReloadTables"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::PathInput(c) => write!(f, "PathInput('{}')", c),
            Action::PathBackspace => write!(f, "PathBackspace"),
            Action::SubmitUpload => write!(f, "SubmitUpload"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
