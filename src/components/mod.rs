//! UI Components
//!
//! Each component encapsulates its own presentation state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod browser_view;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod table;
pub mod text;
pub mod upload_view;

pub use browser_view::BrowserView;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_browser_layout, calculate_screen_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use table::TableComponent;
pub use upload_view::UploadView;
