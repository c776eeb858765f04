//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Request state lives in the two orchestrators; App only routes Actions to
//! them and to the views.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_screen_layout, BrowserView, HelpDialog, QuitDialog, UploadView};
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::View;
use crate::model::{SchemaUpload, TableBrowser, UploadStatus};
use crate::services::{CompilerApi, DataApi};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Currently mounted view
    pub view: View,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Orchestrators
    // ─────────────────────────────────────────────────────────────────────────
    pub browser: TableBrowser,
    pub upload: SchemaUpload,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub browser_view: BrowserView,
    pub upload_view: UploadView,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Initialization
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(data_api: Arc<dyn DataApi>, compiler_api: Arc<dyn CompilerApi>) -> App {
        App {
            view: View::Tables,
            modals: ModalStack::new(),
            should_quit: false,
            browser: TableBrowser::new(data_api),
            upload: SchemaUpload::new(compiler_api),
            browser_view: BrowserView::new(),
            upload_view: UploadView::new(),
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog::default(),
        }
    }

    /// Show `view` with fresh state, as if opened for the first time
    fn mount(&mut self, view: View) {
        tracing::debug!(view = view.title(), "mounting view");
        self.view = view;
        match view {
            View::Tables => {
                self.browser_view.table.reset_scroll();
                self.browser.load_table_list();
            }
            View::Compiler => {
                self.upload_view.reset();
                self.upload.reset();
            }
        }
    }

    fn in_flight(&self) -> usize {
        usize::from(self.browser.is_busy()) + usize::from(self.upload.is_busy())
    }

    fn select_focused_table(&mut self) {
        let Some(name) = self
            .browser_view
            .focused_table(self.browser.tables())
            .map(str::to_string)
        else {
            return;
        };
        self.browser_view.table.reset_scroll();
        self.browser.select_table(&name);
    }

    fn submit_upload(&mut self) {
        if self.upload.is_submitting() {
            return;
        }
        if let Some(raw) = self.upload_view.read_file() {
            self.upload.submit(&raw);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.mount(View::Tables);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return match modal {
                Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
                Modal::Help => self.help_dialog.handle_key_event(key),
            };
        }

        match self.view {
            View::Tables => self.browser_view.handle_key_event(key),
            View::Compiler => self.upload_view.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.browser.poll();
                self.upload.poll();
            }
            Action::ForceQuit => {
                tracing::info!(in_flight = self.in_flight(), "quitting");
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Views
            // ─────────────────────────────────────────────────────────────────
            Action::NextView => self.mount(self.view.next()),
            Action::PrevView => self.mount(self.view.previous()),

            // ─────────────────────────────────────────────────────────────────
            // Table Browser
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.browser_view.next(self.browser.tables().len()),
            Action::PrevItem => self.browser_view.previous(self.browser.tables().len()),
            Action::FirstItem => self.browser_view.select_first(self.browser.tables().len()),
            Action::LastItem => self.browser_view.select_last(self.browser.tables().len()),
            Action::SelectTable => self.select_focused_table(),
            Action::ReloadTables => {
                self.browser_view.table.reset_scroll();
                self.browser.load_table_list();
            }
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.browser_view.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Schema Upload
            // ─────────────────────────────────────────────────────────────────
            Action::PathInput(_) | Action::PathBackspace => {
                if !self.upload.is_submitting() {
                    self.upload_view.update(action)?;
                }
            }
            Action::SubmitUpload => self.submit_upload(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.in_flight = self.in_flight();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.update(Action::OpenHelp)?;
                self.modals.toggle(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_screen_layout(area);

        self.draw_tabs(frame, layout.tabs);
        match self.view {
            View::Tables => self
                .browser_view
                .draw_with_browser(frame, layout.body, &self.browser),
            View::Compiler => self
                .upload_view
                .draw_with_upload(frame, layout.body, &self.upload),
        }
        self.draw_status_line(frame, layout.status);
        self.draw_help_bar(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            match modal {
                Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                Modal::Help => self.help_dialog.draw(frame, area)?,
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<&str> = View::all().iter().map(|v| v.title()).collect();
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" data-console ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .select(self.view.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    /// Text of the one-line status under the body
    fn status_text(&self) -> String {
        let last = match self.view {
            View::Tables => self
                .browser
                .last_outcome()
                .map(|outcome| format!("last request: {}", outcome)),
            View::Compiler => match self.upload.status() {
                UploadStatus::Idle => None,
                UploadStatus::Submitting => Some("last request: pending".to_string()),
                UploadStatus::Accepted => Some("last request: ok".to_string()),
                UploadStatus::Rejected => Some("last request: rejected".to_string()),
                UploadStatus::ParseError => Some("last request: not sent".to_string()),
                UploadStatus::TransportFailure => {
                    Some("last request: transport failure".to_string())
                }
            },
        };

        let mut text = String::from(" ");
        if self.in_flight() > 0 {
            text.push_str("⟳ working  ");
        }
        text.push_str(last.as_deref().unwrap_or("ready"));
        text
    }

    fn draw_status_line(&self, frame: &mut Frame, area: Rect) {
        let color = if self.in_flight() > 0 {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            self.status_text(),
            Style::default().fg(color),
        )));
        frame.render_widget(paragraph, area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.view {
            _ if !self.modals.is_empty() => &[("Esc", "close dialog")],
            View::Tables => &[
                ("j/k", "move"),
                ("Enter", "show rows"),
                ("r", "reload"),
                ("Tab", "compiler"),
                ("?", "help"),
                ("q", "quit"),
            ],
            View::Compiler => &[
                ("Enter", "compile file"),
                ("Tab", "tables"),
                ("F1", "help"),
                ("Esc", "quit"),
            ],
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, description) in hints {
            spans.push(Span::styled(
                format!(" {} ", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("{}  ", description),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gateway::{GatewayError, HttpReply};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    struct FakeDataApi {
        list_calls: AtomicUsize,
    }

    impl DataApi for FakeDataApi {
        fn list_tables(&self) -> Result<HttpReply, GatewayError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpReply {
                status: 200,
                body: r#"{"database_tables":["t1","t2"]}"#.to_string(),
            })
        }

        fn table_data(&self, table: &str) -> Result<HttpReply, GatewayError> {
            Ok(HttpReply {
                status: 200,
                body: format!(r#"{{"columns":["name"],"rows":[["{}"]]}}"#, table),
            })
        }
    }

    struct FakeCompilerApi;

    impl CompilerApi for FakeCompilerApi {
        fn compile(&self, _document: &Value) -> Result<HttpReply, GatewayError> {
            Ok(HttpReply {
                status: 200,
                body: r#"{"status":"success","message":"Compiled successfully"}"#.to_string(),
            })
        }
    }

    fn new_app() -> (App, Arc<FakeDataApi>) {
        let data = Arc::new(FakeDataApi {
            list_calls: AtomicUsize::new(0),
        });
        let app = App::new(data.clone(), Arc::new(FakeCompilerApi));
        (app, data)
    }

    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.update(Action::Tick).unwrap();
            if app.in_flight() == 0 {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("requests did not settle");
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_init_loads_table_list() {
        let (mut app, data) = new_app();
        app.init().unwrap();
        assert!(app.browser.list_loading());

        settle(&mut app);
        assert_eq!(app.browser.tables(), ["t1", "t2"]);
        assert_eq!(data.list_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_enter_selects_table_under_cursor() {
        let (mut app, _) = new_app();
        app.init().unwrap();
        settle(&mut app);

        app.browser_view.sync_cursor(app.browser.tables().len());
        app.update(Action::NextItem).unwrap();
        app.update(Action::SelectTable).unwrap();
        settle(&mut app);

        assert_eq!(app.browser.selected(), Some("t2"));
        assert_eq!(app.browser.rows().len(), 1);
    }

    #[test]
    fn test_select_without_listing_does_nothing() {
        let (mut app, _) = new_app();
        app.update(Action::SelectTable).unwrap();
        assert!(app.browser.selected().is_none());
        assert!(!app.browser.is_busy());
    }

    #[test]
    fn test_switching_views_remounts_fresh() {
        let (mut app, data) = new_app();
        app.init().unwrap();
        settle(&mut app);

        app.update(Action::NextView).unwrap();
        assert_eq!(app.view, View::Compiler);
        app.update(Action::PathInput('x')).unwrap();
        assert_eq!(app.upload_view.input, "x");

        app.update(Action::NextView).unwrap();
        assert_eq!(app.view, View::Tables);
        settle(&mut app);
        assert_eq!(data.list_calls.load(Ordering::SeqCst), 2);

        app.update(Action::PrevView).unwrap();
        assert_eq!(app.upload_view.input, "");
        assert_eq!(app.upload.status(), UploadStatus::Idle);
    }

    #[test]
    fn test_submit_with_missing_file_stays_idle() {
        let (mut app, _) = new_app();
        app.update(Action::NextView).unwrap();
        for c in "/no/such/file.json".chars() {
            app.update(Action::PathInput(c)).unwrap();
        }
        app.update(Action::SubmitUpload).unwrap();

        assert_eq!(app.upload.status(), UploadStatus::Idle);
        assert!(app.upload_view.input_error.is_some());
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let (mut app, _) = new_app();
        app.update(Action::OpenHelp).unwrap();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key_event(ctrl_c).unwrap(), Some(Action::ForceQuit));
    }

    #[test]
    fn test_modal_takes_keys_until_closed() {
        let (mut app, _) = new_app();
        app.update(Action::OpenQuitDialog).unwrap();

        // 'r' would reload in the table view
        assert_eq!(app.handle_key_event(key(KeyCode::Char('r'))).unwrap(), None);
        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));

        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
        assert_eq!(
            app.handle_key_event(key(KeyCode::Char('r'))).unwrap(),
            Some(Action::ReloadTables)
        );
    }

    #[test]
    fn test_new_app_starts_on_tables_without_dialogs() {
        let (app, _) = new_app();
        assert_eq!(app.view, View::Tables);
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_status_text_reports_last_request() {
        let (mut app, _) = new_app();
        assert_eq!(app.status_text(), " ready");

        app.init().unwrap();
        settle(&mut app);
        assert_eq!(app.status_text(), " last request: ok");
    }
}
