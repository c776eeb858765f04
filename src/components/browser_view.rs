//! Table browser view
//!
//! Table list on the left, rows of the selected table on the right. The
//! cursor is presentation state owned here; the selection itself lives in
//! `TableBrowser` and only changes when the user presses Enter.

use crate::action::Action;
use crate::component::Component;
use crate::components::text::sanitize;
use crate::components::{calculate_browser_layout, TableComponent};
use crate::model::TableBrowser;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct BrowserView {
    pub list_state: ListState,
    pub table: TableComponent,
}

impl BrowserView {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            table: TableComponent::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cursor
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.list_state.select(Some(prev));
    }

    pub fn select_first(&mut self, len: usize) {
        self.list_state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.list_state.select(len.checked_sub(1));
    }

    /// Keep the cursor on a valid row after the listing changed
    pub fn sync_cursor(&mut self, len: usize) {
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i < len => {}
            Some(_) => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
        }
    }

    /// Table name under the cursor
    pub fn focused_table<'a>(&self, tables: &'a [String]) -> Option<&'a str> {
        tables.get(self.list_state.selected()?).map(String::as_str)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    pub fn draw_with_browser(&mut self, frame: &mut Frame, area: Rect, browser: &TableBrowser) {
        self.sync_cursor(browser.tables().len());
        let layout = calculate_browser_layout(area, browser.error().is_some());

        if let (Some(banner), Some(error)) = (layout.banner, browser.error()) {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
            frame.render_widget(paragraph, banner);
        }

        self.draw_table_list(frame, layout.list, browser);
        self.draw_data(frame, layout.data, browser);
    }

    fn draw_table_list(&mut self, frame: &mut Frame, area: Rect, browser: &TableBrowser) {
        let title = match browser.listed_at() {
            Some(at) if !browser.tables().is_empty() => format!(
                " Database tables ({}) · {} ",
                browser.tables().len(),
                at.format("%H:%M:%S")
            ),
            _ => " Database tables ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan));

        if browser.list_loading() {
            let paragraph = info_message("Retrieving database table list...", Color::Yellow);
            frame.render_widget(paragraph.block(block), area);
            return;
        }

        if browser.tables().is_empty() {
            let paragraph = if browser.shows_no_tables() {
                info_message("No database tables available", Color::DarkGray)
            } else {
                Paragraph::new("")
            };
            frame.render_widget(paragraph.block(block), area);
            return;
        }

        let items: Vec<ListItem> = browser
            .tables()
            .iter()
            .map(|name| {
                if browser.is_selected(name) {
                    ListItem::new(Line::from(vec![
                        Span::styled("● ", Style::default().fg(Color::Green)),
                        Span::styled(
                            sanitize(name),
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(sanitize(name), Style::default().fg(Color::White)),
                    ]))
                }
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_data(&mut self, frame: &mut Frame, area: Rect, browser: &TableBrowser) {
        let title = match browser.selected() {
            Some(name) => format!(" Data: {} ", sanitize(name)),
            None => " Data ".to_string(),
        };

        if browser.shows_rows() {
            self.table
                .draw_rows(frame, area, &title, browser.columns(), browser.rows());
            return;
        }

        let paragraph = if browser.data_loading() {
            info_message("Retrieving data...", Color::Yellow)
        } else if browser.shows_no_data() {
            info_message("No data available", Color::DarkGray)
        } else if browser.selected().is_none() && !browser.tables().is_empty() {
            info_message("Press Enter on a table to view its rows", Color::DarkGray)
        } else {
            Paragraph::new("")
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph.block(block), area);
    }
}

fn info_message(text: &str, color: Color) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", text), Style::default().fg(color))),
    ])
    .wrap(Wrap { trim: false })
}

impl Component for BrowserView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('d') if ctrl => Some(Action::PageDown),
            KeyCode::Char('u') if ctrl => Some(Action::PageUp),
            KeyCode::Char('e') if ctrl => Some(Action::ScrollDown),
            KeyCode::Char('y') if ctrl => Some(Action::ScrollUp),

            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Enter => Some(Action::SelectTable),
            KeyCode::Char('r') => Some(Action::ReloadTables),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),

            KeyCode::Tab => Some(Action::NextView),
            KeyCode::BackTab => Some(Action::PrevView),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        // Cursor moves need the listing, so App calls next/previous directly
        match action {
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.table.update(action)
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the orchestrator, see draw_with_browser
        Ok(())
    }
}
