//! Schema upload view
//!
//! A path input for the JSON file to compile and a status panel showing
//! the compiler's verdict.

use crate::action::Action;
use crate::component::Component;
use crate::components::text::sanitize;
use crate::model::{SchemaUpload, UploadStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::fs;
use std::path::PathBuf;

pub const EMPTY_PATH_MESSAGE: &str = "Enter the path of a JSON file";

#[derive(Default)]
pub struct UploadView {
    pub input: String,
    /// Why the last picked path could not be read
    pub input_error: Option<String>,
}

impl UploadView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the input, used when the view is entered again
    pub fn reset(&mut self) {
        self.input.clear();
        self.input_error = None;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.input_error = None;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.input_error = None;
    }

    fn resolved_path(&self) -> Option<PathBuf> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(rest));
            }
        }
        Some(PathBuf::from(trimmed))
    }

    /// Read the picked file as text. Failures are kept in `input_error`.
    pub fn read_file(&mut self) -> Option<String> {
        let Some(path) = self.resolved_path() else {
            self.input_error = Some(EMPTY_PATH_MESSAGE.to_string());
            return None;
        };

        match fs::read(&path) {
            Ok(bytes) => {
                self.input_error = None;
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "read schema file");
                Some(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(err) => {
                tracing::info!(path = %path.display(), %err, "could not read schema file");
                self.input_error = Some(format!("Cannot read {}: {}", path.display(), err));
                None
            }
        }
    }

    pub fn draw_with_upload(&mut self, frame: &mut Frame, area: Rect, upload: &SchemaUpload) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        self.draw_input(frame, chunks[0], upload.is_submitting());
        draw_result(frame, chunks[1], upload);
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect, submitting: bool) {
        let border = if submitting { Color::DarkGray } else { Color::Cyan };
        let mut lines = vec![Line::from(vec![
            Span::styled("File: ", Style::default().fg(Color::Yellow)),
            Span::styled(self.input.clone(), Style::default().fg(Color::White)),
            Span::styled(
                if submitting { "" } else { "█" },
                Style::default().fg(Color::Cyan),
            ),
        ])];
        if let Some(error) = &self.input_error {
            lines.push(Line::from(Span::styled(
                sanitize(error),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Upload JSON schema ")
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);
    }
}

fn draw_result(frame: &mut Frame, area: Rect, upload: &SchemaUpload) {
    let mut lines = vec![Line::from("")];

    match upload.status() {
        UploadStatus::Idle => {
            lines.push(Line::from(Span::styled(
                "  Type a path and press Enter to compile it",
                Style::default().fg(Color::DarkGray),
            )));
        }
        UploadStatus::Submitting => {
            lines.push(Line::from(Span::styled(
                "  Compiling...",
                Style::default().fg(Color::Yellow),
            )));
        }
        status => {
            let color = if status.is_error() { Color::Red } else { Color::Green };
            lines.push(Line::from(Span::styled(
                format!("  {}", sanitize(upload.message())),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
    }

    if let Some(summary) = upload.schema_summary() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Schema: ", Style::default().fg(Color::DarkGray)),
            Span::raw(sanitize(summary)),
        ]));
    }
    if let Some(tag) = upload.body_status() {
        lines.push(Line::from(vec![
            Span::styled("  Reply status: ", Style::default().fg(Color::DarkGray)),
            Span::raw(sanitize(tag)),
        ]));
    }
    if let Some(at) = upload.completed_at() {
        lines.push(Line::from(vec![
            Span::styled("  Completed: ", Style::default().fg(Color::DarkGray)),
            Span::raw(at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Result ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

impl Component for UploadView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter => Some(Action::SubmitUpload),
            KeyCode::Backspace => Some(Action::PathBackspace),
            KeyCode::Tab => Some(Action::NextView),
            KeyCode::BackTab => Some(Action::PrevView),
            KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::F(1) => Some(Action::OpenHelp),
            KeyCode::Char(c) => Some(Action::PathInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::PathInput(c) => self.push_char(c),
            Action::PathBackspace => self.backspace(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the orchestrator, see draw_with_upload
        Ok(())
    }
}
