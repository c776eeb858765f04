//! Row grid for a selected table
//!
//! Renders column headers, a separator and the rows, with column widths
//! measured in terminal cells.

use crate::action::Action;
use crate::component::Component;
use crate::components::text::{cell_text, fit, sanitize};
use anyhow::Result;
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

/// Widest a column may get before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 40;
const PAGE: usize = 10;

#[derive(Default)]
pub struct TableComponent {
    scroll: usize,
}

impl TableComponent {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    /// Back to the top, used whenever a different table is selected
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    /// Build display lines for `columns` and `rows`
    pub fn build_table_lines(columns: &[String], rows: &[Vec<Value>]) -> Vec<Line<'static>> {
        let headers: Vec<String> = columns.iter().map(|c| sanitize(c)).collect();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.width());
                }
            }
        }
        for width in &mut widths {
            *width = (*width).clamp(1, MAX_COLUMN_WIDTH);
        }

        let mut lines = Vec::with_capacity(cells.len() + 4);

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        lines.push(Self::build_row_line(&headers, &widths, header_style));

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        let cell_style = Style::default().fg(Color::White);
        for row in &cells {
            lines.push(Self::build_row_line(row, &widths, cell_style));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} rows × {} columns", cells.len(), headers.len()),
            Style::default().fg(Color::Yellow),
        )));

        lines
    }

    fn build_row_line(cells: &[String], widths: &[usize], style: Style) -> Line<'static> {
        let mut spans = Vec::with_capacity(cells.len() * 2);
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(fit(cell, *width), style));
        }
        Line::from(spans)
    }

    /// Draw the grid inside a bordered block titled `title`
    pub fn draw_rows(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        columns: &[String],
        rows: &[Vec<Value>],
    ) {
        let content = Self::build_table_lines(columns, rows);
        let total = content.len();
        let visible_height = area.height.saturating_sub(2) as usize;

        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title.to_string())
                    .border_style(Style::default().fg(Color::Green)),
            )
            .scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

impl Component for TableComponent {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        // Upper bound is clamped on the next draw, when the height is known
        match action {
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the rows, see draw_rows
        Ok(())
    }
}
