//! Component trait - interface for UI components
//!
//! A component maps key events to Actions, updates its own presentation
//! state from Actions, and draws itself. Request state lives in the
//! orchestrators, never in components.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub trait Component {
    /// Called once before the first draw
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Translate a key press into an Action. Should not change state.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Apply an Action, optionally producing a follow-up Action
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
