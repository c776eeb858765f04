//! Terminal setup, teardown and event polling

use crate::services::request_runner::on_worker_thread;
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    panic,
    time::Duration,
};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// How long `next_event` waits before reporting a tick
    tick_rate: Duration,
    entered: bool,
}

impl Tui {
    pub fn new(tick_rate: Duration) -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate,
            entered: false,
        })
    }

    /// Switch to the alternate screen in raw mode.
    ///
    /// Also installs a panic hook that restores the terminal first, so a panic
    /// message is readable. Panics on request workers are caught by the
    /// runner and only logged here; the UI keeps running.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        self.entered = true;

        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if on_worker_thread() {
                tracing::error!(panic = %info, "request worker panicked");
                return;
            }
            let _ = restore_terminal();
            previous_hook(info);
        }));
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if self.entered {
            restore_terminal()?;
            self.entered = false;
        }
        Ok(())
    }

    /// Wait up to one tick for a key press, resize or other event.
    ///
    /// Returns `None` on timeout; the caller treats that as a tick.
    pub fn next_event(&self) -> Result<Option<Event>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }

        let event = event::read()?;
        // Release/repeat events show up on Windows
        if let Event::Key(key) = &event {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
        }
        Ok(Some(event))
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
