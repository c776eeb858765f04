//! data-console - A terminal console for a data API and a schema compiler
//!
//! This is the main entry point for the data-console application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::logging::LoggingConfig;
use crate::services::{HttpCompilerApi, HttpDataApi};
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let _log_guard = logging::init(&LoggingConfig::default()).context("failed to set up logging")?;

    let config = Config::load()?;
    tracing::info!(
        data_api = %config.data_api_url,
        compiler = %config.compiler_url,
        "starting data-console"
    );

    let data_api = Arc::new(HttpDataApi::new(config.data_api_url)?);
    let compiler_api = Arc::new(HttpCompilerApi::new(config.compiler_url)?);

    // Setup terminal
    let mut tui = Tui::new(Duration::from_millis(100))?;
    tui.enter()?;

    let mut app = App::new(data_api, compiler_api);

    // Main event loop
    let result = app.init().and_then(|_| run_app(&mut tui, &mut app));

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        }

        // Requests finish independently of input, so poll every iteration
        app.update(Action::Tick)?;
    }

    Ok(())
}
