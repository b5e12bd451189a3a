//! portfolio-tui - A personal portfolio in the terminal
//!
//! This is the main entry point for the portfolio-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod listeners;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_default();

    // Logging is best effort; the portfolio still runs without a log file
    if let Err(err) = logging::init() {
        eprintln!("Warning: logging disabled: {:#}", err);
    }

    // Parse content before touching the terminal so errors print normally
    let site = services::load_site()?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;

    // Create app state
    let mut app = App::new(config, site);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Exiting with error: {:#}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("Exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("Draw error: {:#}", e);
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            for action in app.handle_event(&event)? {
                process_action(app, action)?;
            }
        } else {
            // No event - send a tick for time-based updates
            process_action(app, Action::Tick)?;
        }
    }

    Ok(())
}

/// Apply an action and any follow-up actions it produces
fn process_action(app: &mut App, action: Action) -> Result<()> {
    let mut current_action = Some(action);
    while let Some(a) = current_action {
        current_action = app.update(a)?;
    }
    Ok(())
}
