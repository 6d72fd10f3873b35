//! fishcast - Fishing forecast in the terminal
//!
//! A terminal UI application that scores the upcoming days for fishing from
//! weather, sea state and moon phase, and lists them for one location.

mod app;
mod ui;

use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppState};
use fishcast::cli::{Cli, StartupConfig};
use fishcast::logging;
use fishcast::refresh::{self, RefreshConfig, RefreshHandle};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        tracing::error!(%panic_info, "panic");
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match &app.state {
        AppState::Loading => {
            ui::render_loading(frame, &app.location);
        }
        AppState::Unavailable(message) => {
            ui::render_unavailable(frame, message);
        }
        AppState::Forecast => {
            ui::render_forecast_list(frame, app);
        }
        AppState::DayDetail(index) => {
            ui::render_day_detail(frame, app, *index);
        }
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let startup_config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(startup_config.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    tracing::info!(
        location = startup_config.location.id,
        days = startup_config.days,
        "starting fishcast"
    );

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(startup_config);

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;

    app.load_forecast().await;

    let mut refresh_handle = RefreshHandle::spawn(
        RefreshConfig::default(),
        app.client(),
        app.location,
        app.days,
    );

    // Main event loop
    loop {
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        while let Some(message) = refresh::try_recv(&mut refresh_handle) {
            app.handle_refresh_message(message);
        }

        if app.refresh_requested {
            app.begin_refresh();
            terminal.draw(|f| render_ui(f, &app))?;
            app.load_forecast().await;
        }

        if app.should_quit {
            break;
        }
    }

    refresh_handle.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    tracing::info!("exiting");
    Ok(())
}
