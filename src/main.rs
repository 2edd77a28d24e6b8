// ABOUTME: Main entry point for mechta with TUI and CLI support
//
// Binary: mechta
// Usage: mechta [COMMAND]
// - No command: launches the wants-capture TUI
// - login: Telegram QR login on stdout
// - logout: drop the stored session
// - whoami: show the logged-in account

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

mod api;
mod app;
mod cli;
mod components;
mod config;
mod models;
mod session;
mod wizard;

use app::{App, EventHandler};
use components::LayoutComponent;
use config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Login) => {
            let config = AppConfig::load().unwrap_or_default();
            cli::login::execute(&config).await
        }
        Some(cli::Commands::Logout) => cli::login::logout(),
        Some(cli::Commands::Whoami) => {
            let config = AppConfig::load().unwrap_or_default();
            cli::whoami::execute(&config, args.format).await
        }

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => {
            let mut app = App::new()?;
            app.init();
            let layout = LayoutComponent::new();

            // Flush any pending terminal events to prevent stray keypresses
            // from landing in the first view
            while crossterm::event::poll(Duration::from_millis(10)).unwrap_or(false) {
                let _ = crossterm::event::read();
            }

            run_tui(&mut app, &layout).await
        }
    };

    // Ensure the terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(app: &mut App, layout: &LayoutComponent) -> Result<()> {
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(app, layout, &mut terminal).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    // Ignore key events for the first 100ms so buffered keypresses from the
    // launching shell do not trigger actions
    let startup_time = Instant::now();
    const STARTUP_GUARD_MS: u64 = 100;

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) => {
                    if startup_time.elapsed() < Duration::from_millis(STARTUP_GUARD_MS) {
                        tracing::debug!(
                            "Ignoring key event {:?} during startup guard period",
                            key_event.code
                        );
                        continue;
                    }

                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state)
                    {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            match app.tick().await {
                Ok(()) => {
                    last_tick = Instant::now();
                }
                Err(e) => {
                    tracing::error!("Error during app tick: {}", e);
                    // Keep running instead of crashing
                    last_tick = Instant::now();
                }
            }
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    let log_dir = AppConfig::data_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".mechta/logs"));
    let _ = std::fs::create_dir_all(&log_dir);

    // JSONL log file per run
    let log_file = log_dir.join(format!(
        "mechta-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .expect("Failed to create log file");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mechta=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
