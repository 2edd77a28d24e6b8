// ABOUTME: CLI argument parsing and command routing for mechta
//
// Provides command-line interface for:
// - Logging in via the Telegram QR flow (login)
// - Inspecting and dropping the stored session (whoami, logout)
// - Launching the TUI (tui, default)

pub mod login;
pub mod whoami;

use clap::{Parser, Subcommand, ValueEnum};

/// MechtaAI wants-capture wizard for the terminal
#[derive(Parser)]
#[command(name = "mechta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// Log in with Telegram without entering the TUI
    Login,

    /// Drop the stored session
    Logout,

    /// Show the logged-in account
    Whoami,
}
