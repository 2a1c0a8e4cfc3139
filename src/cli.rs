//! Command-line interface for noughts.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Noughts - tic-tac-toe with optional remote save
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Terminal tic-tac-toe with best-effort remote persistence", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play(PlayArgs),

    /// Run the persistence backend
    Serve(ServeArgs),
}

/// Options for `noughts play`.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Base URL of the persistence API. Sync is off when unset.
    #[arg(long)]
    pub api_url: Option<String>,

    /// TOML file with sync settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Quiet period before a change is saved, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Where to write logs while the terminal is in use
    #[arg(long, default_value = "noughts.log")]
    pub log_file: PathBuf,
}

/// Options for `noughts serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Path to the SQLite database (created if it doesn't exist)
    #[arg(long, default_value = "noughts.db")]
    pub db_path: String,
}
