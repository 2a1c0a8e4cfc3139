//! Noughts - unified CLI
//!
//! `play` runs the terminal board, `serve` runs the persistence backend.

#![warn(missing_docs)]

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use noughts::{App, Cli, Command, GameController, PlayArgs, ServeArgs, run_tui};
use noughts_server::GameRepository;
use noughts_sync::{RemoteSync, SyncConfig};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,noughts=debug";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Serve(args) => run_serve(args).await,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Resolves sync settings: CLI over environment over file over defaults.
fn sync_config(args: &PlayArgs) -> Result<SyncConfig> {
    let base = match &args.config {
        Some(path) => SyncConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SyncConfig::default(),
    };

    Ok(base
        .with_env()
        .context("Invalid sync settings in environment")?
        .with_api_base_url(args.api_url.clone())
        .with_debounce_ms(args.debounce_ms))
}

/// Plays in the terminal, loading the latest game first if sync is on.
async fn run_play(args: PlayArgs) -> Result<()> {
    // Logs go to a file so they don't tear the board
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("Failed to create log file {}", args.log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let config = sync_config(&args)?;
    info!(
        sync = config.is_enabled(),
        debounce_ms = config.debounce_ms(),
        "Starting noughts"
    );

    let sync = RemoteSync::from_config(&config);
    let controller = GameController::new();

    // Bounded by the client's request timeout; a hung backend ends up Offline
    if sync.is_enabled() {
        match sync.load_latest().await {
            Some(game) => controller.replace(game),
            None => info!("Starting a fresh game"),
        }
    }

    // Subscribed after the load so the restored game is not saved back
    let saver = sync.spawn_saver(controller.subscribe());

    let app = App::new(controller, sync.connectivity());
    let res = run_tui(app).await;

    drop(saver);
    res
}

/// Runs the REST backend until Ctrl-C.
#[instrument(skip(args), fields(host = %args.host, port = args.port))]
async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let repository = GameRepository::new(args.db_path.clone());
    repository
        .run_migrations()
        .with_context(|| format!("Failed to prepare database {}", args.db_path))?;

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, db_path = %args.db_path, "Serving games");

    noughts_server::serve(listener, repository, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl-C");
        }
        info!("Shutdown requested");
    })
    .await
    .context("Server failed")
}
