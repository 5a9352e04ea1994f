// src/main.rs
// facelens - command-line client for the face classification backend

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use facelens::api::ApiClient;
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env files (global first, then current directory)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".facelens/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.client_config()?;
    debug!(mode = %config.mode, origin = %config.origin(), "Starting facelens");

    let client = ApiClient::from_config(&config);
    cli::run(&cli, &client).await
}
