// src/cli/mod.rs
// Command-line front end

use clap::{Parser, Subcommand};
use facelens::config::{ApiMode, ClientConfig, ConfigError};
use std::path::PathBuf;

pub mod commands;
pub mod render;

pub use commands::run;

#[derive(Parser)]
#[command(name = "facelens")]
#[command(about = "Classify faces as real or AI-generated and inspect the model")]
#[command(version)]
pub struct Cli {
    /// Use the simulated backend instead of the live API
    #[arg(long, global = true)]
    pub mock: bool,

    /// Backend base URL (overrides config file and FACELENS_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a face image (JPEG, PNG, WebP or GIF, up to 10 MB)
    Classify {
        /// Image file
        path: PathBuf,
    },

    /// Summarize a piece of text
    Summarize {
        /// Text to summarize
        text: String,

        /// Optional context for the summary
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Chat with the assistant (interactive when no message is given)
    Chat {
        /// Message to send
        message: Vec<String>,
    },

    /// Show training curves, summary and confusion statistics
    Metrics,

    /// Check backend health
    Health,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = ClientConfig::load()?;
        if let Some(ref url) = self.base_url {
            config = config.with_base_url(url)?;
        }
        if self.mock {
            config = config.with_mode(ApiMode::Mock);
        }
        Ok(config)
    }
}
