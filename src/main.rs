#![warn(clippy::all, clippy::pedantic)]

use akin::config::Config;
use akin::gateway;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "akin", about = "Turn engine for an LLM-driven guessing game", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP gateway (default)
    Serve {
        /// Bind host; overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Bind port; overrides the config file
        #[arg(long)]
        port: Option<u16>,

        /// Path to config.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS before any client is
    // built, otherwise reqwest cannot determine the process-level provider.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let (host, port, config_path) = match cli.command {
        Some(Command::Serve { host, port, config }) => (host, port, config),
        None => (None, None, None),
    };

    let mut config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load_or_init()?,
    };
    if let Some(host) = host {
        config.gateway.host = host;
    }
    if let Some(port) = port {
        config.gateway.port = port;
    }

    tracing::info!(
        model = %config.model,
        min_questions = config.policy.min_questions,
        confidence_threshold = config.policy.confidence_threshold,
        "starting akin gateway"
    );
    gateway::run_gateway(&config).await
}
