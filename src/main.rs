use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ideaboard::{cli, config, server};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ideaboard", version, about = "Ideas board backend: ideas, comments and likes over HTTP")]
struct Cli {
    /// Path to the TOML config file [default: ./ideaboard.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Show idea, comment and like counts
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check database integrity and like-counter consistency
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = match &cli.config {
        Some(path) => config::BoardConfig::load_from(path)?,
        None => config::BoardConfig::load()?,
    };

    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::serve(config).await?,
        Command::Stats { json } => cli::stats(&config, json)?,
        Command::Doctor => cli::doctor(&config)?,
    }

    Ok(())
}
