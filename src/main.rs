use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod cli;
mod config;
mod core;
mod http_client;
mod output;
mod tui;

use cli::Cli;
use config::Config;

/// Logs go to a file when asked, since the UI owns the terminal
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::sink),
                )
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.log_file.as_deref())?;

    let config = Config::from_env().with_overrides(&cli);
    if config.api_key().is_none() {
        tracing::warn!("No API key in environment; generation will fail until one is set");
    }

    let saved = tui::run(config).await?;

    if !saved.is_empty() {
        println!("{} Saved {} image(s):", "✓".green(), saved.len());
        for path in &saved {
            println!("  {}", path.display().to_string().cyan());
        }
    }

    Ok(())
}
