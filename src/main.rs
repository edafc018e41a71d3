//! ytdata CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytdata::cli::{commands, log_level, Cli, Commands};
use ytdata::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => Settings::expand_path(path),
        None => Settings::default_config_path(),
    };

    // Logging starts before the settings load so the load itself is logged;
    // stdout carries JSON-RPC, so logs go to stderr
    let level = log_level(cli.verbose, &config_path);

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytdata={}", level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration
    let settings = Settings::load_from(Some(&config_path))?;

    // Execute command
    match cli.command.unwrap_or(Commands::Mcp) {
        Commands::Mcp => {
            commands::run_mcp(settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, port, settings).await?;
        }

        Commands::Tools => {
            commands::run_tools()?;
        }

        Commands::Call { tool, args, json } => {
            commands::run_call(&tool, &args, json.as_deref(), settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings, config_path)?;
        }
    }

    Ok(())
}
