//! CLI module for ytdata.

pub mod commands;
mod output;

pub use output::Output;

use crate::config::{GeneralSettings, Settings};
use clap::{Parser, Subcommand};
use std::path::Path;

/// ytdata - YouTube Data API tools for AI assistants
///
/// Serves YouTube video, channel, playlist, comment and transcript lookups
/// as Model Context Protocol tools. Runs the MCP server when no command is given.
#[derive(Parser, Debug)]
#[command(name = "ytdata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server on stdio for AI assistant integration (default)
    Mcp,

    /// Start HTTP bridge exposing the tools as JSON endpoints
    Serve {
        /// Host to bind to (defaults to server.host from the config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from the config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List available tools
    Tools,

    /// Call a single tool and print its output
    Call {
        /// Tool name (e.g. get_video_details)
        tool: String,

        /// Tool argument as key=value; values that parse as JSON keep their type
        #[arg(short, long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,

        /// Tool arguments as a JSON object (merged under any --arg values)
        #[arg(long)]
        json: Option<String>,
    },

    /// Check API key, configuration and connectivity
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

/// Log level for the `ytdata` target: `-v` count first, then the config
/// file's `general.log_level`, then the default.
///
/// Reads the file directly so logging can start before settings are loaded.
pub fn log_level(verbose: u8, config_path: &Path) -> String {
    match verbose {
        0 => Settings::from_file(config_path)
            .map(|s| s.general.log_level)
            .unwrap_or_else(|_| GeneralSettings::default().log_level),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_parses() {
        let cli = Cli::try_parse_from(["ytdata"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_call_with_repeated_args() {
        let cli = Cli::try_parse_from([
            "ytdata",
            "-vv",
            "call",
            "search_videos",
            "--arg",
            "query=rust async",
            "-a",
            "max_results=5",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Call { tool, args, json }) => {
                assert_eq!(tool, "search_videos");
                assert_eq!(args, vec!["query=rust async", "max_results=5"]);
                assert!(json.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_log_level_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(log_level(0, &path), "warn");

        std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(log_level(0, &path), "debug");
        assert_eq!(log_level(1, &path), "info");
        assert_eq!(log_level(3, &path), "trace");

        std::fs::write(&path, "[general\n").unwrap();
        assert_eq!(log_level(0, &path), "warn");
    }

    #[test]
    fn test_serve_overrides_are_optional() {
        let cli = Cli::try_parse_from(["ytdata", "serve", "-p", "8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert!(host.is_none());
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
