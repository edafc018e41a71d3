//! ytdata - YouTube Data API tools for AI assistants
//!
//! Exposes YouTube video, playlist, channel, comment, caption and transcript
//! lookups as Model Context Protocol tools, each answering with a readable
//! plain-text report.
//!
//! # Overview
//!
//! ytdata allows you to:
//! - Serve 14 YouTube tools to an MCP client over stdio
//! - Call the same tools over a small HTTP bridge or from the shell
//! - Measure engagement and score videos for inclusion in a knowledge base
//! - Fetch timestamped transcripts without OAuth
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `youtube` - Data API client, response types, input parsing, transcripts
//! - `analysis` - Engagement metrics and knowledge-base evaluation
//! - `tools` - The tool operations and their dispatcher
//! - `mcp` - JSON-RPC server, tool and resource listing
//! - `cli` - Command line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use ytdata::config::Settings;
//! use ytdata::tools::{dispatch, ToolContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let ctx = ToolContext::from_settings(&settings)?;
//!
//!     let args = serde_json::json!({ "video_input": "https://youtu.be/dQw4w9WgXcQ" });
//!     let response = dispatch(&ctx, "get_video_details", Some(args)).await;
//!     println!("{}", response.text);
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;
pub mod youtube;

#[cfg(test)]
mod test_support;

pub use error::{Result, YtDataError};
