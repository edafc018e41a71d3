//! MCP (Model Context Protocol) server for ytdata.
//!
//! Exposes the YouTube tools to AI assistants.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod resources;
mod server;
mod tools;

pub use protocol::Tool;
pub use server::McpServer;
pub use tools::get_tools;
