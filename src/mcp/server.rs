//! MCP server implementation.

use super::protocol::*;
use super::resources::{list_resources, read_resource};
use super::tools::get_tools;
use crate::tools::{dispatch, ToolContext};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Protocol revisions this server speaks, newest first.
const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];
const SERVER_NAME: &str = "ytdata";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const INTERNAL_ERROR: i32 = -32603;

/// MCP Server for ytdata.
pub struct McpServer {
    ctx: ToolContext,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("ytdata MCP server starting");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited JSON-RPC until the reader is exhausted.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw message. Returns `None` when no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                return Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"));
            }
        };

        let id = value.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(req) => req,
            Err(e) => {
                warn!("Invalid request: {}", e);
                return Some(JsonRpcResponse::error(id, INVALID_REQUEST, "Invalid Request"));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(id, INVALID_REQUEST, "Invalid Request"));
        }

        self.handle_request(request).await
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id;
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => respond(id, &ToolsListResult { tools: get_tools() }),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            "resources/list" => respond(
                id,
                &ResourcesListResult {
                    resources: list_resources(),
                },
            ),
            "resources/read" => self.handle_resources_read(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            info!(
                client = %client.name,
                version = client.version.as_deref().unwrap_or("unknown"),
                "Client connected"
            );
        }
        if !self.ctx.client.has_api_key() {
            warn!("No YouTube API key configured; tool calls will fail until one is set");
        }

        let result = InitializeResult {
            protocol_version: negotiate_version(params.protocol_version.as_deref()).to_string(),
            capabilities: ServerCapabilities {
                tools: ListChangedCapability { list_changed: false },
                resources: ListChangedCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        respond(id, &result)
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let response = dispatch(&self.ctx, &params.name, params.arguments).await;
        let result = if response.is_error {
            ToolCallResult::error(response.text)
        } else {
            ToolCallResult::text(response.text)
        };

        respond(id, &result)
    }

    /// Handle resources/read request.
    fn handle_resources_read(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ResourceReadParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, &format!("Invalid params: {}", e))
            }
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        match read_resource(&params.uri) {
            Some(text) => respond(
                id,
                &ResourceReadResult {
                    contents: vec![ResourceContents {
                        uri: params.uri,
                        mime_type: "text/plain".to_string(),
                        text,
                    }],
                },
            ),
            None => JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                &format!("Unknown resource: {}", params.uri),
            ),
        }
    }
}

/// Echo the client's protocol version when supported, else offer the newest.
fn negotiate_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|r| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|v| **v == r))
        .copied()
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0])
}

fn respond<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, &format!("Internal error: {}", e)),
    }
}
