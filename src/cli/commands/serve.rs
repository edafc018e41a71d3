//! Serve command - HTTP bridge to the tools.

use crate::cli::Output;
use crate::config::Settings;
use crate::mcp::{get_tools, Tool};
use crate::tools::{dispatch, ToolContext, ToolName, ToolResponse};
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state.
struct AppState {
    ctx: ToolContext,
}

/// Run the HTTP bridge.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    if settings.api_key().is_none() {
        Output::warning("No YouTube API key configured; tool calls will fail until one is set.");
    }

    let ctx = ToolContext::from_settings(&settings)?;
    let app = router(ctx);

    let addr = format!("{}:{}", host, port);
    Output::header("ytdata HTTP bridge");
    Output::kv("Address", &format!("http://{}", addr));
    println!();
    Output::info("Endpoints:");
    Output::kv("GET ", "/health - Health check");
    Output::kv("GET ", "/tools - List tools and their input schemas");
    Output::kv("POST", "/tools/{name} - Call a tool with a JSON arguments body");
    println!();

    info!("Starting HTTP bridge on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(ctx: ToolContext) -> Router {
    let state = Arc::new(AppState { ctx });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(call_tool))
        .layer(cors)
        .with_state(state)
}

// === Response types ===

#[derive(Serialize)]
struct ToolsResponse {
    tools: Vec<Tool>,
    total: usize,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_tools() -> impl IntoResponse {
    let tools = get_tools();
    Json(ToolsResponse {
        total: tools.len(),
        tools,
    })
}

/// Tool failures are still 200 responses with `is_error` set; only an
/// unknown tool or an unreadable body changes the status.
async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    if name.parse::<ToolName>().is_err() {
        return (
            StatusCode::NOT_FOUND,
            Json(ToolResponse::error(format!("Unknown tool: {}", name))),
        );
    }

    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(v) => Some(v),
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ToolResponse::error(format!("Invalid JSON body: {}", e))),
                )
            }
        }
    };

    (StatusCode::OK, Json(dispatch(&state.ctx, &name, arguments).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockRequest, MockResponse, MockYoutube};
    use crate::tools::testing::mock_context;
    use serde_json::json;

    async fn start_bridge<F>(responder: F) -> (MockYoutube, String)
    where
        F: Fn(&MockRequest) -> MockResponse + Send + Sync + 'static,
    {
        let (mock, ctx) = mock_context(responder).await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router(ctx)).await;
        });
        (mock, base)
    }

    #[tokio::test]
    async fn test_health_and_tool_list() {
        let (_mock, base) = start_bridge(|_| MockResponse::json(json!({"items": []}))).await;
        let http = reqwest::Client::new();

        let health: Value = http
            .get(format!("{}/health", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["status"], "ok");

        let tools: Value = http
            .get(format!("{}/tools", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(tools["total"], 14);
        assert_eq!(tools["tools"][0]["name"], "get_video_details");
    }

    #[tokio::test]
    async fn test_call_tool() {
        let (mock, base) = start_bridge(|_| {
            MockResponse::json(json!({"items": [
                {"id": "1", "snippet": {"title": "Film & Animation", "assignable": true}}
            ]}))
        })
        .await;

        let response = reqwest::Client::new()
            .post(format!("{}/tools/get_video_categories", base))
            .json(&json!({"region_code": "gb"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["is_error"], false);
        assert!(body["text"].as_str().unwrap().contains("Film & Animation"));
        assert_eq!(mock.requests()[0].param("regionCode"), Some("GB"));
    }

    #[tokio::test]
    async fn test_tool_failure_and_unknown_tool() {
        let (_mock, base) = start_bridge(|_| MockResponse::json(json!({"items": []}))).await;
        let http = reqwest::Client::new();

        let response = http
            .post(format!("{}/tools/get_video_details", base))
            .json(&json!({"video_input": "not a video"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["is_error"], true);
        assert!(body["text"].as_str().unwrap().starts_with("Error: "));

        let response = http
            .post(format!("{}/tools/get_weather", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        let response = http
            .post(format!("{}/tools/get_video_details", base))
            .body("{oops")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}
