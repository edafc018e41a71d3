//! In-process stand-in for the YouTube endpoints, used by unit tests.

use crate::youtube::YoutubeClient;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request seen by the mock server.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub path: String,
    pub params: HashMap<String, String>,
    /// Base URL of the mock itself, for responses that link back to it.
    pub base_url: String,
}

impl MockRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Path without the leading slash, i.e. the API endpoint name.
    pub fn endpoint(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

/// A canned response.
pub enum MockResponse {
    Json(StatusCode, Value),
    Html(String),
}

impl MockResponse {
    pub fn json(body: Value) -> Self {
        MockResponse::Json(StatusCode::OK, body)
    }

    pub fn status(code: u16, body: Value) -> Self {
        MockResponse::Json(
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
    }

    pub fn html(body: String) -> Self {
        MockResponse::Html(body)
    }
}

type Responder = Arc<dyn Fn(&MockRequest) -> MockResponse + Send + Sync>;

#[derive(Clone)]
struct MockState {
    base_url: String,
    responder: Responder,
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

/// Mock server bound to an ephemeral local port for the lifetime of a test.
pub struct MockYoutube {
    pub base_url: String,
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockYoutube {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&MockRequest) -> MockResponse + Send + Sync + 'static,
    {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let base_url = format!("http://{}", addr);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = MockState {
            base_url: base_url.clone(),
            responder: Arc::new(responder),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(handle).with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { base_url, requests }
    }

    /// A client pointed at this mock with a test key.
    pub fn client(&self) -> YoutubeClient {
        YoutubeClient::with_http(
            reqwest::Client::new(),
            &self.base_url,
            Some("test-key".to_string()),
        )
    }

    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Requests made to one endpoint, in order.
    pub fn requests_to(&self, endpoint: &str) -> Vec<MockRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.endpoint() == endpoint)
            .collect()
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let request = MockRequest {
        path: uri.path().to_string(),
        params,
        base_url: state.base_url.clone(),
    };
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(request.clone());

    match (state.responder)(&request) {
        MockResponse::Json(status, body) => (status, Json(body)).into_response(),
        MockResponse::Html(body) => Html(body).into_response(),
    }
}
