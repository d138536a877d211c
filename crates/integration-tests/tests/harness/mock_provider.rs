//! Mock generation backend for integration tests
//!
//! One instance impersonates any of the remote providers: it serves the
//! OpenAI-style chat and image endpoints, the platform driver endpoint,
//! and the anonymous text/image GET endpoints, returning canned content.
//! Failures and stalls are scripted per instance.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio_util::sync::CancellationToken;

/// Fixed bytes returned by the mock image endpoints (PNG magic + filler)
pub const MOCK_IMAGE_BYTES: &[u8] = &[137, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 1];

/// Default canned text answer
pub const MOCK_TEXT: &str = "Hello from the mock provider";

pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    /// Requests to fail with 500 before succeeding (0 = never fail)
    fail_count: AtomicU32,
    /// Delay applied before answering any request
    stall: Option<Duration>,
    /// Canned text content override
    response_text: Option<String>,
}

impl MockProvider {
    /// Start a mock that always succeeds with default content
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0, None, None).await
    }

    /// Start a mock that fails the first `n` requests with 500
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(n, None, None).await
    }

    /// Start a mock that succeeds with the given text content
    pub async fn start_with_response(text: &str) -> anyhow::Result<Self> {
        Self::start_inner(0, None, Some(text.to_owned())).await
    }

    /// Start a mock that waits before answering each request
    pub async fn start_stalling(delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(0, Some(delay), None).await
    }

    async fn start_inner(
        fail_count: u32,
        stall: Option<Duration>,
        response_text: Option<String>,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            stall,
            response_text,
        });

        let app = Router::new()
            .route("/chat/completions", routing::post(handle_chat))
            .route("/images/generations", routing::post(handle_imagegen))
            .route("/drivers/call", routing::post(handle_driver))
            .route("/prompt/{*prompt}", routing::get(handle_image_bytes))
            .route("/{*prompt}", routing::get(handle_text))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for wiring this mock in as a provider override
    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}", self.addr)).expect("mock address is a valid URL")
    }

    /// Total requests received across all endpoints
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Returns true when this request is scripted to fail
async fn note_request(state: &MockState) -> bool {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if let Some(delay) = state.stall {
        tokio::time::sleep(delay).await;
    }

    let remaining = state.fail_count.load(Ordering::Relaxed);
    if remaining > 0 {
        state.fail_count.fetch_sub(1, Ordering::Relaxed);
        return true;
    }
    false
}

fn failure_response() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": {"message": "mock provider intentional failure", "type": "server_error"}
        })),
    )
        .into_response()
}

fn canned_text(state: &MockState) -> String {
    state.response_text.clone().unwrap_or_else(|| MOCK_TEXT.to_owned())
}

async fn handle_chat(State(state): State<Arc<MockState>>) -> axum::response::Response {
    if note_request(&state).await {
        return failure_response();
    }

    Json(serde_json::json!({
        "id": "chatcmpl-mock-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": canned_text(&state)},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

async fn handle_imagegen(State(state): State<Arc<MockState>>) -> axum::response::Response {
    if note_request(&state).await {
        return failure_response();
    }

    Json(serde_json::json!({
        "created": 1_700_000_000,
        "data": [{"b64_json": BASE64.encode(MOCK_IMAGE_BYTES)}]
    }))
    .into_response()
}

async fn handle_driver(State(state): State<Arc<MockState>>) -> axum::response::Response {
    if note_request(&state).await {
        return failure_response();
    }

    Json(serde_json::json!({
        "result": {"message": {"role": "assistant", "content": canned_text(&state)}}
    }))
    .into_response()
}

async fn handle_text(State(state): State<Arc<MockState>>) -> axum::response::Response {
    if note_request(&state).await {
        return failure_response();
    }

    canned_text(&state).into_response()
}

async fn handle_image_bytes(State(state): State<Arc<MockState>>) -> axum::response::Response {
    if note_request(&state).await {
        return failure_response();
    }

    ([(header::CONTENT_TYPE, "image/png")], MOCK_IMAGE_BYTES.to_vec()).into_response()
}
