//! Mock upstream APIs for integration tests
//!
//! One axum server fakes every vendor the backend talks to: Google Speech,
//! Groq chat completions, Google Text-to-Speech and the `MiniMax` async T2A
//! flow. Each API lives under its own path prefix so a test points a
//! provider's `base_url` at it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use base64::Engine;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::config::TEST_API_KEY;

/// Audio bytes every mock TTS answers with
pub const MOCK_AUDIO: &[u8] = b"ID3\x04mock-mp3-audio";

/// Error Google returns when the declared sample rate contradicts the WAV header
pub const SAMPLE_RATE_MISMATCH: &str =
    "sample_rate_hertz (16000) in RecognitionConfig must either be omitted or match the value in the WAV header ( 44100).";

/// Canned behavior of the mock upstream
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Transcript returned by Google Speech, `None` answers with no results
    pub transcript: Option<String>,
    /// Reject any recognize request that declares a sample rate
    pub reject_sample_rate: bool,
    /// Status returned by Google Speech instead of a transcript
    pub stt_failure: Option<u16>,
    /// Assistant reply returned by Groq
    pub reply: String,
    /// Status returned by Groq instead of a completion
    pub llm_failure: Option<u16>,
    /// `MiniMax` polls answered with `Processing` before `Success`
    pub minimax_pending_polls: u32,
    /// Final `MiniMax` task status once pending polls are used up
    pub minimax_final_status: &'static str,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            transcript: Some("quiero visitar cusco".to_owned()),
            reject_sample_rate: false,
            stt_failure: None,
            reply: "Cusco es ideal en temporada seca.".to_owned(),
            llm_failure: None,
            minimax_pending_polls: 0,
            minimax_final_status: "Success",
        }
    }
}

/// Mock upstream server
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    options: MockOptions,
    stt_requests: Mutex<Vec<Value>>,
    llm_requests: Mutex<Vec<Value>>,
    tts_requests: Mutex<Vec<Value>>,
    minimax_polls: AtomicU32,
    minimax_downloads: AtomicU32,
    addr: Mutex<Option<SocketAddr>>,
}

impl MockUpstream {
    /// Start with default behavior
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(MockOptions::default()).await
    }

    /// Start with custom behavior
    pub async fn start_with(options: MockOptions) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            options,
            stt_requests: Mutex::new(Vec::new()),
            llm_requests: Mutex::new(Vec::new()),
            tts_requests: Mutex::new(Vec::new()),
            minimax_polls: AtomicU32::new(0),
            minimax_downloads: AtomicU32::new(0),
            addr: Mutex::new(None),
        });

        let app = Router::new()
            .route("/google-stt/v1/speech:recognize", routing::post(handle_recognize))
            .route("/groq/openai/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/google-tts/v1/text:synthesize", routing::post(handle_synthesize))
            .route("/minimax/v1/t2a_async_v2", routing::post(handle_minimax_create))
            .route("/minimax/v1/query/t2a_async_query_v2", routing::get(handle_minimax_query))
            .route("/minimax/v1/files/retrieve", routing::get(handle_minimax_retrieve))
            .route("/minimax/download/{file_id}", routing::get(handle_minimax_download))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        *state.addr.lock().unwrap() = Some(addr);

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

    pub fn google_stt_url(&self) -> String {
        format!("http://{}/google-stt/v1", self.addr)
    }

    pub fn groq_url(&self) -> String {
        format!("http://{}/groq/openai/v1", self.addr)
    }

    pub fn google_tts_url(&self) -> String {
        format!("http://{}/google-tts/v1", self.addr)
    }

    pub fn minimax_url(&self) -> String {
        format!("http://{}/minimax/v1", self.addr)
    }

    /// Recognize request bodies received so far
    pub fn stt_requests(&self) -> Vec<Value> {
        self.state.stt_requests.lock().unwrap().clone()
    }

    /// Chat completion request bodies received so far
    pub fn llm_requests(&self) -> Vec<Value> {
        self.state.llm_requests.lock().unwrap().clone()
    }

    /// Synthesis request bodies received so far, Google and `MiniMax`
    pub fn tts_requests(&self) -> Vec<Value> {
        self.state.tts_requests.lock().unwrap().clone()
    }

    pub fn minimax_polls(&self) -> u32 {
        self.state.minimax_polls.load(Ordering::Relaxed)
    }

    pub fn minimax_downloads(&self) -> u32 {
        self.state.minimax_downloads.load(Ordering::Relaxed)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Debug, Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

fn google_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "code": status.as_u16(), "message": message, "status": "INVALID_ARGUMENT" } })),
    )
        .into_response()
}

fn has_bearer(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TEST_API_KEY}"))
}

// -- Google Speech --

async fn handle_recognize(
    State(state): State<Arc<MockState>>,
    Query(query): Query<KeyQuery>,
    Json(body): Json<Value>,
) -> Response {
    state.stt_requests.lock().unwrap().push(body.clone());

    if query.key.as_deref() != Some(TEST_API_KEY) {
        return google_error(StatusCode::FORBIDDEN, "API key not valid. Please pass a valid API key.");
    }

    if let Some(status) = state.options.stt_failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return google_error(status, "Internal error encountered.");
    }

    if state.options.reject_sample_rate && body["config"].get("sampleRateHertz").is_some() {
        return google_error(StatusCode::BAD_REQUEST, SAMPLE_RATE_MISMATCH);
    }

    match &state.options.transcript {
        Some(transcript) => Json(json!({
            "results": [{
                "alternatives": [{ "transcript": transcript, "confidence": 0.93 }],
                "languageCode": "es-pe"
            }],
            "totalBilledTime": "2s"
        }))
        .into_response(),
        None => Json(json!({ "totalBilledTime": "1s" })).into_response(),
    }
}

// -- Groq --

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.llm_requests.lock().unwrap().push(body.clone());

    if !has_bearer(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "Invalid API Key", "type": "invalid_request_error" } })),
        )
            .into_response();
    }

    if let Some(status) = state.options.llm_failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (
            status,
            Json(json!({ "error": { "message": "mock failure", "type": "server_error" } })),
        )
            .into_response();
    }

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": format!("  {}\n", state.options.reply) },
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

// -- Google Text-to-Speech --

async fn handle_synthesize(
    State(state): State<Arc<MockState>>,
    Query(query): Query<KeyQuery>,
    Json(body): Json<Value>,
) -> Response {
    state.tts_requests.lock().unwrap().push(body);

    if query.key.as_deref() != Some(TEST_API_KEY) {
        return google_error(StatusCode::FORBIDDEN, "API key not valid. Please pass a valid API key.");
    }

    Json(json!({
        "audioContent": base64::engine::general_purpose::STANDARD.encode(MOCK_AUDIO)
    }))
    .into_response()
}

// -- MiniMax --

fn minimax_ok(mut body: Value) -> Response {
    body["base_resp"] = json!({ "status_code": 0, "status_msg": "success" });
    Json(body).into_response()
}

fn minimax_auth_failure() -> Response {
    Json(json!({ "base_resp": { "status_code": 1004, "status_msg": "login fail: Please carry the API secret key" } }))
        .into_response()
}

async fn handle_minimax_create(
    State(state): State<Arc<MockState>>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.tts_requests.lock().unwrap().push(body);

    if !has_bearer(&headers) {
        return minimax_auth_failure();
    }

    minimax_ok(json!({ "task_id": 95_157_322_514_444_u64, "task_token": "mock", "file_id": 186 }))
}

#[derive(Debug, Deserialize)]
struct TaskQuery {
    task_id: String,
}

async fn handle_minimax_query(State(state): State<Arc<MockState>>, Query(query): Query<TaskQuery>) -> Response {
    let poll = state.minimax_polls.fetch_add(1, Ordering::Relaxed) + 1;

    let status = if poll <= state.options.minimax_pending_polls {
        "Processing"
    } else {
        state.options.minimax_final_status
    };

    minimax_ok(json!({ "task_id": query.task_id, "status": status, "file_id": 186 }))
}

#[derive(Debug, Deserialize)]
struct FileQuery {
    file_id: String,
}

async fn handle_minimax_retrieve(State(state): State<Arc<MockState>>, Query(query): Query<FileQuery>) -> Response {
    let addr = state.addr.lock().unwrap().expect("mock address is set before serving");

    minimax_ok(json!({
        "file": {
            "file_id": query.file_id,
            "bytes": MOCK_AUDIO.len(),
            "filename": "output.mp3",
            "purpose": "t2a_async",
            "download_url": format!("http://{addr}/minimax/download/{}", query.file_id)
        }
    }))
}

async fn handle_minimax_download(State(state): State<Arc<MockState>>) -> Response {
    state.minimax_downloads.fetch_add(1, Ordering::Relaxed);
    ([(header::CONTENT_TYPE, "audio/mpeg")], MOCK_AUDIO).into_response()
}
