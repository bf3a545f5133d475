#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{LlmError, Result};
pub use server::{LlmServerBuilder, Server};
pub use types::{ProcessRequest, ProcessResponse, Reply};

/// Build the LLM server from configuration
///
/// # Errors
///
/// Returns an error if a provider is missing its API key
pub fn build_server(config: &perugo_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        LlmServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize LLM server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for text prompts
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/process", post(process))
}

/// Handle a plain text prompt
async fn process(State(server): State<Arc<Server>>, Json(request): Json<ProcessRequest>) -> Result<Json<ProcessResponse>> {
    let text = request.text.as_deref().map(str::trim).unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::InvalidRequest("text must not be empty".to_owned()));
    }

    tracing::debug!("LLM handler called with {} chars", text.len());

    let reply = server.reply(text, request.provider.as_deref()).await?;

    Ok(Json(ProcessResponse {
        text_response: Reply { reply },
    }))
}
