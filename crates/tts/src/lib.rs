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

pub use error::{Result, TtsError};
pub use server::{Server, TtsServerBuilder};
pub use types::{SpeechRequest, SpeechResponse};

/// Build the TTS server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &perugo_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/tts", post(synthesize))
}

/// Handle speech synthesis requests
async fn synthesize(State(server): State<Arc<Server>>, Json(request): Json<SpeechRequest>) -> Result<SpeechResponse> {
    tracing::debug!("TTS handler called");

    let response = server.synthesize(&request).await?;

    tracing::debug!("Speech synthesis complete: {} bytes", response.audio.len());

    Ok(response)
}
