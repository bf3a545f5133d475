#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

pub mod audio;
mod error;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::post};

pub use audio::{AudioEncoding, TranscriptionRequest, resolve};
pub use error::{Result, SttError};
pub use request::ExtractAudio;
pub use server::{Server, SttServerBuilder};
pub use types::{AudioUpload, SttResponse};

/// Body limit for audio uploads (32 MiB)
pub const AUDIO_BODY_LIMIT_BYTES: usize = 32 << 20;

/// Build the STT server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &perugo_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        SttServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize STT server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for STT
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/stt_base64", post(transcribe))
        .layer(DefaultBodyLimit::max(AUDIO_BODY_LIMIT_BYTES))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    ExtractAudio(upload): ExtractAudio,
) -> Result<Json<SttResponse>> {
    tracing::debug!("STT handler called with {} bytes", upload.bytes.len());

    let stt_text = server.transcribe(&upload).await?;

    tracing::debug!("Transcription complete");

    Ok(Json(SttResponse { stt_text }))
}
