//! Speech-to-speech: transcribe an utterance, answer it and optionally voice the answer

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    response::{IntoResponse, Response},
    routing::post,
};
use base64::Engine;
use perugo_core::HttpError;
use perugo_llm::LlmError;
use serde::Serialize;
use stt::{ExtractAudio, SttError};
use thiserror::Error;
use tts::{SpeechRequest, TtsError};

/// Action hint returned to clients, no actions are emitted yet
const NO_ACTION: &str = "none";

/// Subsystems the speech pipeline runs through
pub struct StsState {
    pub stt: Arc<stt::Server>,
    pub llm: Arc<perugo_llm::Server>,
    pub tts: Arc<tts::Server>,
}

#[derive(Debug, Error)]
pub enum StsError {
    #[error(transparent)]
    Stt(#[from] SttError),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl IntoResponse for StsError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status_code(), "speech pipeline failed: {self}");

        match self {
            Self::Stt(e) => e.into_response(),
            Self::Llm(e) => e.into_response(),
        }
    }
}

impl HttpError for StsError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::Stt(e) => e.status_code(),
            Self::Llm(e) => e.status_code(),
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Stt(e) => e.error_type(),
            Self::Llm(e) => e.error_type(),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Stt(e) => e.client_message(),
            Self::Llm(e) => e.client_message(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StsResponse {
    pub stt_text: String,
    pub llm_response: String,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_content_type: Option<String>,
}

pub fn endpoint_router() -> Router<Arc<StsState>> {
    Router::new()
        .route("/sts", post(speech_to_speech))
        .layer(DefaultBodyLimit::max(stt::AUDIO_BODY_LIMIT_BYTES))
}

async fn speech_to_speech(
    State(state): State<Arc<StsState>>,
    ExtractAudio(upload): ExtractAudio,
) -> Result<Json<StsResponse>, StsError> {
    if !state.llm.is_configured() {
        return Err(LlmError::ProviderNotFound {
            provider: "default".to_owned(),
        }
        .into());
    }

    let stt_text = state.stt.transcribe(&upload).await?;

    // Nothing was said, so there is nothing to answer.
    if stt_text.trim().is_empty() {
        tracing::debug!("empty transcript, skipping LLM");
        return Ok(Json(StsResponse {
            stt_text,
            llm_response: String::new(),
            action: NO_ACTION,
            audio_base64: None,
            audio_content_type: None,
        }));
    }

    let llm_response = state.llm.reply(&stt_text, None).await?;

    let (audio_base64, audio_content_type) = match speak(&state.tts, &llm_response).await {
        Ok(Some((audio, content_type))) => (Some(audio), Some(content_type)),
        Ok(None) => (None, None),
        Err(e) => {
            tracing::warn!("speech synthesis failed, answering with text only: {e}");
            (None, None)
        }
    };

    Ok(Json(StsResponse {
        stt_text,
        llm_response,
        action: NO_ACTION,
        audio_base64,
        audio_content_type,
    }))
}

/// Voice `text` with the default TTS provider, `None` when no provider is configured
async fn speak(tts: &tts::Server, text: &str) -> Result<Option<(String, String)>, TtsError> {
    if !tts.is_configured() {
        return Ok(None);
    }

    let request = SpeechRequest {
        text: text.to_owned(),
        voice: None,
        provider: None,
    };
    let speech = tts.synthesize(&request).await?;

    Ok(Some((
        base64::engine::general_purpose::STANDARD.encode(&speech.audio),
        speech.content_type,
    )))
}
