use axum::response::IntoResponse;
use serde::Deserialize;

/// Speech synthesis request
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize into speech
    pub text: String,
    /// Voice identifier, the provider's configured voice when absent
    #[serde(default)]
    pub voice: Option<String>,
    /// Named TTS provider, the first configured one when absent
    #[serde(default)]
    pub provider: Option<String>,
}

/// Raw audio response from a TTS provider
#[derive(Debug)]
pub struct SpeechResponse {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/mpeg")
    pub content_type: String,
}

impl IntoResponse for SpeechResponse {
    fn into_response(self) -> axum::response::Response {
        ([(http::header::CONTENT_TYPE, self.content_type)], self.audio).into_response()
    }
}
