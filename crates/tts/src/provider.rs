pub(crate) mod google;
pub(crate) mod minimax;

use async_trait::async_trait;

use crate::types::SpeechResponse;

/// Trait for TTS provider implementations
#[async_trait]
pub(crate) trait TtsProvider: Send + Sync {
    /// Synthesize text to speech
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> crate::error::Result<SpeechResponse>;

    /// Get the provider name
    fn name(&self) -> &str;
}

/// Map a non-success upstream status to an error
pub(crate) fn status_error(provider: &str, status: reqwest::StatusCode, error_text: String) -> crate::error::TtsError {
    use crate::error::TtsError;

    tracing::error!("{provider} API error ({status}): {error_text}");

    match status.as_u16() {
        400 => TtsError::InvalidRequest(error_text),
        401 | 403 => TtsError::AuthenticationFailed(error_text),
        code => TtsError::ProviderApiError {
            status: code,
            message: error_text,
        },
    }
}
