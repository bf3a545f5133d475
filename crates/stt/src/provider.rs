pub(crate) mod google;

use async_trait::async_trait;

use crate::audio::TranscriptionRequest;

/// Trait for STT provider implementations
#[async_trait]
pub(crate) trait SttProvider: Send + Sync {
    /// Transcribe audio to text
    ///
    /// `Ok("")` means the audio held no recognizable speech.
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
