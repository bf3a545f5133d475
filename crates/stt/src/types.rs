use serde::{Deserialize, Serialize};

/// Audio received from a client, before any format detection
#[derive(Debug, Default)]
pub struct AudioUpload {
    /// Raw audio bytes
    pub bytes: Vec<u8>,
    /// Original filename, used as a format hint
    pub filename: Option<String>,
    /// Named STT provider, the first configured one when absent
    pub provider: Option<String>,
}

/// JSON body accepted by the base64 transcription route
#[derive(Debug, Deserialize)]
pub(crate) struct Base64AudioPayload {
    #[serde(default)]
    pub audio_base64: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Transcription result returned to clients
///
/// An empty `stt_text` means the recognizer heard no speech.
#[derive(Debug, Serialize, Deserialize)]
pub struct SttResponse {
    pub stt_text: String,
}
