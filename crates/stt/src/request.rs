use axum::extract::{FromRequest, Multipart, Request};
use base64::Engine as _;
use bytes::Bytes;

use crate::{
    error::{Result, SttError},
    types::{AudioUpload, Base64AudioPayload},
};

/// Multipart field carrying the audio file
const AUDIO_FIELD: &str = "audio";

/// Extractor for audio sent either as JSON `{"audio_base64": ...}` or as a
/// multipart upload with an `audio` file field
pub struct ExtractAudio(pub AudioUpload);

impl<S> FromRequest<S> for ExtractAudio
where
    S: Send + Sync,
{
    type Rejection = SttError;

    async fn from_request(request: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_multipart = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        let upload = if is_multipart {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|e| SttError::InvalidRequest(format!("Failed to parse multipart form: {e}")))?;
            read_multipart(multipart).await?
        } else {
            let body = Bytes::from_request(request, state)
                .await
                .map_err(|e| SttError::InvalidRequest(format!("Failed to read request body: {e}")))?;
            read_base64_json(&body)?
        };

        Ok(Self(upload))
    }
}

fn missing_audio() -> SttError {
    SttError::InvalidRequest("audio or audio_base64 is required".to_string())
}

fn read_base64_json(body: &[u8]) -> Result<AudioUpload> {
    if body.is_empty() {
        return Err(missing_audio());
    }

    let payload: Base64AudioPayload = serde_json::from_slice(body)
        .map_err(|e| SttError::InvalidRequest(format!("Failed to parse request body: {e}")))?;

    let encoded = payload
        .audio_base64
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing_audio)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| SttError::InvalidRequest(format!("audio_base64 is not valid base64: {e}")))?;

    Ok(AudioUpload {
        bytes,
        filename: payload.filename,
        provider: payload.provider,
    })
}

async fn read_multipart(mut multipart: Multipart) -> Result<AudioUpload> {
    let mut audio: Option<Vec<u8>> = None;
    let mut filename = None;
    let mut provider = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SttError::InvalidRequest(format!("Failed to read multipart field: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            AUDIO_FIELD => {
                filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| SttError::InvalidRequest(format!("Failed to read audio data: {e}")))?;
                audio = Some(bytes.to_vec());
            }
            "provider" => {
                provider = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| SttError::InvalidRequest(format!("Failed to read provider field: {e}")))?,
                );
            }
            _ => {
                // Skip unknown fields
            }
        }
    }

    let bytes = audio.ok_or_else(missing_audio)?;

    Ok(AudioUpload {
        bytes,
        filename,
        provider,
    })
}
