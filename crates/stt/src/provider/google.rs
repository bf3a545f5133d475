use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    audio::{AudioEncoding, TranscriptionRequest},
    error::SttError,
};

use super::SttProvider;

const DEFAULT_GOOGLE_SPEECH_URL: &str = "https://speech.googleapis.com/v1";

/// Google Cloud Speech-to-Text provider (synchronous `speech:recognize`)
pub(crate) struct GoogleSpeechProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    name: String,
    language_code: Option<String>,
}

impl GoogleSpeechProvider {
    pub fn new(name: String, api_key: SecretString, base_url: Option<String>, language_code: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_GOOGLE_SPEECH_URL.to_string());

        Self {
            client: perugo_core::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            name,
            language_code,
        }
    }

    async fn recognize(&self, request: &TranscriptionRequest) -> crate::error::Result<String> {
        let url = Url::parse_with_params(
            &format!("{}/speech:recognize", self.base_url),
            &[("key", self.api_key.expose_secret())],
        )
        .map_err(|e| SttError::ConfigError(format!("Invalid Google Speech URL: {e}")))?;

        tracing::debug!(
            encoding = %request.encoding,
            sample_rate = ?request.sample_rate_hertz,
            language = %request.language_code,
            "Google Speech recognize request",
        );

        let response = self
            .client
            .post(url)
            .json(&RecognizeRequest::from(request))
            .send()
            .await
            .map_err(|e| {
                // reqwest errors embed the URL, which carries the key
                let e = e.without_url();
                tracing::error!("Google Speech request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to Google Speech: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            let message = google_error_message(&error_text);

            tracing::error!("Google Speech API error ({status}): {message}");

            return Err(match status.as_u16() {
                400 => SttError::AudioRejected(message),
                401 | 403 => SttError::AuthenticationFailed(message),
                _ => SttError::RecognitionFailed {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let result: RecognizeResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Google Speech response: {e}");
            SttError::InternalError(None)
        })?;

        let transcript = result
            .results
            .into_iter()
            .next()
            .and_then(|r| r.alternatives.into_iter().next())
            .map(|a| a.transcript)
            .unwrap_or_default();

        if transcript.is_empty() {
            tracing::debug!("Google Speech recognized no speech");
        }

        Ok(transcript)
    }
}

#[async_trait]
impl SttProvider for GoogleSpeechProvider {
    async fn transcribe(&self, mut request: TranscriptionRequest) -> crate::error::Result<String> {
        if let Some(language_code) = &self.language_code {
            request.language_code.clone_from(language_code);
        }

        let first_attempt = self.recognize(&request).await;

        match first_attempt {
            Err(SttError::AudioRejected(message))
                if request.sample_rate_hertz.is_some() && mentions_sample_rate(&message) =>
            {
                tracing::warn!(
                    encoding = %request.encoding,
                    "Google Speech rejected the declared sample rate, retrying without it: {message}"
                );
                self.recognize(&request.without_sample_rate()).await
            }
            other => other,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Whether a 400 message could stem from a sample rate that does not match the audio header
fn mentions_sample_rate(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    ["sample_rate", "sample rate", "samplerate"]
        .iter()
        .any(|needle| lower.contains(needle))
}

/// Pull `error.message` out of a Google error body, falling back to the raw text
fn google_error_message(body: &str) -> String {
    serde_json::from_str::<GoogleErrorBody>(body).map_or_else(|_| body.to_string(), |b| b.error.message)
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: AudioEncoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_rate_hertz: Option<u32>,
    language_code: &'a str,
    enable_automatic_punctuation: bool,
}

#[derive(Serialize)]
struct RecognitionAudio<'a> {
    content: &'a str,
}

impl<'a> From<&'a TranscriptionRequest> for RecognizeRequest<'a> {
    fn from(request: &'a TranscriptionRequest) -> Self {
        Self {
            config: RecognitionConfig {
                encoding: request.encoding,
                sample_rate_hertz: request.sample_rate_hertz,
                language_code: &request.language_code,
                enable_automatic_punctuation: request.enable_automatic_punctuation,
            },
            audio: RecognitionAudio {
                content: &request.audio_content,
            },
        }
    }
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetails,
}

#[derive(Deserialize)]
struct GoogleErrorDetails {
    message: String,
}
