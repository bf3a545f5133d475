use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{error::TtsError, types::SpeechResponse};

use super::TtsProvider;

const DEFAULT_GOOGLE_TTS_URL: &str = "https://texttospeech.googleapis.com/v1";
const DEFAULT_LANGUAGE_CODE: &str = "es-US";

/// Google Cloud Text-to-Speech provider
pub(crate) struct GoogleTtsProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    name: String,
    language_code: String,
    default_voice: Option<String>,
}

impl GoogleTtsProvider {
    pub fn new(
        name: String,
        api_key: SecretString,
        base_url: Option<String>,
        language_code: Option<String>,
        default_voice: Option<String>,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_GOOGLE_TTS_URL.to_string());

        Self {
            client: perugo_core::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            name,
            language_code: language_code.unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string()),
            default_voice,
        }
    }

    fn synthesize_request<'a>(&'a self, text: &'a str, voice: Option<&'a str>) -> SynthesizeRequest<'a> {
        SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &self.language_code,
                name: voice.or(self.default_voice.as_deref()),
            },
            audio_config: AudioConfig { audio_encoding: "MP3" },
        }
    }
}

#[async_trait]
impl TtsProvider for GoogleTtsProvider {
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> crate::error::Result<SpeechResponse> {
        let url = Url::parse_with_params(
            &format!("{}/text:synthesize", self.base_url),
            &[("key", self.api_key.expose_secret())],
        )
        .map_err(|e| TtsError::ConfigError(format!("Invalid Google TTS URL: {e}")))?;

        let body = self.synthesize_request(text, voice);

        tracing::debug!(
            provider = %self.name,
            voice = body.voice.name.unwrap_or(""),
            language = %self.language_code,
            "Google TTS request"
        );

        let response = self.client.post(url).json(&body).send().await.map_err(|e| {
            // the URL carries the API key
            let e = e.without_url();
            tracing::error!("Google TTS request failed: {e}");
            TtsError::ConnectionError(format!("Failed to send request to Google TTS: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(super::status_error("Google TTS", status, google_error_message(&error_text)));
        }

        let result: SynthesizeResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Google TTS response: {e}");
            TtsError::InternalError(None)
        })?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(result.audio_content)
            .map_err(|e| {
                tracing::error!("Google TTS returned invalid base64 audio: {e}");
                TtsError::InternalError(None)
            })?;

        Ok(SpeechResponse {
            audio,
            content_type: "audio/mpeg".to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn google_error_message(body: &str) -> String {
    serde_json::from_str::<GoogleErrorBody>(body).map_or_else(|_| body.to_string(), |b| b.error.message)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Deserialize)]
struct GoogleErrorDetail {
    message: String,
}
