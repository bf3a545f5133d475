use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{error::TtsError, types::SpeechResponse};

use super::TtsProvider;

const DEFAULT_MINIMAX_URL: &str = "https://api.minimax.io/v1";
const DEFAULT_MODEL: &str = "speech-02-hd";
const DEFAULT_CONTENT_TYPE: &str = "audio/mpeg";

/// `MiniMax` error code for an invalid or missing API key
const AUTH_FAILURE_CODE: i64 = 1004;

/// Polling budget for an asynchronous synthesis task
#[derive(Debug, Clone, Copy)]
pub(crate) struct PollPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

/// `MiniMax` asynchronous text-to-audio provider
///
/// Synthesis is a four step exchange: create a task, poll it until it
/// produces a file, resolve the file's download URL and fetch the audio.
pub(crate) struct MinimaxProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    name: String,
    model: String,
    default_voice: Option<String>,
    poll: PollPolicy,
}

impl MinimaxProvider {
    pub fn new(
        name: String,
        api_key: SecretString,
        base_url: Option<String>,
        model: Option<String>,
        default_voice: Option<String>,
        poll: PollPolicy,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_MINIMAX_URL.to_string());

        Self {
            client: perugo_core::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            name,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            default_voice,
            poll,
        }
    }

    async fn create_task(&self, text: &str, voice_id: &str) -> crate::error::Result<Id> {
        let body = CreateTaskRequest {
            model: &self.model,
            text,
            voice_setting: VoiceSetting {
                voice_id,
                speed: 1.0,
                vol: 1.0,
                pitch: 0,
            },
            audio_setting: AudioSetting {
                audio_sample_rate: 32000,
                bitrate: 128_000,
                format: "mp3",
                channel: 1,
            },
        };

        let request = self
            .client
            .post(format!("{}/t2a_async_v2", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body);

        let created: CreateTaskResponse = send_json(request, "create task").await?;
        check_base_resp(created.base_resp.as_ref())?;

        created
            .task_id
            .ok_or_else(|| TtsError::InternalError(Some("MiniMax did not return a task id".to_string())))
    }

    async fn wait_for_file(&self, task_id: &Id) -> crate::error::Result<Id> {
        for attempt in 1..=self.poll.attempts {
            let request = self
                .client
                .get(format!("{}/query/t2a_async_query_v2", self.base_url))
                .query(&[("task_id", task_id.to_string())])
                .bearer_auth(self.api_key.expose_secret());

            let task: QueryTaskResponse = send_json(request, "query task").await?;
            check_base_resp(task.base_resp.as_ref())?;

            match task.status.as_deref() {
                Some("Success") => {
                    return task.file_id.ok_or_else(|| {
                        TtsError::TaskFailed(format!("task {task_id} finished without a file"))
                    });
                }
                Some(status @ ("Failed" | "Expired")) => {
                    return Err(TtsError::TaskFailed(format!("task {task_id} ended with status {status}")));
                }
                status => {
                    tracing::debug!(
                        %task_id,
                        attempt,
                        status = status.unwrap_or("unknown"),
                        "MiniMax task still running"
                    );
                }
            }

            if attempt < self.poll.attempts {
                tokio::time::sleep(self.poll.interval).await;
            }
        }

        tracing::warn!(%task_id, attempts = self.poll.attempts, "MiniMax task did not finish in time");

        Err(TtsError::Timeout(format!(
            "task {task_id} not finished after {} polls",
            self.poll.attempts
        )))
    }

    async fn download_url(&self, file_id: &Id) -> crate::error::Result<String> {
        let request = self
            .client
            .get(format!("{}/files/retrieve", self.base_url))
            .query(&[("file_id", file_id.to_string())])
            .bearer_auth(self.api_key.expose_secret());

        let retrieved: RetrieveFileResponse = send_json(request, "retrieve file").await?;
        check_base_resp(retrieved.base_resp.as_ref())?;

        retrieved
            .file
            .and_then(|f| f.download_url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| TtsError::TaskFailed(format!("file {file_id} has no download url")))
    }

    async fn download(&self, url: &str) -> crate::error::Result<SpeechResponse> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("MiniMax audio download failed: {e}");
            TtsError::ConnectionError(format!("Failed to download MiniMax audio: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(super::status_error("MiniMax download", status, error_text));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|ct| ct.starts_with("audio/"))
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read MiniMax audio body: {e}");
            TtsError::ConnectionError(format!("Failed to read MiniMax audio: {e}"))
        })?;

        Ok(SpeechResponse {
            audio: audio.to_vec(),
            content_type,
        })
    }
}

#[async_trait]
impl TtsProvider for MinimaxProvider {
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> crate::error::Result<SpeechResponse> {
        let voice_id = voice
            .or(self.default_voice.as_deref())
            .ok_or_else(|| TtsError::InvalidRequest(format!("voice is required for provider '{}'", self.name)))?;

        tracing::debug!(provider = %self.name, voice = voice_id, model = %self.model, "MiniMax synthesis request");

        let task_id = self.create_task(text, voice_id).await?;
        let file_id = self.wait_for_file(&task_id).await?;
        let url = self.download_url(&file_id).await?;

        tracing::debug!(%task_id, %file_id, "MiniMax task finished, downloading audio");

        self.download(&url).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Send a `MiniMax` API call and decode its JSON body
async fn send_json<T: DeserializeOwned>(request: RequestBuilder, step: &str) -> crate::error::Result<T> {
    let response = request.send().await.map_err(|e| {
        tracing::error!("MiniMax {step} request failed: {e}");
        TtsError::ConnectionError(format!("Failed to send request to MiniMax: {e}"))
    })?;

    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(super::status_error("MiniMax", status, error_text));
    }

    response.json().await.map_err(|e| {
        tracing::error!("Failed to parse MiniMax {step} response: {e}");
        TtsError::InternalError(None)
    })
}

/// Reject a 2xx response whose `base_resp` reports a failure
fn check_base_resp(base_resp: Option<&BaseResp>) -> crate::error::Result<()> {
    match base_resp {
        None | Some(BaseResp { status_code: 0, .. }) => Ok(()),
        Some(BaseResp {
            status_code: AUTH_FAILURE_CODE,
            status_msg,
        }) => Err(TtsError::AuthenticationFailed(status_msg.clone())),
        Some(BaseResp { status_code, status_msg }) => {
            tracing::error!("MiniMax rejected the request ({status_code}): {status_msg}");
            Err(TtsError::ProviderRejected {
                code: *status_code,
                message: status_msg.clone(),
            })
        }
    }
}

/// Task and file identifiers arrive as numbers, occasionally as strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum Id {
    Number(u64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Serialize)]
struct CreateTaskRequest<'a> {
    model: &'a str,
    text: &'a str,
    voice_setting: VoiceSetting<'a>,
    audio_setting: AudioSetting,
}

#[derive(Serialize)]
struct VoiceSetting<'a> {
    voice_id: &'a str,
    speed: f32,
    vol: f32,
    pitch: i32,
}

#[derive(Serialize)]
struct AudioSetting {
    audio_sample_rate: u32,
    bitrate: u32,
    format: &'static str,
    channel: u8,
}

#[derive(Debug, Deserialize)]
struct BaseResp {
    #[serde(default)]
    status_code: i64,
    #[serde(default)]
    status_msg: String,
}

#[derive(Deserialize)]
struct CreateTaskResponse {
    #[serde(default)]
    task_id: Option<Id>,
    #[serde(default)]
    base_resp: Option<BaseResp>,
}

#[derive(Deserialize)]
struct QueryTaskResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    file_id: Option<Id>,
    #[serde(default)]
    base_resp: Option<BaseResp>,
}

#[derive(Deserialize)]
struct RetrieveFileResponse {
    #[serde(default)]
    file: Option<FileObject>,
    #[serde(default)]
    base_resp: Option<BaseResp>,
}

#[derive(Deserialize)]
struct FileObject {
    #[serde(default)]
    download_url: Option<String>,
}
