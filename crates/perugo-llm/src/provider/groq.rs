//! Groq chat completions (`OpenAI`-compatible wire format)

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::ChatProvider;
use crate::error::LlmError;

/// Default Groq API base URL
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default Groq model
pub(crate) const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq chat completion provider
pub(crate) struct GroqProvider {
    name: String,
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    temperature: f32,
    system_prompt: String,
}

impl GroqProvider {
    pub fn new(
        name: String,
        api_key: SecretString,
        config: &perugo_config::LlmProviderConfig,
    ) -> Self {
        let base_url = config.base_url.as_ref().map_or(DEFAULT_BASE_URL, reqwest::Url::as_str);

        Self {
            name,
            client: perugo_core::http_client(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
        }
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn wire_request<'a>(&'a self, user_text: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl ChatProvider for GroqProvider {
    async fn reply(&self, user_text: &str) -> crate::error::Result<String> {
        tracing::debug!(provider = %self.name, model = %self.model, input_len = user_text.len(), "chat completion request");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.wire_request(user_text))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "upstream request failed");
                LlmError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = %self.name, status = %status, "upstream returned error");
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let wire_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse completion");
            LlmError::EmptyCompletion
        })?;

        extract_reply(wire_response)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn extract_reply(response: ChatResponse) -> crate::error::Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_owned())
        .ok_or(LlmError::EmptyCompletion)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
