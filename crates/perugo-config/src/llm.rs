use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "Eres un asistente turístico de PerúGo. Responde siempre en español en texto plano.";

/// Top-level LLM configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// LLM provider configurations keyed by name, first one is the default
    #[serde(default)]
    pub providers: IndexMap<String, LlmProviderConfig>,
}

/// Configuration for a single chat completion provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmProviderConfig {
    /// Provider protocol type
    #[serde(rename = "type")]
    pub provider_type: LlmProviderType,
    /// API key for authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// System message prepended to every conversation
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

/// Supported LLM providers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderType {
    /// Groq `OpenAI`-compatible chat completions
    Groq,
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f32 {
    0.5
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_owned()
}
