use std::time::Duration;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Top-level TTS configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// TTS provider configurations keyed by name, first one is the default
    #[serde(default)]
    pub providers: IndexMap<String, TtsProviderConfig>,
}

/// Configuration for a single TTS provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: TtsProviderType,
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Default voice when the request does not name one
    #[serde(default)]
    pub voice: Option<String>,
    /// Voice language (Google only)
    #[serde(default)]
    pub language_code: Option<String>,
    /// Synthesis model (`MiniMax` only)
    #[serde(default)]
    pub model: Option<String>,
    /// Maximum number of task status polls (`MiniMax` only)
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
    /// Delay between task status polls, e.g. "1s" or "500ms" (`MiniMax` only)
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

/// Supported TTS providers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProviderType {
    /// Google Cloud Text-to-Speech
    Google,
    /// `MiniMax` asynchronous T2A
    Minimax,
}

impl TtsProviderConfig {
    /// Parsed polling interval
    ///
    /// # Errors
    ///
    /// Returns an error if `poll_interval` is not a valid duration string
    pub fn poll_interval(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.poll_interval)
            .map_err(|e| anyhow::anyhow!("invalid poll_interval '{}': {e}", self.poll_interval))
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_poll_attempts() -> u32 {
    10
}

fn default_poll_interval() -> String {
    "1s".to_owned()
}
