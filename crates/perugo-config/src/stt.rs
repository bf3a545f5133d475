use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Top-level STT configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// STT provider configurations keyed by name, first one is the default
    #[serde(default)]
    pub providers: IndexMap<String, SttProviderConfig>,
}

/// Configuration for a single STT provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: SttProviderType,
    /// API key, sent in the query string for Google
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// BCP-47 language of the recordings
    #[serde(default)]
    pub language_code: Option<String>,
}

/// Supported STT providers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SttProviderType {
    /// Google Cloud Speech-to-Text v1 REST API
    Google,
}
