//! Programmatic configuration builder for integration tests

#![allow(dead_code)]

use std::net::SocketAddr;

use perugo_config::{
    Config, CorsConfig, HealthConfig, LlmConfig, LlmProviderConfig, LlmProviderType, ServerConfig, SttConfig,
    SttProviderConfig, SttProviderType, TtsConfig, TtsProviderConfig, TtsProviderType, DEFAULT_SYSTEM_PROMPT,
};
use secrecy::SecretString;

/// API key every mock upstream expects
pub const TEST_API_KEY: &str = "test-key";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with no downstreams
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                stt: SttConfig::default(),
                llm: LlmConfig::default(),
                tts: TtsConfig::default(),
                database: None,
                telemetry: None,
            },
        }
    }

    /// Add a Google Speech provider pointed at a mock backend
    pub fn with_google_stt(mut self, name: &str, base_url: &str) -> Self {
        self.config.stt.providers.insert(
            name.to_owned(),
            SttProviderConfig {
                provider_type: SttProviderType::Google,
                api_key: Some(SecretString::from(TEST_API_KEY)),
                base_url: Some(base_url.parse().expect("valid URL")),
                language_code: None,
            },
        );
        self
    }

    /// Add a Groq provider pointed at a mock backend
    pub fn with_groq(mut self, name: &str, base_url: &str) -> Self {
        self.config.llm.providers.insert(
            name.to_owned(),
            LlmProviderConfig {
                provider_type: LlmProviderType::Groq,
                api_key: Some(SecretString::from(TEST_API_KEY)),
                base_url: Some(base_url.parse().expect("valid URL")),
                model: None,
                temperature: 0.5,
                system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
            },
        );
        self
    }

    /// Add a Google TTS provider pointed at a mock backend
    pub fn with_google_tts(mut self, name: &str, base_url: &str) -> Self {
        self.config
            .tts
            .providers
            .insert(name.to_owned(), tts_provider(TtsProviderType::Google, base_url, None, 1));
        self
    }

    /// Add a `MiniMax` provider pointed at a mock backend, polling every 10ms
    pub fn with_minimax(mut self, name: &str, base_url: &str, poll_attempts: u32) -> Self {
        self.config.tts.providers.insert(
            name.to_owned(),
            tts_provider(TtsProviderType::Minimax, base_url, Some("female-shaonv"), poll_attempts),
        );
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}

fn tts_provider(
    provider_type: TtsProviderType,
    base_url: &str,
    voice: Option<&str>,
    poll_attempts: u32,
) -> TtsProviderConfig {
    TtsProviderConfig {
        provider_type,
        api_key: Some(SecretString::from(TEST_API_KEY)),
        base_url: Some(base_url.parse().expect("valid URL")),
        voice: voice.map(str::to_owned),
        language_code: None,
        model: None,
        poll_attempts,
        poll_interval: "10ms".to_owned(),
    }
}
