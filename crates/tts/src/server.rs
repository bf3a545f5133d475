use perugo_config::{TtsProviderConfig, TtsProviderType};
use secrecy::SecretString;

use crate::{
    error::TtsError,
    provider::{
        TtsProvider,
        google::GoogleTtsProvider,
        minimax::{MinimaxProvider, PollPolicy},
    },
    types::{SpeechRequest, SpeechResponse},
};

/// TTS server that routes requests to the appropriate provider
pub struct Server {
    providers: Vec<Box<dyn TtsProvider>>,
}

impl Server {
    /// Synthesize speech with the named provider, or the first configured one
    pub async fn synthesize(&self, request: &SpeechRequest) -> crate::error::Result<SpeechResponse> {
        if request.text.trim().is_empty() {
            return Err(TtsError::InvalidRequest("text must not be empty".to_string()));
        }

        let provider = self.provider(request.provider.as_deref())?;

        tracing::debug!(provider = provider.name(), chars = request.text.len(), "synthesizing speech");

        provider.synthesize(&request.text, request.voice.as_deref()).await
    }

    /// Whether at least one provider is configured
    pub fn is_configured(&self) -> bool {
        !self.providers.is_empty()
    }

    fn provider(&self, name: Option<&str>) -> crate::error::Result<&dyn TtsProvider> {
        let provider = match name {
            None => self
                .providers
                .first()
                .ok_or_else(|| TtsError::ProviderNotFound("No TTS providers configured".to_string()))?,
            Some(name) => self
                .providers
                .iter()
                .find(|p| p.name() == name)
                .ok_or_else(|| TtsError::ProviderNotFound(name.to_string()))?,
        };

        Ok(&**provider)
    }
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a perugo_config::Config,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a perugo_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let mut providers: Vec<Box<dyn TtsProvider>> = Vec::new();

        for (name, provider_config) in &self.config.tts.providers {
            tracing::debug!("Initializing TTS provider: {name}");

            let api_key = resolve_api_key(name, provider_config)?;

            let provider: Box<dyn TtsProvider> = match &provider_config.provider_type {
                TtsProviderType::Google => Box::new(GoogleTtsProvider::new(
                    name.clone(),
                    api_key,
                    provider_config.base_url.as_ref().map(ToString::to_string),
                    provider_config.language_code.clone(),
                    provider_config.voice.clone(),
                )),
                TtsProviderType::Minimax => {
                    let interval = provider_config
                        .poll_interval()
                        .map_err(|e| TtsError::ConfigError(format!("TTS provider '{name}': {e}")))?;

                    Box::new(MinimaxProvider::new(
                        name.clone(),
                        api_key,
                        provider_config.base_url.as_ref().map(ToString::to_string),
                        provider_config.model.clone(),
                        provider_config.voice.clone(),
                        PollPolicy {
                            attempts: provider_config.poll_attempts,
                            interval,
                        },
                    ))
                }
            };

            providers.push(provider);
        }

        if providers.is_empty() {
            tracing::debug!("No TTS providers configured");
        } else {
            tracing::debug!("TTS server initialized with {} provider(s)", providers.len());
        }

        Ok(Server { providers })
    }
}

fn resolve_api_key(name: &str, config: &TtsProviderConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| TtsError::ConfigError(format!("API key required for TTS provider '{name}'")))
}
