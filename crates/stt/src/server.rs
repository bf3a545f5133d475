use perugo_config::{SttProviderConfig, SttProviderType};
use secrecy::SecretString;

use crate::{
    audio,
    error::SttError,
    provider::{SttProvider, google::GoogleSpeechProvider},
    types::AudioUpload,
};

/// STT server that routes requests to the appropriate provider
pub struct Server {
    providers: Vec<Box<dyn SttProvider>>,
}

impl Server {
    /// Transcribe an uploaded clip
    ///
    /// Detects the audio format, builds the recognition request and hands it
    /// to the named provider, or the first configured one. An empty string is
    /// a successful transcription of silence.
    pub async fn transcribe(&self, upload: &AudioUpload) -> crate::error::Result<String> {
        let provider = self.provider(upload.provider.as_deref())?;
        let request = audio::resolve(&upload.bytes, upload.filename.as_deref());

        tracing::debug!(
            provider = provider.name(),
            size = upload.bytes.len(),
            filename = upload.filename.as_deref().unwrap_or(""),
            "transcribing audio"
        );

        provider.transcribe(request).await
    }

    /// Whether at least one provider is configured
    pub fn is_configured(&self) -> bool {
        !self.providers.is_empty()
    }

    fn provider(&self, name: Option<&str>) -> crate::error::Result<&dyn SttProvider> {
        let provider = match name {
            None => self
                .providers
                .first()
                .ok_or_else(|| SttError::ProviderNotFound("No STT providers configured".to_string()))?,
            Some(name) => self
                .providers
                .iter()
                .find(|p| p.name() == name)
                .ok_or_else(|| SttError::ProviderNotFound(name.to_string()))?,
        };

        Ok(&**provider)
    }
}

/// Builder for constructing the STT server from configuration
pub struct SttServerBuilder<'a> {
    config: &'a perugo_config::Config,
}

impl<'a> SttServerBuilder<'a> {
    pub const fn new(config: &'a perugo_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let mut providers: Vec<Box<dyn SttProvider>> = Vec::new();

        for (name, provider_config) in &self.config.stt.providers {
            tracing::debug!("Initializing STT provider: {name}");

            let provider: Box<dyn SttProvider> = match &provider_config.provider_type {
                SttProviderType::Google => {
                    let api_key = resolve_api_key(name, provider_config)?;

                    Box::new(GoogleSpeechProvider::new(
                        name.clone(),
                        api_key,
                        provider_config.base_url.as_ref().map(ToString::to_string),
                        provider_config.language_code.clone(),
                    ))
                }
            };

            providers.push(provider);
        }

        if providers.is_empty() {
            tracing::debug!("No STT providers configured");
        } else {
            tracing::debug!("STT server initialized with {} provider(s)", providers.len());
        }

        Ok(Server { providers })
    }
}

fn resolve_api_key(name: &str, config: &SttProviderConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| SttError::ConfigError(format!("API key required for STT provider '{name}'")))
}
