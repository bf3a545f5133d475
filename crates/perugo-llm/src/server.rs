use perugo_config::LlmProviderType;

use crate::{
    error::LlmError,
    provider::{ChatProvider, groq::GroqProvider},
};

/// LLM server that routes prompts to the appropriate provider
pub struct Server {
    providers: Vec<Box<dyn ChatProvider>>,
}

impl Server {
    /// Ask the named provider, or the first configured one, to answer `user_text`
    pub async fn reply(&self, user_text: &str, provider: Option<&str>) -> crate::error::Result<String> {
        let provider = match provider {
            None => self.providers.first().ok_or_else(|| LlmError::ProviderNotFound {
                provider: "default".to_owned(),
            })?,
            Some(name) => self
                .providers
                .iter()
                .find(|p| p.name() == name)
                .ok_or_else(|| LlmError::ProviderNotFound {
                    provider: name.to_owned(),
                })?,
        };

        provider.reply(user_text).await
    }

    /// Whether at least one provider is configured
    pub fn is_configured(&self) -> bool {
        !self.providers.is_empty()
    }
}

/// Builder for constructing the LLM server from configuration
pub struct LlmServerBuilder<'a> {
    config: &'a perugo_config::Config,
}

impl<'a> LlmServerBuilder<'a> {
    pub const fn new(config: &'a perugo_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let mut providers: Vec<Box<dyn ChatProvider>> = Vec::new();

        for (name, provider_config) in &self.config.llm.providers {
            tracing::debug!("Initializing LLM provider: {name}");

            let api_key = provider_config
                .api_key
                .clone()
                .ok_or_else(|| LlmError::Config(format!("API key required for LLM provider '{name}'")))?;

            let provider: Box<dyn ChatProvider> = match provider_config.provider_type {
                LlmProviderType::Groq => Box::new(GroqProvider::new(name.clone(), api_key, provider_config)),
            };

            providers.push(provider);
        }

        if providers.is_empty() {
            tracing::debug!("No LLM providers configured");
        } else {
            tracing::debug!("LLM server initialized with {} provider(s)", providers.len());
        }

        Ok(Server { providers })
    }
}
