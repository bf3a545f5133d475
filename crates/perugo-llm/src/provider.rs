pub(crate) mod groq;

use async_trait::async_trait;

/// Trait for chat completion providers
#[async_trait]
pub(crate) trait ChatProvider: Send + Sync {
    /// Answer a single user message within the provider's system prompt
    async fn reply(&self, user_text: &str) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
