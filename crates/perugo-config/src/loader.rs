use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if nothing downstream is configured or a provider
    /// or database setting is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_has_downstreams()?;
        self.validate_tts_config()?;
        self.validate_database_config()?;
        Ok(())
    }

    /// Whether `/sts` can run end to end
    pub fn has_speech_pipeline(&self) -> bool {
        !self.stt.providers.is_empty() && !self.llm.providers.is_empty()
    }

    fn validate_has_downstreams(&self) -> anyhow::Result<()> {
        let has_stt = !self.stt.providers.is_empty();
        let has_llm = !self.llm.providers.is_empty();
        let has_tts = !self.tts.providers.is_empty();
        let has_database = self.database.is_some();

        if !has_stt && !has_llm && !has_tts && !has_database {
            anyhow::bail!(
                "at least one downstream must be configured (STT provider, LLM provider, TTS provider, or database)"
            );
        }

        Ok(())
    }

    fn validate_tts_config(&self) -> anyhow::Result<()> {
        for (name, provider) in &self.tts.providers {
            if provider.poll_attempts == 0 {
                anyhow::bail!("tts provider '{name}': poll_attempts must be greater than 0");
            }
            provider
                .poll_interval()
                .map_err(|e| anyhow::anyhow!("tts provider '{name}': {e}"))?;
        }

        Ok(())
    }

    fn validate_database_config(&self) -> anyhow::Result<()> {
        let Some(ref database) = self.database else {
            return Ok(());
        };

        if database.recent_limit == 0 {
            anyhow::bail!("database.recent_limit must be greater than 0");
        }

        if database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be greater than 0");
        }

        Ok(())
    }
}
