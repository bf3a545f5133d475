#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod database;
mod env;
pub mod health;
pub mod llm;
mod loader;
pub mod server;
pub mod stt;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use cors::*;
pub use database::*;
pub use health::*;
pub use llm::*;
pub use server::*;
pub use stt::*;
pub use telemetry::*;
pub use tts::*;

/// Top-level PeruGo backend configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech-to-text providers
    #[serde(default)]
    pub stt: SttConfig,
    /// Chat completion providers
    #[serde(default)]
    pub llm: LlmConfig,
    /// Text-to-speech providers
    #[serde(default)]
    pub tts: TtsConfig,
    /// MySQL store backing the RDF routes
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
