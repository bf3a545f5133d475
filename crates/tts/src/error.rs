use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use perugo_core::{ErrorBody, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// TTS service errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum TtsError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (missing or invalid API key)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider not found in configuration
    #[error("Provider '{0}' not found")]
    ProviderNotFound(String),

    /// Provider API returned an error status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Provider answered 2xx but reported a failure in its body
    #[error("Provider rejected the request ({code}): {message}")]
    ProviderRejected { code: i64, message: String },

    /// Asynchronous synthesis task ended without audio
    #[error("Synthesis task failed: {0}")]
    TaskFailed(String),

    /// Asynchronous synthesis did not finish within the polling budget
    #[error("Synthesis timed out: {0}")]
    Timeout(String),

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error
    /// If Some(message), it came from a provider and can be shown
    /// If None, it's an internal error and should not leak details
    #[error("Internal server error")]
    InternalError(Option<String>),
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ProviderNotFound(_) => StatusCode::NOT_FOUND,
            Self::ProviderApiError { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::AuthenticationFailed(_)
            | Self::ProviderApiError { .. }
            | Self::ProviderRejected { .. }
            | Self::TaskFailed(_)
            | Self::ConnectionError(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::ConfigError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::AuthenticationFailed(_) => "authentication_error",
            Self::ProviderNotFound(_) => "not_found_error",
            Self::ProviderApiError { .. }
            | Self::ProviderRejected { .. }
            | Self::TaskFailed(_)
            | Self::ConnectionError(_) => "api_error",
            Self::Timeout(_) => "timeout_error",
            Self::ConfigError(_) | Self::InternalError(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InternalError(Some(provider_msg)) => provider_msg.clone(),
            Self::InternalError(None) | Self::ConfigError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
