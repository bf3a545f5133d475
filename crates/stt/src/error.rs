use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use perugo_core::{ErrorBody, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Speech recognition errors
#[derive(Debug, Error)]
pub enum SttError {
    /// The caller sent no audio, or audio we cannot decode
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider refused the recognition config or the audio itself
    #[error("Audio rejected by speech provider: {0}")]
    AudioRejected(String),

    /// The provider refused our API key
    #[error("Speech provider authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Speech provider '{0}' not found")]
    ProviderNotFound(String),

    /// Any other non-success answer from the provider
    #[error("Speech recognition failed ({status}): {message}")]
    RecognitionFailed { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// `None` hides the cause from clients
    #[error("Internal server error")]
    InternalError(Option<String>),
}

impl HttpError for SttError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::AudioRejected(_) => StatusCode::BAD_REQUEST,
            // A rejected provider key is our misconfiguration, not the caller's
            Self::AuthenticationFailed(_) | Self::ConnectionError(_) => StatusCode::BAD_GATEWAY,
            Self::ProviderNotFound(_) => StatusCode::NOT_FOUND,
            Self::RecognitionFailed { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::RecognitionFailed { .. } => StatusCode::BAD_GATEWAY,
            Self::ConfigError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) | Self::AudioRejected(_) => "invalid_request_error",
            Self::AuthenticationFailed(_) => "authentication_error",
            Self::ProviderNotFound(_) => "not_found_error",
            Self::ConnectionError(_) | Self::RecognitionFailed { .. } => "api_error",
            Self::ConfigError(_) | Self::InternalError(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InternalError(Some(message)) => message.clone(),
            Self::InternalError(None) | Self::ConfigError(_) => "Internal server error".to_owned(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for SttError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
