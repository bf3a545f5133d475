use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use perugo_core::{ErrorBody, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur during chat completion
#[derive(Debug, Error)]
pub enum LlmError {
    /// Named provider does not exist in configuration
    #[error("provider not found: {provider}")]
    ProviderNotFound { provider: String },

    /// Upstream provider answered with a non-success status
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Upstream answered 2xx without a usable completion
    #[error("upstream returned no completion")]
    EmptyCompletion,

    /// Provider could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// Client sent a malformed or invalid request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider configuration is incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ProviderNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream { status: 429, .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream { .. } | Self::EmptyCompletion | Self::Connection(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::ProviderNotFound { .. } => "not_found_error",
            Self::Upstream { .. } | Self::EmptyCompletion | Self::Connection(_) => "upstream_error",
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Config(_) | Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for LlmError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
