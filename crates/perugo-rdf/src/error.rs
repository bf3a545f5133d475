use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use perugo_core::{ErrorBody, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RdfError>;

/// Errors raised while loading destinations for the graph
#[derive(Debug, Error)]
pub enum RdfError {
    /// The destination store could not be reached
    #[error("Destination store unavailable: {0}")]
    Unavailable(String),

    /// The destination query failed
    #[error("Destination query failed: {0}")]
    Query(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<sqlx::Error> for RdfError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::Unavailable(error.to_string())
            }
            other => Self::Query(other.to_string()),
        }
    }
}

impl HttpError for RdfError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Query(_) | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Unavailable(_) => "service_unavailable",
            Self::Query(_) => "database_error",
            Self::ConfigError(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Unavailable(_) => "Destination store unavailable".to_string(),
            Self::Query(_) | Self::ConfigError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for RdfError {
    fn into_response(self) -> Response {
        tracing::error!("RDF request failed: {self}");
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
