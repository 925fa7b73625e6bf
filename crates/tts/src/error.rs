use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech service errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum TtsError {
    /// Missing or malformed request field, reported verbatim
    #[error("{0}")]
    InvalidRequest(String),

    /// Request body is not JSON
    #[error("Unsupported Content-Type, expected: 'Content-Type: application/json'")]
    UnsupportedMediaType,

    /// Request body exceeds the limit
    #[error("Request body is too large, limit is {0} bytes")]
    PayloadTooLarge(usize),

    /// The engine failed to render, or its output could not be read
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TtsError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::SynthesisFailed(_) | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        match self {
            Self::ConfigError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Error body in the `{"detail": ...}` shape speech clients expect
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
