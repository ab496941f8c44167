//! Error types and handling for the `CropCast` service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the `CropCast` service
#[derive(Error, Debug)]
pub enum CropCastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The weather API could not be reached or answered with a failure status
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// The weather API answered, but the body was not the expected shape
    #[error("Malformed upstream payload: {message}")]
    Payload { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CropCastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new malformed-payload error
    pub fn payload<S: Into<String>>(message: S) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CropCastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            CropCastError::Upstream { .. } => {
                "Unable to reach the weather service. Please try again later.".to_string()
            }
            CropCastError::Payload { .. } => {
                "The weather service returned an unexpected response.".to_string()
            }
            CropCastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CropCastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }

    /// HTTP status this error maps to.
    ///
    /// An unreachable weather service and a malformed weather payload are
    /// surfaced as distinct status codes.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            CropCastError::Upstream { .. } => StatusCode::SERVICE_UNAVAILABLE,
            CropCastError::Payload { .. } => StatusCode::BAD_GATEWAY,
            CropCastError::Validation { .. } => StatusCode::BAD_REQUEST,
            CropCastError::Config { .. } | CropCastError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CropCastError::Config { .. } => "CONFIGURATION_ERROR",
            CropCastError::Upstream { .. } => "WEATHER_SERVICE_UNAVAILABLE",
            CropCastError::Payload { .. } => "MALFORMED_UPSTREAM_PAYLOAD",
            CropCastError::Validation { .. } => "VALIDATION_ERROR",
            CropCastError::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<reqwest::Error> for CropCastError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_decode() {
            Self::Payload {
                message: source.to_string(),
            }
        } else {
            Self::Upstream {
                message: source.to_string(),
            }
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for CropCastError {
    fn into_response(self) -> Response {
        tracing::error!("Error: {:?}", self);

        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}
