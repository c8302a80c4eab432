//! Error types for the FormForge API

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formforge_core::FormForgeError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The engine or backend failed; `context` is the user-facing summary
    #[error("{context}: {source}")]
    Generation {
        context: &'static str,
        #[source]
        source: FormForgeError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn generation(context: &'static str, source: FormForgeError) -> Self {
        ApiError::Generation { context, source }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, error, message) = match &self {
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                msg.clone(),
                None,
            ),
            ApiError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
                None,
            ),
            ApiError::Generation {
                context,
                source: source @ FormForgeError::InvalidLayout(_),
            } => (
                StatusCode::BAD_REQUEST,
                "INVALID_LAYOUT",
                context.to_string(),
                Some(source.to_string()),
            ),
            ApiError::Generation { context, source } => {
                tracing::error!("{}: {}", context, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    context.to_string(),
                    Some(source.to_string()),
                )
            }
            ApiError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "Failed to store file".to_string(),
                    None,
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error,
            message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::InvalidRequest(rejection.body_text())
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::InvalidRequest(err.body_text())
        }
    }
}
