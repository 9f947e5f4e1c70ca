//! HTTP error handling and response conversion.
//!
//! Errors raised below the presentation layer are mapped onto [`AppError`],
//! which picks the HTTP status code, a user-safe message, and the log level.
//! Every error body has the shape `{"error": "<reason>"}`.

use crate::{
    application::compare_faces::use_case::CompareFacesError,
    domain::{comparison::errors::ComparisonError, upload::errors::UploadError},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Request was malformed or incomplete (400).
    BadRequest(String),

    /// Uploaded file type is not accepted (415).
    UnsupportedMediaType(String),

    /// Request body exceeded the configured limit (413).
    PayloadTooLarge,

    /// No comparison slot became free in time (503).
    Busy,

    /// External service failure (503).
    ExternalService(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::UnsupportedMediaType(msg) => write!(f, "Unsupported media type: {}", msg),
            Self::PayloadTooLarge => write!(f, "Payload too large"),
            Self::Busy => write!(f, "Comparison capacity exhausted"),
            Self::ExternalService(msg) => write!(f, "External service error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Busy | Self::ExternalService(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::UnsupportedMediaType(msg) => msg.clone(),
            Self::PayloadTooLarge => "Upload exceeds the maximum allowed size".into(),
            Self::Busy => "Server is busy, please try again later".into(),
            Self::ExternalService(_) => "Face comparison service unavailable".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::SERVICE_UNAVAILABLE => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::debug!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Upload Error Conversion ===

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::DisallowedExtension { .. } => {
                AppError::UnsupportedMediaType(err.to_string())
            }
            UploadError::PayloadTooLarge => AppError::PayloadTooLarge,
            UploadError::MissingFile(_)
            | UploadError::EmptyFilename(_)
            | UploadError::MalformedMultipart(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

// === Comparison Error Conversion ===

impl From<ComparisonError> for AppError {
    fn from(err: ComparisonError) -> Self {
        match err {
            ComparisonError::EncoderUnavailable(msg) => AppError::ExternalService(msg),
        }
    }
}

impl From<CompareFacesError> for AppError {
    fn from(err: CompareFacesError) -> Self {
        match err {
            CompareFacesError::Invalid(e) => e.into(),
            CompareFacesError::Busy => AppError::Busy,
            CompareFacesError::Comparison(e) => e.into(),
        }
    }
}
