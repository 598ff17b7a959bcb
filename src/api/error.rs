//! Maps service errors to HTTP responses.
//!
//! Client errors carry their message. Server errors are logged in full and
//! answered with a generic body, so query text and credentials never leak.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

impl Error {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::DuplicateEmail
            | Self::InvalidCredentials
            | Self::InvalidRating { .. }
            | Self::InvalidOrder { .. } => StatusCode::BAD_REQUEST,
            Self::UnknownZip { .. } | Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::PartialOrderFailure { .. }
            | Self::Database(_)
            | Self::Config { .. }
            | Self::PasswordHash(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_client_error() {
            self.to_string()
        } else {
            error!("Request failed: {self}");
            match self {
                Self::StoreUnavailable { .. } => "Service temporarily unavailable".to_string(),
                _ => "Server error".to_string(),
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}
