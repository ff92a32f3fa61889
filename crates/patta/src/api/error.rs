//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::PattaError;

use super::types::ErrorResponse;

/// Wrapper turning [`PattaError`] into an HTTP response.
///
/// Status mapping:
/// - `Validation` / `ImageDecode` -> 400 (the client sent something broken)
/// - `Ocr` -> 502 (the recognition collaborator failed)
/// - everything else -> 500
#[derive(Debug)]
pub struct ApiError(PattaError);

impl From<PattaError> for ApiError {
    fn from(err: PattaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PattaError::Validation { .. } | PattaError::ImageDecode { .. } => StatusCode::BAD_REQUEST,
            PattaError::Ocr { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
