//! API request handlers.

use axum::Json;
use axum::extract::{Multipart, State};

use crate::error::PattaError;
use crate::pipeline::process_image;
use crate::types::{CertificateRecord, Field};

use super::error::ApiError;
use super::types::{ApiState, HealthResponse, InfoResponse};

/// Extract endpoint handler.
///
/// POST /extract
///
/// Accepts multipart form data with an `image` field holding the scanned
/// certificate. Responds with the flat 12-field record; fields the
/// extractor could not locate are `null`, never omitted.
pub async fn extract_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<CertificateRecord>, ApiError> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from(PattaError::validation(e.to_string())))?
    {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::from(PattaError::validation(e.to_string())))?;
            image = Some(data.to_vec());
        }
    }

    let image = image.ok_or_else(|| ApiError::from(PattaError::validation("No image provided")))?;

    let extraction = process_image(&image, state.engine.as_ref(), &state.config, &state.schema).await?;

    Ok(Json(extraction.record))
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server info endpoint handler.
///
/// GET /info
pub async fn info_handler(State(state): State<ApiState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: state.engine.name().to_string(),
        fields: Field::ALL.iter().map(|f| f.as_str().to_string()).collect(),
    })
}
