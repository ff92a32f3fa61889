//! API request and response types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;
use crate::extract::FieldSchema;
use crate::ocr::OcrEngine;

/// Shared server state: immutable configuration, the compiled field schema,
/// and the injected OCR engine.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<ExtractionConfig>,
    pub schema: Arc<FieldSchema>,
    pub engine: Arc<dyn OcrEngine>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Response body for `GET /info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    /// Name of the configured OCR engine.
    pub engine: String,
    /// Wire names of the extracted fields, in schema order.
    pub fields: Vec<String>,
}

/// Error envelope returned for all failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
