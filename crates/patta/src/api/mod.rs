//! REST API server for certificate extraction.
//!
//! An Axum-based HTTP server exposing the image-to-record pipeline.
//!
//! # Endpoints
//!
//! - `POST /extract` - extract the structured record from an uploaded
//!   certificate image (multipart form data, field `image`)
//! - `GET /health` - health check endpoint
//! - `GET /info` - server information
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use std::sync::Arc;
//! use patta::ExtractionConfig;
//! use patta::api::serve;
//! use patta::ocr::TesseractEngine;
//!
//! #[tokio::main]
//! async fn main() -> patta::Result<()> {
//!     let config = ExtractionConfig::default();
//!     serve("127.0.0.1", 5001, config, Arc::new(TesseractEngine::new())).await
//! }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # Extract fields from a scanned certificate
//! curl -F "image=@certificate.png" http://localhost:5001/extract
//!
//! # Health check
//! curl http://localhost:5001/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{ApiSizeLimits, create_router, create_router_with_limits, serve};
pub use types::{ApiState, ErrorResponse, HealthResponse, InfoResponse};
