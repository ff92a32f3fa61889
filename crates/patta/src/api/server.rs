//! API server setup and configuration.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::extract::FieldSchema;
use crate::ocr::OcrEngine;

use super::handlers::{extract_handler, health_handler, info_handler};
use super::types::ApiState;

/// Upload size limit configuration.
///
/// Certificate scans are single images, so the default is a modest 25 MB.
/// Override with the `PATTA_MAX_UPLOAD_SIZE_MB` environment variable.
#[derive(Debug, Clone, Copy)]
pub struct ApiSizeLimits {
    /// Maximum request body size in bytes.
    pub max_request_body_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self {
            max_request_body_bytes: 25 * 1024 * 1024,
        }
    }
}

impl ApiSizeLimits {
    pub fn from_mb(max_request_body_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
        }
    }
}

/// Parse upload size limits from the environment, falling back to defaults.
fn parse_size_limits_from_env() -> ApiSizeLimits {
    if let Ok(value) = std::env::var("PATTA_MAX_UPLOAD_SIZE_MB") {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!("Upload size limit configured from environment: {} MB", mb);
                return ApiSizeLimits::from_mb(mb);
            }
            _ => {
                tracing::warn!(
                    "Failed to parse PATTA_MAX_UPLOAD_SIZE_MB='{}', must be a positive integer",
                    value
                );
            }
        }
    }

    ApiSizeLimits::default()
}

/// Build the CORS layer.
///
/// Defaults to allowing all origins for development convenience; set
/// `PATTA_CORS_ORIGINS` to a comma-separated origin list for production.
fn cors_layer_from_env() -> CorsLayer {
    if let Ok(origins_str) = std::env::var("PATTA_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            return CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any);
        }

        tracing::warn!("PATTA_CORS_ORIGINS set but empty/invalid - falling back to permissive CORS");
    }

    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Create the API router with default size limits.
///
/// Public to allow embedding the router in a larger application.
pub fn create_router(state: ApiState) -> Router {
    create_router_with_limits(state, ApiSizeLimits::default())
}

/// Create the API router with custom size limits.
pub fn create_router_with_limits(state: ApiState, limits: ApiSizeLimits) -> Router {
    Router::new()
        .route("/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer_from_env())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server.
///
/// # Arguments
///
/// * `host` - IP address to bind to (e.g. "127.0.0.1" or "0.0.0.0")
/// * `port` - port number to bind to
/// * `config` - extraction configuration shared by all requests
/// * `engine` - the OCR engine handling recognition
pub async fn serve(
    host: impl AsRef<str>,
    port: u16,
    config: ExtractionConfig,
    engine: Arc<dyn OcrEngine>,
) -> Result<()> {
    config.validate()?;

    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| crate::error::PattaError::validation(format!("Invalid host address: {}", e)))?;

    let state = ApiState {
        config: Arc::new(config),
        schema: Arc::new(FieldSchema::default()),
        engine,
    };

    let limits = parse_size_limits_from_env();
    let addr = SocketAddr::new(ip, port);
    let app = create_router_with_limits(state, limits);

    tracing::info!("Starting patta API server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(crate::error::PattaError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::PattaError::Other(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrConfig;
    use async_trait::async_trait;

    struct NoopEngine;

    #[async_trait]
    impl OcrEngine for NoopEngine {
        fn name(&self) -> &str {
            "noop"
        }

        async fn recognize(&self, _image: &[u8], _config: &OcrConfig) -> Result<String> {
            Ok(String::new())
        }
    }

    fn test_state() -> ApiState {
        ApiState {
            config: Arc::new(ExtractionConfig::default()),
            schema: Arc::new(FieldSchema::default()),
            engine: Arc::new(NoopEngine),
        }
    }

    #[test]
    fn test_create_router() {
        let _router = create_router(test_state());
    }

    #[test]
    fn test_size_limits_default() {
        let limits = ApiSizeLimits::default();
        assert_eq!(limits.max_request_body_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_size_limits_from_mb() {
        let limits = ApiSizeLimits::from_mb(5);
        assert_eq!(limits.max_request_body_bytes, 5 * 1024 * 1024);
    }
}
