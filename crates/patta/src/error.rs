//! Error types for patta.
//!
//! All fallible operations in this crate return [`Result`], built on
//! [`PattaError`] via `thiserror`.
//!
//! # Error Handling Philosophy
//!
//! **System errors always bubble up unchanged:**
//! - `PattaError::Io` (from `std::io::Error`) - file system errors, a missing
//!   OCR binary, broken pipes
//! - These indicate real system problems and must surface unwrapped.
//!
//! **Application errors are wrapped with context:**
//! - `ImageDecode` - the uploaded bytes are not a decodable image
//! - `Ocr` - the recognition engine failed to produce text
//! - `Validation` - invalid request input or configuration
//!
//! A field that fails to match during extraction is **not** an error; it is a
//! normal per-field outcome represented by `None` in the extracted record.
use thiserror::Error;

/// Result type alias using `PattaError`.
pub type Result<T> = std::result::Result<T, PattaError>;

/// Main error type for all patta operations.
///
/// # Variants
///
/// - `Io` - file system and I/O errors (always bubble up)
/// - `ImageDecode` - uploaded bytes could not be decoded as an image
/// - `Ocr` - OCR engine invocation or recognition failure
/// - `Validation` - input validation errors (request fields, config values)
/// - `Serialization` - JSON/TOML serialization errors
/// - `Other` - catch-all for uncommon errors
#[derive(Debug, Error)]
pub enum PattaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {message}")]
    ImageDecode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for PattaError {
    fn from(err: serde_json::Error) -> Self {
        PattaError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl PattaError {
    /// Create an ImageDecode error
    pub fn image_decode<S: Into<String>>(message: S) -> Self {
        Self::ImageDecode {
            message: message.into(),
            source: None,
        }
    }

    /// Create an ImageDecode error with source
    pub fn image_decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageDecode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an Ocr error
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Self::Ocr {
            message: message.into(),
            source: None,
        }
    }

    /// Create an Ocr error with source
    pub fn ocr_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Ocr {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error with source
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }
}
