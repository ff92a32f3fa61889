//! OCR engine collaborator.
//!
//! The pipeline treats text recognition as a black box behind the
//! [`OcrEngine`] trait: image bytes in, raw text out. The default
//! implementation is [`TesseractEngine`], which shells out to the
//! `tesseract` binary. Engines are injected into the pipeline rather than
//! registered globally, keeping every call independently testable.

mod tesseract;

pub use tesseract::TesseractEngine;

use async_trait::async_trait;

use crate::Result;
use crate::config::OcrConfig;

/// Trait for OCR engines.
///
/// Engines must be thread-safe (`Send + Sync`); concurrent recognition
/// calls across separate inputs need no coordination.
///
/// # Errors
///
/// - `PattaError::Ocr` - the engine ran but recognition failed
/// - `PattaError::Io` - the engine could not be invoked at all (these
///   always bubble up)
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine name, for logging and the server info endpoint.
    fn name(&self) -> &str;

    /// Recognize text from encoded image bytes (PNG, JPEG, TIFF, ...).
    ///
    /// An empty string is a valid result: a successfully processed image
    /// with no recognizable text.
    async fn recognize(&self, image: &[u8], config: &OcrConfig) -> Result<String>;
}
