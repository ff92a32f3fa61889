//! Pipeline orchestration: raw OCR text (or an image) in, structured
//! certificate record out.
//!
//! The text path is pure and synchronous. The image path validates the
//! upload, delegates recognition to the injected [`OcrEngine`], and then
//! runs the same text path; OCR failures propagate unchanged rather than
//! being masked as an empty record.

use crate::config::ExtractionConfig;
use crate::extract::{FieldSchema, extract_record};
use crate::normalize::normalize;
use crate::types::CertificateExtraction;

#[cfg(feature = "ocr")]
use crate::error::{PattaError, Result};
#[cfg(feature = "ocr")]
use crate::ocr::OcrEngine;

/// Run the core pipeline over raw OCR text.
///
/// Never fails: text with no recognizable fields yields a record with every
/// field absent, which is a valid result.
pub fn process_text(raw_text: &str, config: &ExtractionConfig, schema: &FieldSchema) -> CertificateExtraction {
    let document = normalize(raw_text, &config.corrections);
    let record = extract_record(&document, schema);

    tracing::debug!(
        lines = document.len(),
        matched = record.matched_count(),
        "processed certificate text"
    );

    CertificateExtraction {
        content: document.to_markdown(),
        record,
    }
}

/// Run the full pipeline over an uploaded image.
///
/// # Errors
///
/// - `PattaError::ImageDecode` - the bytes are not a decodable image
/// - `PattaError::Ocr` - the engine failed to recognize text
/// - `PattaError::Io` - the engine could not be invoked (bubbles unchanged)
#[cfg(feature = "ocr")]
pub async fn process_image(
    image: &[u8],
    engine: &dyn OcrEngine,
    config: &ExtractionConfig,
    schema: &FieldSchema,
) -> Result<CertificateExtraction> {
    if image.is_empty() {
        return Err(PattaError::image_decode("empty image upload"));
    }

    // Validate the upload before handing it to the engine so undecodable
    // input surfaces as ImageDecode rather than an engine failure.
    image::load_from_memory(image)
        .map_err(|e| PattaError::image_decode_with_source("uploaded bytes are not a decodable image", e))?;

    let raw_text = engine.recognize(image, &config.ocr).await?;

    tracing::info!(engine = engine.name(), chars = raw_text.len(), "OCR recognition finished");

    Ok(process_text(&raw_text, config, schema))
}
