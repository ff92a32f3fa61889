//! Patta - certificate OCR post-processing and field extraction
//!
//! Patta turns the noisy OCR text of a scanned land-record certificate into
//! a clean, line-structured document and then into a typed 12-field record
//! (certificate id, owner, survey/khata/plot numbers, area, village,
//! district, state, land type, date).
//!
//! # Quick Start
//!
//! ```rust
//! use patta::{ExtractionConfig, Field, FieldSchema, process_text};
//!
//! let config = ExtractionConfig::default();
//! let schema = FieldSchema::default();
//!
//! let raw = "LAND RECORD CERTIFICATE\nKhata Number 56\nDistrict: Mysore";
//! let extraction = process_text(raw, &config, &schema);
//! assert_eq!(extraction.record.get(Field::District), Some("Mysore"));
//! ```
//!
//! # Architecture
//!
//! - **Normalizer** (`normalize`): strips OCR noise, applies the ordered
//!   correction table, classifies lines into headers/key-value pairs/plain
//!   text
//! - **Extractor** (`extract`): matches per-field tolerant patterns against
//!   the flattened text; every field resolves independently
//! - **OCR** (`ocr`, feature `ocr`): the recognition collaborator behind the
//!   `OcrEngine` trait, with a Tesseract subprocess backend
//! - **API** (`api`, feature `api`): Axum server exposing the image-to-record
//!   pipeline
//!
//! Both core components are pure and synchronous; separate calls share no
//! mutable state and may run concurrently without coordination.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod types;

#[cfg(feature = "ocr")]
pub mod ocr;

#[cfg(feature = "api")]
pub mod api;

pub use config::{ExtractionConfig, OcrConfig};
pub use error::{PattaError, Result};
pub use extract::{FieldSchema, extract_from_text, extract_record};
pub use normalize::{CorrectionTable, apply_corrections, classify_lines, clean_noise, normalize};
pub use pipeline::process_text;
pub use types::{CertificateExtraction, CertificateRecord, Field, Line, NormalizedDocument};

#[cfg(feature = "ocr")]
pub use ocr::{OcrEngine, TesseractEngine};
#[cfg(feature = "ocr")]
pub use pipeline::process_image;
