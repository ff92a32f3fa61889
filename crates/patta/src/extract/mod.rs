//! Structured field extraction over normalized certificate text.
//!
//! Each of the 12 schema fields has one tolerant pattern anchored to the
//! context keywords of the certificate template ("District", "Survey
//! Number", "certify that", ...) rather than to column position - OCR line
//! layout is unreliable, keyword context is comparatively stable. Patterns
//! are evaluated independently against the full flattened text, with no
//! shared match state and no cross-field consistency checking.
//!
//! Extraction never fails: a field with no match is `None` in the record,
//! and a record with every field absent is a valid result.

use regex::{Regex, RegexBuilder};

use crate::normalize::clean_noise;
use crate::types::{CertificateRecord, Field, NormalizedDocument};

/// Literal phrase that marks over-greedy capture bleeding into the closing
/// sentence of the certificate. Values are truncated before it.
const CERTIFY_PHRASE: &str = "This is to certify";

/// Per-field extraction patterns, in schema order. Each pattern captures
/// exactly one group: the field value.
const DEFAULT_PATTERNS: &[(Field, &str)] = &[
    (
        Field::CertificateId,
        r"(?:Certificato|Certificate)\s*id[:\-]?\s*([A-Z0-9\-/]+)",
    ),
    (Field::District, r"District\s*[:\-]?\s*([A-Za-z\s]+)"),
    (Field::Owner, r"certify that\s+([A-Z][a-zA-Z\s]*)[,.]"),
    (Field::Age, r"Aged\s+(\d+)\s+years"),
    (Field::SurveyNo, r"Survey\s+Number\s+([\w/]+)"),
    (Field::KhataNo, r"Khata\s+Number\s*([\w/]+)"),
    (Field::PlotNo, r"Plot\s+Number\s*([\w/]+)"),
    (
        Field::Area,
        r"measuring\s+([\d.]+\s*(?:acres|sq\.?\s*meters|sq\.?\s*feet)?)",
    ),
    (Field::Village, r"village\s+of\s+([A-Za-z\s]+)[,.]"),
    (Field::State, r"State\s+([A-Za-z\s]+)"),
    (Field::LandType, r"classified\s+as\s+([A-Za-z\s]+)"),
    (Field::Date, r"Date[:\-]?\s*(\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})"),
];

/// The fixed extraction schema: an ordered list of `(Field, Regex)` pairs,
/// compiled case-insensitively once at startup and shared read-only.
///
/// Kept as an ordered association list rather than a map; pass it into the
/// extraction functions by reference instead of holding it as module state.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    patterns: Vec<(Field, Regex)>,
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldSchema {
    /// Compile the default pattern table.
    pub fn new() -> Self {
        let patterns = DEFAULT_PATTERNS
            .iter()
            .map(|(field, pattern)| {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("default field pattern is valid and should compile");
                (*field, regex)
            })
            .collect();
        Self { patterns }
    }

    /// Iterate `(field, pattern)` pairs in schema order.
    pub fn patterns(&self) -> impl Iterator<Item = &(Field, Regex)> + '_ {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The compiled pattern for one field.
    pub fn pattern_for(&self, field: Field) -> Option<&Regex> {
        self.patterns.iter().find(|(f, _)| *f == field).map(|(_, re)| re)
    }
}

/// Extract the structured record from a normalized document.
pub fn extract_record(doc: &NormalizedDocument, schema: &FieldSchema) -> CertificateRecord {
    extract_from_text(&doc.to_plain_text(), schema)
}

/// Extract the structured record from a text blob.
///
/// Re-applies [`clean_noise`] first, so raw OCR text and pre-normalized
/// text are both accepted. Every schema field is resolved independently;
/// the returned record always carries all 12 keys.
pub fn extract_from_text(text: &str, schema: &FieldSchema) -> CertificateRecord {
    let blob = clean_noise(text);

    let mut record = CertificateRecord::default();
    for (field, pattern) in schema.patterns() {
        let value = pattern
            .captures(&blob)
            .and_then(|caps| caps.get(1))
            .map(|m| clean_value(m.as_str()))
            .filter(|v| !v.is_empty());
        record.set(*field, value);
    }

    tracing::debug!(matched = record.matched_count(), "extracted certificate fields");
    record
}

/// Post-process a captured value: truncate at the embedded certify phrase,
/// then trim surrounding whitespace and stray periods.
fn clean_value(raw: &str) -> String {
    let value = match raw.find(CERTIFY_PHRASE) {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    value.trim_matches(|c| c == ' ' || c == '.').to_string()
}
