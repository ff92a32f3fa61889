//! End-to-end pipeline tests: noisy OCR text (and images, via a stub
//! engine) through normalization and extraction.

use patta::{ExtractionConfig, Field, FieldSchema, process_text};

/// A realistic scan of the certificate template: encoding noise, stray
/// glyphs, collapsed separators, and the misreads the correction table
/// knows about.
const NOISY_SCAN: &str = "GOVERNMENT LAND RECORD\n\n\n\
Certificato id:  LR--2021/0042\n\
\n\
This is to certify that  John Smith, Aged 40 years, is the recorded owner of\n\
the land bearing Survey Number 123/4, |Knata Number 56~, Plot Number 78,\n\
locatod in the village of Rampur, District Mysore, Stato Karnataka,\n\
measuring 2.5   acres, classified as Agricultural.\n\
**Dato:** 15/06/2019\u{00A9}\n";

fn fixtures() -> (ExtractionConfig, FieldSchema) {
    (ExtractionConfig::default(), FieldSchema::default())
}

#[test]
fn noisy_scan_extracts_every_field() {
    let (config, schema) = fixtures();
    let extraction = process_text(NOISY_SCAN, &config, &schema);

    let record = &extraction.record;
    assert_eq!(record.get(Field::CertificateId), Some("LR-2021/0042"));
    assert_eq!(record.get(Field::Owner), Some("John Smith"));
    assert_eq!(record.get(Field::Age), Some("40"));
    assert_eq!(record.get(Field::SurveyNo), Some("123/4"));
    assert_eq!(record.get(Field::KhataNo), Some("56"));
    assert_eq!(record.get(Field::PlotNo), Some("78"));
    assert_eq!(record.get(Field::Village), Some("Rampur"));
    assert_eq!(record.get(Field::District), Some("Mysore"));
    assert_eq!(record.get(Field::State), Some("Karnataka"));
    assert_eq!(record.get(Field::Area), Some("2.5 acres"));
    assert_eq!(record.get(Field::LandType), Some("Agricultural"));
    assert_eq!(record.get(Field::Date), Some("15/06/2019"));
    assert_eq!(record.matched_count(), 12);
}

#[test]
fn noisy_scan_renders_markdown_content() {
    let (config, schema) = fixtures();
    let extraction = process_text(NOISY_SCAN, &config, &schema);

    assert!(extraction.content.contains("### Government Land Record"));
    assert!(extraction.content.contains("**Date:** 15/06/2019"));
    assert!(!extraction.content.contains('\u{00A9}'));
}

#[test]
fn record_serializes_flat_with_all_twelve_keys() {
    let (config, schema) = fixtures();

    for input in [NOISY_SCAN, "lorem ipsum dolor sit amet", ""] {
        let extraction = process_text(input, &config, &schema);
        let value = serde_json::to_value(&extraction.record).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 12, "wrong key count for input {:?}", input);
        for field in Field::ALL {
            assert!(obj.contains_key(field.as_str()), "missing key {}", field);
        }
    }
}

#[test]
fn unrelated_text_yields_all_null_record() {
    let (config, schema) = fixtures();
    let extraction = process_text(
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit,\n\
         sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
        &config,
        &schema,
    );

    assert!(extraction.record.is_empty());
    let value = serde_json::to_value(&extraction.record).unwrap();
    for field in Field::ALL {
        assert_eq!(value[field.as_str()], serde_json::Value::Null);
    }
}

#[cfg(feature = "ocr")]
mod image_pipeline {
    use super::*;
    use async_trait::async_trait;
    use patta::{OcrConfig, OcrEngine, PattaError, process_image};

    struct StubEngine {
        text: String,
    }

    #[async_trait]
    impl OcrEngine for StubEngine {
        fn name(&self) -> &str {
            "stub"
        }

        async fn recognize(&self, _image: &[u8], _config: &OcrConfig) -> patta::Result<String> {
            Ok(self.text.clone())
        }
    }

    fn tiny_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encoding a 2x2 PNG in memory cannot fail");
        bytes
    }

    #[tokio::test]
    async fn image_to_record_with_stub_engine() {
        let (config, schema) = fixtures();
        let engine = StubEngine {
            text: NOISY_SCAN.to_string(),
        };

        let extraction = process_image(&tiny_png(), &engine, &config, &schema).await.unwrap();
        assert_eq!(extraction.record.matched_count(), 12);
        assert_eq!(extraction.record.get(Field::Owner), Some("John Smith"));
    }

    #[tokio::test]
    async fn undecodable_upload_is_a_decode_error() {
        let (config, schema) = fixtures();
        let engine = StubEngine {
            text: "unused".to_string(),
        };

        let err = process_image(b"not an image at all", &engine, &config, &schema)
            .await
            .unwrap_err();
        assert!(matches!(err, PattaError::ImageDecode { .. }));
    }

    #[tokio::test]
    async fn engine_failure_propagates_as_ocr_error() {
        struct BrokenEngine;

        #[async_trait]
        impl OcrEngine for BrokenEngine {
            fn name(&self) -> &str {
                "broken"
            }

            async fn recognize(&self, _image: &[u8], _config: &OcrConfig) -> patta::Result<String> {
                Err(PattaError::ocr("recognition failed"))
            }
        }

        let (config, schema) = fixtures();
        let err = process_image(&tiny_png(), &BrokenEngine, &config, &schema)
            .await
            .unwrap_err();
        assert!(matches!(err, PattaError::Ocr { .. }));
    }

    #[tokio::test]
    async fn blank_recognition_still_returns_complete_record() {
        let (config, schema) = fixtures();
        let engine = StubEngine { text: String::new() };

        let extraction = process_image(&tiny_png(), &engine, &config, &schema).await.unwrap();
        assert!(extraction.record.is_empty());
        let value = serde_json::to_value(&extraction.record).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 12);
    }
}
