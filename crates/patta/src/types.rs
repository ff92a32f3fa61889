//! Core data types shared across the pipeline.

use serde::{Deserialize, Serialize};

/// The fixed set of fields extracted from a certificate.
///
/// Wire names are the `snake_case` forms (e.g. `certificate_id`); the set is
/// closed and ordered, matching the extraction schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CertificateId,
    District,
    Owner,
    Age,
    SurveyNo,
    KhataNo,
    PlotNo,
    Area,
    Village,
    State,
    LandType,
    Date,
}

impl Field {
    /// All fields, in schema order.
    pub const ALL: [Field; 12] = [
        Field::CertificateId,
        Field::District,
        Field::Owner,
        Field::Age,
        Field::SurveyNo,
        Field::KhataNo,
        Field::PlotNo,
        Field::Area,
        Field::Village,
        Field::State,
        Field::LandType,
        Field::Date,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CertificateId => "certificate_id",
            Field::District => "district",
            Field::Owner => "owner",
            Field::Age => "age",
            Field::SurveyNo => "survey_no",
            Field::KhataNo => "khata_no",
            Field::PlotNo => "plot_no",
            Field::Area => "area",
            Field::Village => "village",
            Field::State => "state",
            Field::LandType => "land_type",
            Field::Date => "date",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single classified line of a normalized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Line {
    /// Section heading, stored title-cased ("District Information").
    Header(String),
    /// "Label: value" pair, split at the first colon. The key carries a
    /// capitalized first letter with the rest of its casing unchanged.
    KeyValue { key: String, value: String },
    /// Anything else.
    Plain(String),
}

impl Line {
    /// Flatten the line back to plain text.
    pub fn as_text(&self) -> String {
        match self {
            Line::Header(text) => text.clone(),
            Line::KeyValue { key, value } => format!("{}: {}", key, value),
            Line::Plain(text) => text.clone(),
        }
    }
}

/// The line-classified representation between raw OCR text and structured
/// extraction.
///
/// Invariant: contains no empty lines; blank input lines are dropped during
/// normalization rather than preserved as structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    lines: Vec<Line>,
}

impl NormalizedDocument {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Flatten to a plain text blob, lines joined by newline.
    ///
    /// This is the form the field extractor matches against.
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render as markdown: headings as `### Title`, pairs as `**Key:** value`.
    pub fn to_markdown(&self) -> String {
        self.lines
            .iter()
            .map(|line| match line {
                Line::Header(text) => format!("\n### {}\n", text),
                Line::KeyValue { key, value } => format!("**{}:** {}", key, value),
                Line::Plain(text) => text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The structured record extracted from a certificate.
///
/// Every schema field is always present; `None` is the absent marker,
/// distinct from an empty string (which this pipeline never produces).
/// Serializes to a flat JSON object with `null` for absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub certificate_id: Option<String>,
    pub district: Option<String>,
    pub owner: Option<String>,
    pub age: Option<String>,
    pub survey_no: Option<String>,
    pub khata_no: Option<String>,
    pub plot_no: Option<String>,
    pub area: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub land_type: Option<String>,
    pub date: Option<String>,
}

impl CertificateRecord {
    /// Value of a field, `None` when absent.
    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::CertificateId => &self.certificate_id,
            Field::District => &self.district,
            Field::Owner => &self.owner,
            Field::Age => &self.age,
            Field::SurveyNo => &self.survey_no,
            Field::KhataNo => &self.khata_no,
            Field::PlotNo => &self.plot_no,
            Field::Area => &self.area,
            Field::Village => &self.village,
            Field::State => &self.state,
            Field::LandType => &self.land_type,
            Field::Date => &self.date,
        };
        slot.as_deref()
    }

    /// Set a field's value.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::CertificateId => &mut self.certificate_id,
            Field::District => &mut self.district,
            Field::Owner => &mut self.owner,
            Field::Age => &mut self.age,
            Field::SurveyNo => &mut self.survey_no,
            Field::KhataNo => &mut self.khata_no,
            Field::PlotNo => &mut self.plot_no,
            Field::Area => &mut self.area,
            Field::Village => &mut self.village,
            Field::State => &mut self.state,
            Field::LandType => &mut self.land_type,
            Field::Date => &mut self.date,
        };
        *slot = value;
    }

    /// Iterate `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Number of fields that matched.
    pub fn matched_count(&self) -> usize {
        self.iter().filter(|(_, v)| v.is_some()).count()
    }

    /// True when no field matched. Still a valid, successful result.
    pub fn is_empty(&self) -> bool {
        self.matched_count() == 0
    }
}

/// Full pipeline output: the normalized document rendered as markdown plus
/// the structured record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateExtraction {
    /// Normalized text content, markdown-formatted.
    pub content: String,
    /// The structured 12-field record.
    pub record: CertificateRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_all_covers_schema() {
        assert_eq!(Field::ALL.len(), 12);
        let mut names: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_field_wire_names() {
        assert_eq!(Field::CertificateId.as_str(), "certificate_id");
        assert_eq!(Field::SurveyNo.as_str(), "survey_no");
        assert_eq!(Field::LandType.as_str(), "land_type");
    }

    #[test]
    fn test_field_serde_snake_case() {
        let json = serde_json::to_string(&Field::KhataNo).unwrap();
        assert_eq!(json, "\"khata_no\"");
    }

    #[test]
    fn test_line_as_text() {
        assert_eq!(Line::Header("District Information".into()).as_text(), "District Information");
        assert_eq!(
            Line::KeyValue {
                key: "Owner".into(),
                value: "John Smith".into()
            }
            .as_text(),
            "Owner: John Smith"
        );
        assert_eq!(Line::Plain("free text".into()).as_text(), "free text");
    }

    #[test]
    fn test_document_to_plain_text() {
        let doc = NormalizedDocument::new(vec![
            Line::Header("Land Certificate".into()),
            Line::KeyValue {
                key: "District".into(),
                value: "Mysore".into(),
            },
            Line::Plain("some remark".into()),
        ]);
        assert_eq!(doc.to_plain_text(), "Land Certificate\nDistrict: Mysore\nsome remark");
    }

    #[test]
    fn test_document_to_markdown() {
        let doc = NormalizedDocument::new(vec![
            Line::Header("Land Certificate".into()),
            Line::KeyValue {
                key: "District".into(),
                value: "Mysore".into(),
            },
        ]);
        let md = doc.to_markdown();
        assert!(md.contains("### Land Certificate"));
        assert!(md.contains("**District:** Mysore"));
    }

    #[test]
    fn test_record_get_set_roundtrip() {
        let mut record = CertificateRecord::default();
        for field in Field::ALL {
            assert_eq!(record.get(field), None);
        }

        record.set(Field::Owner, Some("John Smith".into()));
        record.set(Field::Age, Some("40".into()));
        assert_eq!(record.get(Field::Owner), Some("John Smith"));
        assert_eq!(record.get(Field::Age), Some("40"));
        assert_eq!(record.matched_count(), 2);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_record_serializes_flat_with_nulls() {
        let mut record = CertificateRecord::default();
        record.set(Field::District, Some("Mysore".into()));

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 12);
        assert_eq!(obj["district"], serde_json::json!("Mysore"));
        assert_eq!(obj["owner"], serde_json::Value::Null);
    }

    #[test]
    fn test_empty_record_is_valid() {
        let record = CertificateRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.matched_count(), 0);
        let obj = serde_json::to_value(&record).unwrap();
        assert_eq!(obj.as_object().unwrap().len(), 12);
    }
}
