//! Text normalization: OCR noise cleanup, correction substitutions, and
//! line classification.
//!
//! Raw OCR output arrives with non-ASCII noise glyphs, irregular whitespace,
//! and misread words. Normalization runs three passes:
//!
//! 1. [`clean_noise`] - strip encoding noise and collapse whitespace
//! 2. [`apply_corrections`] - canonicalize dashes/separators and apply the
//!    ordered correction table
//! 3. [`classify_lines`] - classify each line as header, key/value pair, or
//!    plain text
//!
//! [`normalize`] composes the three. All passes are pure; the correction
//! table is passed in explicitly so the pipeline stays independently
//! testable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Line, NormalizedDocument};

static NON_ASCII: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").expect("non-ASCII regex pattern is valid and should compile"));
static SPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("space-run regex pattern is valid and should compile"));
static NEWLINE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("newline-run regex pattern is valid and should compile"));
static EMPHASIS_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*").expect("emphasis-marker regex pattern is valid and should compile"));
static DECOR_GLYPHS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[|~\u{2022}*]").expect("decorative-glyph regex pattern is valid and should compile"));
static SEPARATOR_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-=]{2,}").expect("separator-run regex pattern is valid and should compile"));

/// Ordered table of literal OCR misread substitutions.
///
/// Entries are applied as global, case-sensitive substring replacements in
/// table order. Order is significant: a later entry may act on text produced
/// by an earlier one (`certificate` -> `certificato` -> `certificate`), so
/// the table is an ordered association list, never an unordered map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectionTable {
    entries: Vec<(String, String)>,
}

/// Known misreads of the certificate template, in application order.
const DEFAULT_CORRECTIONS: &[(&str, &str)] = &[
    ("Improoved", "Improved"),
    ("Nowe", "Noise"),
    ("etrective", "Effective"),
    ("monsuntfonn handiwrie", "non-uniform handwriting"),
    ("handiwrie", "handwriting"),
    ("multple", "multiple"),
    ("te", "to"),
    ("etye", "style"),
    ("bettor", "better"),
    ("certificato", "certificate"),
    ("Stato", "State"),
    ("locatod", "located"),
    ("disputo", "dispute"),
    ("Dato", "Date"),
    ("Knata", "Khata"),
];

impl Default for CorrectionTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_CORRECTIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl CorrectionTable {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every substitution in table order.
    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (from, to) in &self.entries {
            text = text.replace(from.as_str(), to);
        }
        text
    }
}

/// Strip encoding noise while preserving line structure.
///
/// Removes non-ASCII characters, collapses space/tab runs to one space and
/// newline runs to one newline, and drops literal `**` marker sequences.
/// Single spaces and single newlines are untouched. Idempotent; empty input
/// yields empty output.
pub fn clean_noise(text: &str) -> String {
    // Emphasis markers go before whitespace collapsing: removing a `**`
    // between single spaces would otherwise mint a fresh space run and
    // break idempotence.
    let text = NON_ASCII.replace_all(text, "");
    let text = EMPHASIS_MARKERS.replace_all(&text, "");
    let text = SPACE_RUNS.replace_all(&text, " ");
    let text = NEWLINE_RUNS.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Canonicalize look-alike punctuation and apply the correction table.
///
/// Em/en dashes become `-`, underscores become spaces, decorative glyphs
/// (`|`, `~`, bullet, `*`) are stripped, and runs of repeated `-`/`=`
/// separators collapse to a single `-` before the table substitutions run.
pub fn apply_corrections(text: &str, table: &CorrectionTable) -> String {
    let text = text.replace('\u{2014}', "-").replace('\u{2013}', "-").replace('_', " ");
    let text = DECOR_GLYPHS.replace_all(&text, "");
    let text = SEPARATOR_RUNS.replace_all(&text, "-");
    table.apply(&text)
}

/// Classify each non-empty line of `text` independently.
///
/// A line that is entirely uppercase and longer than 3 characters becomes a
/// title-cased [`Line::Header`]; a line containing a colon splits at the
/// *first* colon into a [`Line::KeyValue`]; anything else is
/// [`Line::Plain`]. Blank lines are dropped.
pub fn classify_lines(text: &str) -> NormalizedDocument {
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if is_upper_line(line) && line.chars().count() > 3 {
            lines.push(Line::Header(title_case(line)));
        } else if let Some(idx) = line.find(':') {
            let key = line[..idx].trim();
            let value = line[idx + 1..].trim();
            lines.push(Line::KeyValue {
                key: capitalize_first(key),
                value: value.to_string(),
            });
        } else {
            lines.push(Line::Plain(line.to_string()));
        }
    }

    NormalizedDocument::new(lines)
}

/// Full normalization: clean, correct, classify.
pub fn normalize(text: &str, table: &CorrectionTable) -> NormalizedDocument {
    let cleaned = clean_noise(text);
    let corrected = apply_corrections(&cleaned, table);
    classify_lines(&corrected)
}

/// True when the line has at least one cased character and none lowercase.
fn is_upper_line(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Title-case: first letter of each alphabetic run uppercased, rest lowered.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// First character uppercased, the rest unchanged.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
