//! Configuration loading and management.
//!
//! Configuration can be created programmatically, loaded from a TOML file,
//! or discovered by searching for `patta.toml` in the current directory and
//! its parents.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PattaError, Result};
use crate::normalize::CorrectionTable;

/// Main extraction configuration.
///
/// # Example
///
/// ```rust
/// use patta::ExtractionConfig;
///
/// let config = ExtractionConfig::default();
/// assert_eq!(config.ocr.language, "eng");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// OCR engine configuration.
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Correction table applied during normalization. Defaults to the fixed
    /// table for the certificate template; override entries in config to
    /// tune for a different scan corpus.
    #[serde(default)]
    pub corrections: CorrectionTable,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract binary to invoke.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Language code (e.g. "eng", "hin").
    #[serde(default = "default_language")]
    pub language: String,

    /// Page segmentation mode. 6 (single uniform block) suits the
    /// certificate template's single-column layout.
    #[serde(default = "default_psm")]
    pub psm: u8,

    /// Recognition timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            language: default_language(),
            psm: default_psm(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_binary() -> String {
    "tesseract".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_psm() -> u8 {
    6
}

fn default_timeout_secs() -> u64 {
    60
}

/// Config file name searched for by [`ExtractionConfig::discover`].
const CONFIG_FILE_NAME: &str = "patta.toml";

impl ExtractionConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            PattaError::Serialization {
                message: format!("invalid config file {}: {}", path.display(), e),
                source: Some(Box::new(e)),
            }
        })
    }

    /// Search for `patta.toml` in the current directory and its parents.
    ///
    /// Returns `Ok(None)` when no config file exists anywhere up the tree.
    pub fn discover() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        let mut dir: Option<&Path> = Some(cwd.as_path());

        while let Some(current) = dir {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "discovered config file");
                return Self::from_toml_file(&candidate).map(Some);
            }
            dir = current.parent();
        }

        Ok(None)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.ocr.binary.trim().is_empty() {
            return Err(PattaError::validation("ocr.binary must not be empty"));
        }
        if self.ocr.language.trim().is_empty() {
            return Err(PattaError::validation("ocr.language must not be empty"));
        }
        if self.ocr.psm > 13 {
            return Err(PattaError::validation(format!(
                "ocr.psm must be a valid page segmentation mode (0-13), got {}",
                self.ocr.psm
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.ocr.binary, "tesseract");
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.psm, 6);
        assert_eq!(config.ocr.timeout_secs, 60);
        assert!(!config.corrections.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[ocr]\nlanguage = \"hin\"\npsm = 4\n\ncorrections = [[\"Knata\", \"Khata\"]]\n"
        )
        .unwrap();

        let config = ExtractionConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.ocr.language, "hin");
        assert_eq!(config.ocr.psm, 4);
        assert_eq!(config.ocr.binary, "tesseract");
        assert_eq!(config.corrections.len(), 1);
    }

    #[test]
    fn test_from_toml_file_missing_is_io_error() {
        let result = ExtractionConfig::from_toml_file("/nonexistent/patta.toml");
        assert!(matches!(result.unwrap_err(), PattaError::Io(_)));
    }

    #[test]
    fn test_from_toml_file_invalid_is_serialization_error() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not [valid toml").unwrap();

        let result = ExtractionConfig::from_toml_file(file.path());
        assert!(matches!(result.unwrap_err(), PattaError::Serialization { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_binary() {
        let mut config = ExtractionConfig::default();
        config.ocr.binary = "  ".to_string();
        assert!(matches!(config.validate().unwrap_err(), PattaError::Validation { .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_range_psm() {
        let mut config = ExtractionConfig::default();
        config.ocr.psm = 99;
        assert!(config.validate().is_err());
    }
}
