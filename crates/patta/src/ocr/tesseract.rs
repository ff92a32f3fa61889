//! Tesseract subprocess backend.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

use crate::config::OcrConfig;
use crate::error::{PattaError, Result};
use crate::ocr::OcrEngine;

/// OCR engine backed by the `tesseract` command-line binary.
///
/// The image is streamed over stdin and the recognized text read from
/// stdout, so no temporary files are involved.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine;

impl TesseractEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn recognize(&self, image: &[u8], config: &OcrConfig) -> Result<String> {
        let mut child = Command::new(&config.binary)
            .arg("stdin")
            .arg("stdout")
            .arg("--psm")
            .arg(config.psm.to_string())
            .arg("-l")
            .arg(&config.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                // Failed to execute tesseract - an IO error (binary missing, etc.)
                std::io::Error::other(format!("Failed to execute {}: {}", config.binary, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(image)
                .await
                .map_err(|e| std::io::Error::other(format!("Failed to write image to tesseract stdin: {}", e)))?;
            // Close stdin so tesseract sees end of input.
            drop(stdin);
        }

        let output = match timeout(Duration::from_secs(config.timeout_secs), child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(std::io::Error::other(format!("Failed to wait for tesseract: {}", e)).into());
            }
            Err(_) => {
                return Err(PattaError::ocr(format!(
                    "Tesseract recognition timed out after {} seconds",
                    config.timeout_secs
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            let stderr_lower = stderr.to_lowercase();
            if stderr_lower.contains("error")
                || stderr_lower.contains("failed")
                || stderr_lower.contains("unsupported")
            {
                return Err(PattaError::ocr(format!("Tesseract recognition error: {}", stderr)));
            }

            // True system error - bubble up as IO error
            return Err(std::io::Error::other(format!("Tesseract system error: {}", stderr)).into());
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|e| PattaError::ocr_with_source("Failed to decode tesseract output", e))?;

        tracing::debug!(
            engine = self.name(),
            language = %config.language,
            psm = config.psm,
            chars = text.len(),
            "recognition complete"
        );

        Ok(text)
    }
}
