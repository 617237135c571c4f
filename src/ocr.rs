//! # OCR
//!
//! Turns a scanned tab into raw text. Recognition quality is the engine's
//! business: the text is handed to the parser as-is, noise included.
//!
//! The [`TextRecognizer`] trait lets the pipeline run against any engine.
//! [`Tesseract`] drives the `tesseract` command-line tool.

use crate::config::Config;
use crate::error::TabError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Image extensions accepted by the OCR engine (lowercase, no dot)
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff"];

const TESSERACT_BINARY: &str = "tesseract";

/// An engine that extracts text from an image
pub trait TextRecognizer {
    fn recognize_text(&self, image: &Path) -> Result<String, TabError>;
}

/// Check that an image exists and has a supported extension.
pub fn validate_image_path(path: &Path) -> Result<PathBuf, TabError> {
    if !path.exists() {
        return Err(TabError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(TabError::UnsupportedImageFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    Ok(path.to_path_buf())
}

/// Tesseract settings tuned for tablature
#[derive(Debug, Clone)]
pub struct Tesseract {
    pub language: String,
    pub page_segmentation_mode: u8,
    pub char_whitelist: String,
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for Tesseract {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Tesseract {
    pub fn from_config(config: &Config) -> Self {
        Self {
            language: config.ocr_language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
            char_whitelist: config.char_whitelist.clone(),
            tessdata_dir: config.tessdata_dir.clone(),
        }
    }

    /// Arguments after the executable name; output goes to stdout.
    fn arguments(&self, image: &Path) -> Vec<String> {
        let mut args = vec![
            image.display().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
            "--psm".to_string(),
            self.page_segmentation_mode.to_string(),
        ];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".to_string());
            args.push(dir.display().to_string());
        }
        args.push("-c".to_string());
        args.push(format!("tessedit_char_whitelist={}", self.char_whitelist));
        args
    }
}

impl TextRecognizer for Tesseract {
    fn recognize_text(&self, image: &Path) -> Result<String, TabError> {
        let image = validate_image_path(image)?;

        let binary = which::which(TESSERACT_BINARY).map_err(|_| {
            TabError::OcrUnavailable(
                "Tesseract is not installed or not in PATH. \
                 Please install Tesseract OCR: https://github.com/tesseract-ocr/tesseract"
                    .to_string(),
            )
        })?;

        tracing::debug!(binary = %binary.display(), image = %image.display(), "running OCR");
        let output = Command::new(&binary)
            .args(self.arguments(&image))
            .output()
            .map_err(|e| TabError::OcrUnavailable(format!("failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TabError::OcrUnavailable(format!(
                "OCR processing failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
