//! # Configuration
//!
//! Optional YAML file with paths and OCR settings. Every key may be omitted.
//!
//! ```yaml
//! database: data/fingerings.yaml
//! dictionary: data/chords.xml
//! tessdata-dir: data/tessdata
//! ocr-language: eng
//! page-segmentation-mode: 6
//! char-whitelist: "0123456789ABCDEFGabcdefghp-/|"
//! ```

use crate::error::TabError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "data/fingerings.yaml";
pub const DEFAULT_DICTIONARY: &str = "data/chords.xml";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
/// Tesseract mode 6: assume a single uniform block of text
pub const DEFAULT_PAGE_SEGMENTATION_MODE: u8 = 6;
/// Characters that can appear in a tab
pub const DEFAULT_CHAR_WHITELIST: &str = "0123456789ABCDEFGabcdefghp-/|";

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: PathBuf,
    pub dictionary: PathBuf,
    pub tessdata_dir: Option<PathBuf>,
    pub ocr_language: String,
    pub page_segmentation_mode: u8,
    pub char_whitelist: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            dictionary: PathBuf::from(DEFAULT_DICTIONARY),
            tessdata_dir: None,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            page_segmentation_mode: DEFAULT_PAGE_SEGMENTATION_MODE,
            char_whitelist: DEFAULT_CHAR_WHITELIST.to_string(),
        }
    }
}

/// Raw config for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    database: Option<PathBuf>,
    dictionary: Option<PathBuf>,
    tessdata_dir: Option<PathBuf>,
    ocr_language: Option<String>,
    page_segmentation_mode: Option<u8>,
    char_whitelist: Option<String>,
}

impl Config {
    /// Read a config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, TabError> {
        let content = fs::read_to_string(path).map_err(|e| TabError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content).map_err(|message| TabError::InvalidConfig {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_yaml_str(content: &str) -> Result<Self, String> {
        // An empty file is a valid, empty config
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| e.to_string())?
        };

        let defaults = Config::default();
        Ok(Config {
            database: raw.database.unwrap_or(defaults.database),
            dictionary: raw.dictionary.unwrap_or(defaults.dictionary),
            tessdata_dir: raw.tessdata_dir,
            ocr_language: raw.ocr_language.unwrap_or(defaults.ocr_language),
            page_segmentation_mode: raw
                .page_segmentation_mode
                .unwrap_or(defaults.page_segmentation_mode),
            char_whitelist: raw.char_whitelist.unwrap_or(defaults.char_whitelist),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config =
            Config::from_yaml_str("database: /tmp/db.yaml\nocr-language: deu\n").unwrap();
        assert_eq!(config.database, PathBuf::from("/tmp/db.yaml"));
        assert_eq!(config.ocr_language, "deu");
        assert_eq!(config.page_segmentation_mode, DEFAULT_PAGE_SEGMENTATION_MODE);
        assert_eq!(config.dictionary, PathBuf::from(DEFAULT_DICTIONARY));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_yaml_str("databse: typo.yaml\n").unwrap_err();
        assert!(err.contains("databse"));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabchord.yaml");
        fs::write(&path, "page-segmentation-mode: lots\n").unwrap();
        match Config::load(&path) {
            Err(TabError::InvalidConfig { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }
}
