//! # Error Types
//!
//! This module defines all error types for tab parsing and chord recognition.
//!
//! Every error carries enough context (file path, line number, offending condition)
//! for the caller to act on it. A cluster that matches no chord is *not* an error;
//! it is reported inline as [`crate::Recognition::Unrecognized`].
//!
//! ## Error Types
//! - `ImageNotFound` / `UnsupportedImageFormat` / `OcrUnavailable` - OCR collaborator boundary
//! - `DatabaseUnavailable` - Missing or corrupt fingering store
//! - `InvalidTabFormat` - No valid tab lines, or a tuning that is not six strings
//! - `DictionaryError` - Problems reading the XML chord dictionary
//! - `InvalidConfig` - Unreadable or malformed configuration file
//! - `Io` - Reading tab files or writing the store
//!
//! ## Usage
//! ```rust
//! use tabchord::{parse_tab, TabError};
//!
//! match parse_tab("not a tab") {
//!     Ok(tab) => println!("{} notes", tab.notes.len()),
//!     Err(TabError::InvalidTabFormat { message, .. }) => eprintln!("Bad tab: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    /// The image handed to the OCR engine does not exist.
    #[error("Image file not found: {}", .path.display())]
    ImageNotFound { path: PathBuf },

    /// The image extension is not one the OCR engine accepts.
    ///
    /// # Example
    /// ```
    /// # use tabchord::TabError;
    /// let err = TabError::UnsupportedImageFormat {
    ///     path: "scan.pdf".into(),
    ///     extension: "pdf".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unsupported image format 'pdf': scan.pdf");
    /// ```
    #[error("Unsupported image format '{extension}': {}", .path.display())]
    UnsupportedImageFormat { path: PathBuf, extension: String },

    /// The OCR engine is not installed or failed to run.
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    /// The fingering store is missing, unreadable, or malformed.
    #[error("Chord database unavailable ({location}): {message}")]
    DatabaseUnavailable { location: String, message: String },

    /// The tab text cannot be turned into a six-string tuning and note stream.
    ///
    /// # Example
    /// ```
    /// # use tabchord::TabError;
    /// let err = TabError::InvalidTabFormat {
    ///     message: "No valid tab lines found".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid tab format: No valid tab lines found");
    /// ```
    #[error("Invalid tab format: {message}")]
    InvalidTabFormat { message: String },

    /// The XML chord dictionary cannot be converted into fingering records.
    #[error("Invalid chord dictionary ({location}): {message}")]
    DictionaryError { location: String, message: String },

    #[error("Invalid configuration in {}: {message}", .path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TabError {
    pub(crate) fn invalid_tab(message: impl Into<String>) -> Self {
        TabError::InvalidTabFormat {
            message: message.into(),
        }
    }
}
