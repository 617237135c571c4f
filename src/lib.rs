pub mod api;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod fingering;
pub mod matcher;
pub mod ocr;
pub mod parser;
pub mod segment;
pub mod tab;

pub use api::*;
pub use config::Config;
pub use dictionary::{build_database, load_dictionary, parse_dictionary};
pub use error::*;
pub use fingering::{FingeringEntry, FingeringTable};
pub use matcher::{canonical_key, match_key, recognize, ChordMatch};
pub use ocr::{validate_image_path, Tesseract, TextRecognizer};
pub use parser::parse as parse_tab;
pub use segment::{segment, ChordCluster};
pub use tab::*;

use std::path::Path;

/// Load the fingering store and recognize every chord in a tab file.
/// The store is read first so a missing database fails before the tab is touched.
pub fn recognize_file(tab_path: &Path, database: &Path) -> Result<TabReport, TabError> {
    let table = FingeringTable::load(database)?;
    let source = std::fs::read_to_string(tab_path).map_err(|source| TabError::Io {
        path: tab_path.to_path_buf(),
        source,
    })?;
    recognize_chords(&source, &table)
}
