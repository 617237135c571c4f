//! # Public API
//!
//! Entry points that run the whole pipeline.
//!
//! ## Pipeline
//! 1. Parse tab text into a tuning and column-sorted notes
//! 2. Segment the notes into clusters played together
//! 3. Match each cluster against the fingering table
//!
//! The table is loaded by the caller once and passed by reference, so one
//! table serves any number of tabs.
//!
//! ## Typical Usage
//!
//! ```rust
//! use tabchord::{recognize_chords, FingeringEntry, FingeringTable, Recognition};
//!
//! let table = FingeringTable::new(vec![
//!     FingeringEntry::new("C", "E 0 A 3 D 2 G 0 B 1 E 0 "),
//! ]);
//! let source = "e|-0---|\nB|-1---|\nG|-0---|\nD|-2---|\nA|-3---|\nE|-0---|\n";
//!
//! let report = recognize_chords(source, &table)?;
//! match &report.clusters[0].outcome {
//!     Recognition::Recognized(chord) => assert_eq!(chord.name, "C"),
//!     Recognition::Unrecognized => unreachable!(),
//! }
//! # Ok::<(), tabchord::TabError>(())
//! ```

use crate::error::TabError;
use crate::fingering::FingeringTable;
use crate::matcher::{canonical_key, match_key, ChordMatch};
use crate::ocr::TextRecognizer;
use crate::parser::parse;
use crate::segment::segment;
use crate::tab::Tuning;
use serde::Serialize;
use std::path::Path;

/// Outcome of matching one cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Recognition {
    Recognized(ChordMatch),
    Unrecognized,
}

impl Recognition {
    pub fn chord(&self) -> Option<&ChordMatch> {
        match self {
            Recognition::Recognized(chord) => Some(chord),
            Recognition::Unrecognized => None,
        }
    }
}

/// One cluster of simultaneous notes and what it matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterReport {
    pub column: usize,
    pub key: String,
    pub outcome: Recognition,
}

/// Everything recognized in one tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabReport {
    pub tuning: Tuning,
    pub note_count: usize,
    pub clusters: Vec<ClusterReport>,
}

impl TabReport {
    /// Names of recognized chords in tab order
    pub fn chord_names(&self) -> Vec<&str> {
        self.clusters
            .iter()
            .filter_map(|c| c.outcome.chord())
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Parse a tab and match every cluster of simultaneous notes.
///
/// # Errors
/// Returns [`TabError::InvalidTabFormat`] when the text has no tab lines or
/// does not describe six strings. Unmatched clusters and stray digit runs
/// are not errors.
pub fn recognize_chords(source: &str, table: &FingeringTable) -> Result<TabReport, TabError> {
    let tab = parse(source)?;
    let clusters = segment(&tab.notes);

    let mut reports = Vec::with_capacity(clusters.len());
    for cluster in &clusters {
        // Parsed notes always name strings 1..=6
        let (Some(column), Some(key)) = (cluster.column(), canonical_key(&tab.tuning, cluster))
        else {
            continue;
        };
        let outcome = match match_key(&key, table) {
            Some(chord) => Recognition::Recognized(chord),
            None => {
                tracing::debug!(column, key = %key, "no chord matches cluster");
                Recognition::Unrecognized
            }
        };
        reports.push(ClusterReport {
            column,
            key,
            outcome,
        });
    }

    tracing::info!(
        notes = tab.notes.len(),
        clusters = reports.len(),
        recognized = reports.iter().filter(|r| r.outcome.chord().is_some()).count(),
        "recognized chords"
    );

    Ok(TabReport {
        tuning: tab.tuning,
        note_count: tab.notes.len(),
        clusters: reports,
    })
}

/// Run OCR on an image and recognize chords in the resulting text.
pub fn recognize_image<R: TextRecognizer + ?Sized>(
    recognizer: &R,
    image: &Path,
    table: &FingeringTable,
) -> Result<TabReport, TabError> {
    let text = recognizer.recognize_text(image)?;
    recognize_chords(&text, table)
}
