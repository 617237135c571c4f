//! # Chord Matching
//!
//! Turns a cluster into a canonical key and looks it up in the fingering table.
//!
//! ## Canonical Key
//! Cluster members are visited from last to first and each contributes
//! `"<tuning letter> <fret> "`. Tabs list the thinnest string first, so walking
//! the cluster backwards yields the thickest-to-thinnest order used by the store.
//!
//! ```rust
//! use tabchord::{canonical_key, ChordCluster, NoteEvent, Tuning};
//!
//! let notes = [NoteEvent::new(1, 3, 5), NoteEvent::new(2, 3, 5)];
//! let tuning = Tuning::standard();
//! let key = canonical_key(&tuning, &ChordCluster::new(&notes));
//! assert_eq!(key.as_deref(), Some("B 3 E 3 "));
//! ```

use crate::fingering::FingeringTable;
use crate::segment::ChordCluster;
use crate::tab::Tuning;
use serde::Serialize;
use std::fmt::Write;

/// A recognized chord and every fingering stored under its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordMatch {
    pub name: String,
    pub alternates: Vec<String>,
}

/// Build the lookup key for a cluster.
///
/// Returns `None` for an empty cluster or when a note names a string the
/// tuning does not have.
pub fn canonical_key(tuning: &Tuning, cluster: &ChordCluster<'_>) -> Option<String> {
    if cluster.is_empty() {
        return None;
    }

    let mut key = String::new();
    for note in cluster.notes().iter().rev() {
        let letter = tuning.note_for(note.string)?;
        // Writing to a String cannot fail
        let _ = write!(key, "{} {} ", letter, note.fret);
    }
    Some(key)
}

/// Recognize the chord played by a cluster.
///
/// A miss is `None`, not an error; callers report it and move on.
pub fn recognize(
    tuning: &Tuning,
    cluster: &ChordCluster<'_>,
    table: &FingeringTable,
) -> Option<ChordMatch> {
    let key = canonical_key(tuning, cluster)?;
    match_key(&key, table)
}

/// Look up an already built canonical key.
pub fn match_key(key: &str, table: &FingeringTable) -> Option<ChordMatch> {
    let name = table.lookup(key)?;
    let alternates = table
        .alternates_for(name)
        .into_iter()
        .map(str::to_string)
        .collect();

    tracing::debug!(key, chord = name, "chord recognized");
    Some(ChordMatch {
        name: name.to_string(),
        alternates,
    })
}
