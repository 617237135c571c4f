//! # Fingering Table
//!
//! Immutable table of `(chord name, fret string)` records, loaded once from the
//! precomputed YAML store and shared read-only by every lookup.
//!
//! ## Store Format
//! ```yaml
//! - name: C Major
//!   frets: "A 3 D 2 G 0 B 1 E 0 "
//! - name: C Major
//!   frets: "A 3 D 5 G 5 B 5 E 3 "
//! ```
//! Records may also be written as `[name, frets]` pairs. A fret string lists
//! `"<string letter> <fret> "` pairs from the thickest string to the thinnest,
//! trailing space included. Names repeat when a chord has several fingerings.
//!
//! ## Lookup Semantics
//! - [`FingeringTable::lookup`] is an exact string match. If two records share a
//!   fret string, the one that appears first in the store wins.
//! - [`FingeringTable::alternates_for`] returns every fret string recorded under
//!   a name, in store order, including the one that matched.

use crate::error::TabError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One fingering record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingeringEntry {
    pub name: String,
    pub frets: String,
}

impl FingeringEntry {
    pub fn new(name: impl Into<String>, frets: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frets: frets.into(),
        }
    }
}

/// Either record form accepted in the store
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Pair(String, String),
    Entry(FingeringEntry),
}

impl From<StoredRecord> for FingeringEntry {
    fn from(record: StoredRecord) -> Self {
        match record {
            StoredRecord::Pair(name, frets) => FingeringEntry { name, frets },
            StoredRecord::Entry(entry) => entry,
        }
    }
}

/// Chord fingering table indexed by fret string and by name
#[derive(Debug, Clone, Default)]
pub struct FingeringTable {
    entries: Vec<FingeringEntry>,
    by_frets: HashMap<String, usize>,
    by_name: HashMap<String, Vec<usize>>,
}

impl FingeringTable {
    /// Build a table from records in store order.
    pub fn new(entries: Vec<FingeringEntry>) -> Self {
        let mut by_frets = HashMap::with_capacity(entries.len());
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, entry) in entries.iter().enumerate() {
            // First occurrence wins
            by_frets.entry(entry.frets.clone()).or_insert(i);
            by_name.entry(entry.name.clone()).or_default().push(i);
        }

        Self {
            entries,
            by_frets,
            by_name,
        }
    }

    /// Load the store from disk.
    ///
    /// A missing, unreadable or malformed file is reported as
    /// [`TabError::DatabaseUnavailable`].
    pub fn load(path: &Path) -> Result<Self, TabError> {
        let location = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| TabError::DatabaseUnavailable {
            location: location.clone(),
            message: e.to_string(),
        })?;
        let table = Self::parse_store(&content, location)?;
        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            chords = table.chord_count(),
            "loaded fingering table"
        );
        Ok(table)
    }

    /// Parse a store held in memory.
    pub fn from_yaml_str(content: &str) -> Result<Self, TabError> {
        Self::parse_store(content, "<memory>".to_string())
    }

    fn parse_store(content: &str, location: String) -> Result<Self, TabError> {
        let records: Vec<StoredRecord> =
            serde_yaml::from_str(content).map_err(|e| TabError::DatabaseUnavailable {
                location,
                message: format!("malformed fingering store: {}", e),
            })?;
        Ok(Self::new(records.into_iter().map(FingeringEntry::from).collect()))
    }

    /// Write the table back out in store format.
    pub fn save(&self, path: &Path) -> Result<(), TabError> {
        let yaml = serde_yaml::to_string(&self.entries).map_err(|e| TabError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        fs::write(path, yaml).map_err(|source| TabError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Name of the first chord whose fret string equals `key`.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.by_frets
            .get(key)
            .map(|&i| self.entries[i].name.as_str())
    }

    /// Every fret string recorded under `name`, in store order.
    pub fn alternates_for(&self, name: &str) -> Vec<&str> {
        self.by_name
            .get(name)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| self.entries[i].frets.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &[FingeringEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct chord names
    pub fn chord_count(&self) -> usize {
        self.by_name.len()
    }
}
