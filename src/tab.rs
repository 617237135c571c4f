//! # Tablature Types
//!
//! Types produced by the tab parser and consumed by segmentation and matching.
//!
//! ## Type Hierarchy
//! ```text
//! Tab
//!   ├── Tuning ([NoteName; 6], string 1 first)
//!   └── Vec<NoteEvent> (sorted by column)
//!         ├── string: 1..=6
//!         ├── fret: decimal digits, no leading zeros ("0" = open string)
//!         └── column: cell index within the source line (1-based)
//! ```
//!
//! ## Key Concepts
//!
//! ### String numbering
//! String 1 is the first tab line encountered. Tabs are read in blocks of six
//! lines, so the seventh valid line is string 1 again.
//!
//! ### Columns
//! A column counts `-`-delimited cells, not characters. `e|-0---|` puts the `0`
//! in column 2 because the leading `e ` is cell 1. Notes on different strings
//! with the same column are played together.

use serde::Serialize;
use std::fmt;

/// Number of strings on a standard guitar
pub const STRING_COUNT: usize = 6;

/// Note names A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NoteName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteName {
    /// Parse a note letter in either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::A => 'A',
            NoteName::B => 'B',
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Open-string note of each of the six strings, string 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tuning([NoteName; STRING_COUNT]);

impl Tuning {
    pub fn new(strings: [NoteName; STRING_COUNT]) -> Self {
        Self(strings)
    }

    /// Standard tuning written the way tabs list it, thinnest string first.
    pub fn standard() -> Self {
        use NoteName::*;
        Self([E, B, G, D, A, E])
    }

    /// Note of a 1-based string number, `None` outside `1..=6`.
    pub fn note_for(&self, string: u8) -> Option<NoteName> {
        let index = usize::from(string).checked_sub(1)?;
        self.0.get(index).copied()
    }

    pub fn notes(&self) -> &[NoteName; STRING_COUNT] {
        &self.0
    }
}

impl TryFrom<Vec<NoteName>> for Tuning {
    type Error = Vec<NoteName>;

    fn try_from(notes: Vec<NoteName>) -> Result<Self, Self::Error> {
        let strings: [NoteName; STRING_COUNT] = notes.try_into()?;
        Ok(Self(strings))
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for note in &self.0 {
            write!(f, "{}", note)?;
        }
        Ok(())
    }
}

/// A single plucked note
///
/// The fret is kept as decimal text so a digit run of any length is a valid
/// fret. OCR output can contain digit runs far wider than any real fretboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEvent {
    pub string: u8,
    pub fret: String,
    pub column: usize,
}

impl NoteEvent {
    pub fn new(string: u8, fret: u32, column: usize) -> Self {
        Self {
            string,
            fret: fret.to_string(),
            column,
        }
    }

    /// Build a note from a cell of ASCII digits, dropping leading zeros.
    ///
    /// ```
    /// # use tabchord::NoteEvent;
    /// assert_eq!(NoteEvent::from_digits(1, "07", 2).fret, "7");
    /// assert_eq!(NoteEvent::from_digits(1, "00", 2).fret, "0");
    /// ```
    pub fn from_digits(string: u8, digits: &str, column: usize) -> Self {
        let trimmed = digits.trim_start_matches('0');
        let fret = if trimmed.is_empty() { "0" } else { trimmed };
        Self {
            string,
            fret: fret.to_string(),
            column,
        }
    }
}

/// Result of parsing a tab: the tuning and every note sorted by column
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub tuning: Tuning,
    pub notes: Vec<NoteEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_name_case_insensitive() {
        assert_eq!(NoteName::from_char('e'), Some(NoteName::E));
        assert_eq!(NoteName::from_char('G'), Some(NoteName::G));
        assert_eq!(NoteName::from_char('h'), None);
        assert_eq!(NoteName::from_char('|'), None);
    }

    #[test]
    fn test_tuning_note_for_string() {
        let tuning = Tuning::standard();
        assert_eq!(tuning.note_for(1), Some(NoteName::E));
        assert_eq!(tuning.note_for(5), Some(NoteName::A));
        assert_eq!(tuning.note_for(0), None);
        assert_eq!(tuning.note_for(7), None);
        assert_eq!(tuning.to_string(), "EBGDAE");
    }

    #[test]
    fn test_tuning_requires_six_notes() {
        let five = vec![NoteName::E; 5];
        assert!(Tuning::try_from(five).is_err());
        let six = vec![NoteName::D; 6];
        assert_eq!(Tuning::try_from(six).unwrap().notes(), &[NoteName::D; 6]);
    }

    #[test]
    fn test_fret_digits_are_canonical() {
        assert_eq!(NoteEvent::from_digits(2, "012", 4), NoteEvent::new(2, 12, 4));
        assert_eq!(NoteEvent::from_digits(2, "000", 4), NoteEvent::new(2, 0, 4));
        let wide = NoteEvent::from_digits(1, "0012345678901234567890", 3);
        assert_eq!(wide.fret, "12345678901234567890");
    }
}
