//! # Tab Parser
//!
//! Converts raw ASCII tablature into a [`Tuning`] and a column-sorted list of
//! [`NoteEvent`]s.
//!
//! ## Line Rules
//! - A line is a tab line only if its first character is a note letter `A`-`G`
//!   in either case. Every other line (titles, blank lines, OCR noise) is skipped.
//! - Lines cycle through string numbers 1..=6, so a tab with several systems
//!   stacked vertically keeps assigning notes to the right strings.
//! - The first six tab lines define the tuning. Later blocks reuse it.
//! - `|` and `\` act as spaces; the rest of the line is split on `-` into cells.
//!   Each cell advances the column counter, and cells made only of digits are
//!   frets (`10` is one fret, not two). A digit cell of any width is a fret;
//!   leading zeros are dropped, so `07` and `7` are the same fret.
//! - Lines are taken without their terminator, so a final cell such as `3` in
//!   `e|-0-3` is a fret even though no `-` follows it.
//!
//! ## Example
//! ```rust
//! use tabchord::{parse_tab, NoteEvent};
//!
//! let tab = parse_tab("e|-0---|\nB|-1---|\nG|-0---|\nD|-2---|\nA|-3---|\nE|-0---|\n")?;
//! assert_eq!(tab.tuning.to_string(), "EBGDAE");
//! assert_eq!(tab.notes[0], NoteEvent::new(1, 0, 2));
//! # Ok::<(), tabchord::TabError>(())
//! ```

use crate::error::TabError;
use crate::tab::{NoteEvent, NoteName, Tab, Tuning, STRING_COUNT};

/// Fret-number delimiter inside a tab line
const CELL_DELIMITER: char = '-';

/// Parser state carried across lines
pub struct Parser {
    string_index: u8,
    tuning: Vec<NoteName>,
    notes: Vec<NoteEvent>,
    tab_lines: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            string_index: 1,
            tuning: Vec::with_capacity(STRING_COUNT),
            notes: Vec::new(),
            tab_lines: 0,
        }
    }

    /// Feed one line of input, without its line terminator.
    pub fn parse_line(&mut self, line: &str) {
        if usize::from(self.string_index) > STRING_COUNT {
            self.string_index = 1;
        }

        let Some(note) = line.chars().next().and_then(NoteName::from_char) else {
            return;
        };

        self.tab_lines += 1;
        if self.tuning.len() < STRING_COUNT {
            self.tuning.push(note);
        }

        let cleaned = line.replace(|c: char| c == '|' || c == '\\', " ");
        for (i, cell) in cleaned.split(CELL_DELIMITER).enumerate() {
            if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            self.notes
                .push(NoteEvent::from_digits(self.string_index, cell, i + 1));
        }

        tracing::trace!(
            string = self.string_index,
            notes = self.notes.len(),
            "parsed tab line"
        );
        self.string_index += 1;
    }

    /// Validate the accumulated state and produce the sorted note stream.
    pub fn finish(self) -> Result<Tab, TabError> {
        if self.tab_lines == 0 {
            return Err(TabError::invalid_tab("No valid tab lines found"));
        }

        let found = self.tuning.len();
        let tuning = Tuning::try_from(self.tuning).map_err(|_| {
            TabError::invalid_tab(format!(
                "expected {} strings in the tuning, found {}. Only standard 6-string guitar tabs are supported",
                STRING_COUNT, found
            ))
        })?;

        // Stable: notes sharing a column keep their top-to-bottom string order
        let mut notes = self.notes;
        notes.sort_by_key(|n| n.column);

        tracing::debug!(
            tuning = %tuning,
            lines = self.tab_lines,
            notes = notes.len(),
            "parsed tab"
        );
        Ok(Tab { tuning, notes })
    }
}

/// Parse raw tab text into a tuning and a column-sorted note stream.
pub fn parse(source: &str) -> Result<Tab, TabError> {
    let mut parser = Parser::new();
    for line in source.lines() {
        parser.parse_line(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const C_MAJOR: &str = "e|-0---|\nB|-1---|\nG|-0---|\nD|-2---|\nA|-3---|\nE|-0---|\n";

    #[test]
    fn test_parse_c_major_block() {
        let tab = parse(C_MAJOR).unwrap();
        assert_eq!(tab.tuning.to_string(), "EBGDAE");
        assert_eq!(
            tab.notes,
            vec![
                NoteEvent::new(1, 0, 2),
                NoteEvent::new(2, 1, 2),
                NoteEvent::new(3, 0, 2),
                NoteEvent::new(4, 2, 2),
                NoteEvent::new(5, 3, 2),
                NoteEvent::new(6, 0, 2),
            ]
        );
    }

    #[test]
    fn test_multi_digit_fret_is_one_note() {
        let source = "e|-10-12-|\nB|---|\nG|---|\nD|---|\nA|---|\nE|---|\n";
        let tab = parse(source).unwrap();
        assert_eq!(
            tab.notes,
            vec![NoteEvent::new(1, 10, 2), NoteEvent::new(1, 12, 3)]
        );
    }

    #[test]
    fn test_empty_cells_advance_column() {
        let source = "e|--3|\nB|---|\nG|---|\nD|---|\nA|---|\nE|---|\n";
        let tab = parse(source).unwrap();
        // "e ", "", "3 " -> the trailing space keeps "3 " from being numeric
        assert!(tab.notes.is_empty());

        let source = "e|--3-|\nB|---|\nG|---|\nD|---|\nA|---|\nE|---|\n";
        let tab = parse(source).unwrap();
        assert_eq!(tab.notes, vec![NoteEvent::new(1, 3, 3)]);
    }

    #[test]
    fn test_line_without_numbers_still_counts_as_string() {
        let source = "e|-----|\nB|-1---|\nG|-----|\nD|-----|\nA|-----|\nE|-----|\n";
        let tab = parse(source).unwrap();
        assert_eq!(tab.notes, vec![NoteEvent::new(2, 1, 2)]);
    }

    #[test]
    fn test_non_tab_lines_are_ignored() {
        let source = format!("Song title: 123\n\n| bar\n{}\n-- trailing --\n", C_MAJOR);
        // "Song title" starts with 'S', not a note letter
        let tab = parse(&source).unwrap();
        assert_eq!(tab.notes.len(), 6);
        assert!(tab.notes.iter().all(|n| n.column == 2));
    }

    #[test]
    fn test_lowercase_letters_are_uppercased() {
        let source = "e|-0-|\nb|-1-|\ng|-0-|\nd|-2-|\na|-3-|\ne|-0-|\n";
        let tab = parse(source).unwrap();
        assert_eq!(tab.tuning.to_string(), "EBGDAE");
    }

    #[test]
    fn test_string_index_cycles_every_six_lines() {
        let block_one = "e|-0-----|\nB|-------|\nG|-------|\nD|-------|\nA|-------|\nE|-------|\n";
        let block_two = "e|-------|\nB|-------|\nG|-------|\nD|-------|\nA|-------|\nE|-----5-|\n";
        let tab = parse(&format!("{}\n{}", block_one, block_two)).unwrap();
        assert_eq!(tab.tuning.to_string(), "EBGDAE");
        assert_eq!(
            tab.notes,
            vec![NoteEvent::new(1, 0, 2), NoteEvent::new(6, 5, 6)]
        );
    }

    #[test]
    fn test_tuning_taken_from_first_block_only() {
        let block_one = "e|-0-|\nB|-0-|\nG|-0-|\nD|-0-|\nA|-0-|\nE|-0-|\n";
        let block_two = "D|-0-|\nA|-0-|\nF|-0-|\nC|-0-|\nG|-0-|\nD|-0-|\n";
        let tab = parse(&format!("{}{}", block_one, block_two)).unwrap();
        assert_eq!(tab.tuning.to_string(), "EBGDAE");
        assert_eq!(tab.notes.len(), 12);
    }

    #[test]
    fn test_backslash_is_a_separator() {
        let source = "e\\-7-|\nB|---|\nG|---|\nD|---|\nA|---|\nE|---|\n";
        let tab = parse(source).unwrap();
        assert_eq!(tab.notes, vec![NoteEvent::new(1, 7, 2)]);
    }

    #[test]
    fn test_notes_sorted_by_column_stably() {
        let source = "e|---3-|\nB|-1--3-|\nG|-----|\nD|-2---|\nA|-----|\nE|-----|\n";
        let tab = parse(source).unwrap();
        let columns: Vec<usize> = tab.notes.iter().map(|n| n.column).collect();
        assert_eq!(columns, vec![2, 2, 4, 4]);
        // Ties stay in string order
        assert_eq!(tab.notes[0].string, 2);
        assert_eq!(tab.notes[1].string, 4);
        assert_eq!(tab.notes[2].string, 1);
        assert_eq!(tab.notes[3].string, 2);
    }

    #[test]
    fn test_no_tab_lines_is_error() {
        for source in ["", "This is not a tab\nJust some text\n"] {
            let err = parse(source).unwrap_err();
            match err {
                TabError::InvalidTabFormat { message, .. } => {
                    assert!(message.contains("No valid tab lines found"));
                }
                _ => panic!("Expected InvalidTabFormat"),
            }
        }
    }

    #[test]
    fn test_fewer_than_six_strings_is_error() {
        let source = "e|-0-|\nB|-1-|\nG|-0-|\nD|-2-|\n";
        let err = parse(source).unwrap_err();
        match err {
            TabError::InvalidTabFormat { message, .. } => {
                assert!(message.contains("found 4"));
            }
            _ => panic!("Expected InvalidTabFormat"),
        }
    }

    #[test]
    fn test_wide_digit_run_is_a_fret() {
        let source = "e|-0---12345678901-|\nB|-1---|\nG|-0---|\nD|-2---|\nA|-3---|\nE|-0---|\n";
        let tab = parse(source).unwrap();
        assert_eq!(tab.notes.len(), 7);
        assert_eq!(tab.notes[6].fret, "12345678901");
        assert_eq!(tab.notes[6].column, 5);
    }

    #[test]
    fn test_leading_zeros_are_dropped() {
        let source = "e|-07-|\nB|-00-|\nG|---|\nD|---|\nA|---|\nE|---|\n";
        let tab = parse(source).unwrap();
        assert_eq!(
            tab.notes,
            vec![NoteEvent::new(1, 7, 2), NoteEvent::new(2, 0, 2)]
        );
    }

    #[test]
    fn test_final_cell_without_delimiter_is_a_fret() {
        let source = "e|-0-3\nB|-1-3\r\nG|---|\nD|---|\nA|---|\nE|---|";
        let tab = parse(source).unwrap();
        assert_eq!(
            tab.notes,
            vec![
                NoteEvent::new(1, 0, 2),
                NoteEvent::new(2, 1, 2),
                NoteEvent::new(1, 3, 3),
                NoteEvent::new(2, 3, 3),
            ]
        );
    }
}
