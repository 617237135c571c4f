//! # Chord Dictionary Import
//!
//! Builds the fingering store from the Gnome Guitar XML chord dictionary
//! (<http://gnome-chord.sourceforge.net/>).
//!
//! ## Expected Layout
//! ```text
//! <chords>
//!   <chord name="C Major">
//!     <voiceing>
//!       <guitarString>
//!         <note>E</note>   <- child 1: string letter
//!         <...>            <- child 2: ignored
//!         <fret>0</fret>   <- child 3: fret, skipped when empty
//!       </guitarString>
//!       ...
//! ```
//! Children of `guitarString` are read by position, not by tag name. Strings
//! are listed thickest to thinnest, which is the order the fret string keeps.

use crate::error::TabError;
use crate::fingering::{FingeringEntry, FingeringTable};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

const ROOT_ELEMENT: &str = "chords";
const VOICING_ELEMENT: &str = "voiceing";
const STRING_ELEMENT: &str = "guitarString";

/// Position of the string letter among a `guitarString`'s children
const LETTER_FIELD: usize = 0;
/// Position of the fret number among a `guitarString`'s children
const FRET_FIELD: usize = 2;

/// Chord being assembled while its element is open
struct PendingChord {
    name: String,
    frets: String,
}

/// Parse dictionary XML into fingering records in document order.
pub fn parse_dictionary(xml: &str) -> Result<Vec<FingeringEntry>, TabError> {
    let mut reader = Reader::from_str(xml);
    // Text is trimmed; whitespace-only text never reaches a field
    reader.trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut entries = Vec::new();
    let mut chord: Option<PendingChord> = None;
    let mut fields: Option<Vec<Option<String>>> = None;
    let mut saw_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            dictionary_error(format!(
                "Failed to parse XML at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = element_name(&e);
                open_element(&e, &name, &stack, &mut saw_root, &mut chord, &mut fields)?;
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                open_element(&e, &name, &stack, &mut saw_root, &mut chord, &mut fields)?;
                // A self-closing chord has no voicing
                if stack.len() == 1 {
                    if let Some(done) = chord.take() {
                        entries.push(FingeringEntry::new(done.name, done.frets));
                    }
                }
            }
            Event::Text(t) => {
                if stack.len() == 5 && stack[3] == STRING_ELEMENT {
                    let text = t
                        .unescape()
                        .map_err(|e| dictionary_error(format!("Invalid text content: {}", e)))?;
                    if let Some(Some(slot)) = fields.as_mut().map(|f| f.last_mut()) {
                        slot.get_or_insert_with(String::new).push_str(&text);
                    }
                }
            }
            Event::End(_) => {
                let closed = stack.pop();
                match (stack.len(), closed.as_deref()) {
                    (3, Some(STRING_ELEMENT)) => {
                        if let (Some(values), Some(pending)) = (fields.take(), chord.as_mut()) {
                            append_string(&mut pending.frets, &values);
                        }
                    }
                    (1, Some(_)) => {
                        if let Some(done) = chord.take() {
                            entries.push(FingeringEntry::new(done.name, done.frets));
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(dictionary_error(format!(
            "Failed to parse XML: unclosed element '{}'",
            stack.join("/")
        )));
    }
    if !saw_root {
        return Err(dictionary_error(format!(
            "Failed to parse XML: no root element, expected '{}'",
            ROOT_ELEMENT
        )));
    }
    if entries.is_empty() {
        return Err(dictionary_error("No chord entries found"));
    }

    Ok(entries)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn open_element(
    e: &BytesStart<'_>,
    name: &str,
    stack: &[String],
    saw_root: &mut bool,
    chord: &mut Option<PendingChord>,
    fields: &mut Option<Vec<Option<String>>>,
) -> Result<(), TabError> {
    match stack.len() {
        0 => {
            if name != ROOT_ELEMENT {
                return Err(dictionary_error(format!(
                    "Invalid XML structure: expected root element '{}', found '{}'",
                    ROOT_ELEMENT, name
                )));
            }
            *saw_root = true;
        }
        1 => {
            let chord_name = e
                .try_get_attribute("name")
                .map_err(|err| dictionary_error(format!("Invalid attribute: {}", err)))?
                .ok_or_else(|| {
                    dictionary_error(format!("Chord element '{}' is missing 'name' attribute", name))
                })?
                .unescape_value()
                .map_err(|err| dictionary_error(format!("Invalid attribute value: {}", err)))?
                .into_owned();
            *chord = Some(PendingChord {
                name: chord_name,
                frets: String::new(),
            });
        }
        3 if stack[2] == VOICING_ELEMENT && name == STRING_ELEMENT => {
            *fields = Some(Vec::new());
        }
        4 if stack[3] == STRING_ELEMENT => {
            if let Some(values) = fields.as_mut() {
                values.push(None);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Append `"<letter> <fret> "` for one string when it carries a fret.
fn append_string(frets: &mut String, values: &[Option<String>]) {
    let Some(Some(fret)) = values.get(FRET_FIELD) else {
        return;
    };
    if fret.is_empty() {
        return;
    }
    let letter = values
        .get(LETTER_FIELD)
        .and_then(|v| v.as_deref())
        .unwrap_or("None");
    frets.push_str(letter);
    frets.push(' ');
    frets.push_str(fret);
    frets.push(' ');
}

fn dictionary_error(message: impl Into<String>) -> TabError {
    TabError::DictionaryError {
        location: "<memory>".to_string(),
        message: message.into(),
    }
}

fn with_location(err: TabError, path: &Path) -> TabError {
    match err {
        TabError::DictionaryError { message, .. } => TabError::DictionaryError {
            location: path.display().to_string(),
            message,
        },
        other => other,
    }
}

/// Read and parse a dictionary file.
pub fn load_dictionary(path: &Path) -> Result<Vec<FingeringEntry>, TabError> {
    if !path.exists() {
        return Err(TabError::DictionaryError {
            location: path.display().to_string(),
            message: "XML database not found".to_string(),
        });
    }
    let xml = fs::read_to_string(path).map_err(|e| TabError::DictionaryError {
        location: path.display().to_string(),
        message: format!("Failed to read XML database: {}", e),
    })?;
    parse_dictionary(&xml).map_err(|e| with_location(e, path))
}

/// Convert a dictionary file into the fingering store. Returns the number of
/// records written.
pub fn build_database(dictionary: &Path, store: &Path) -> Result<usize, TabError> {
    let entries = load_dictionary(dictionary)?;
    let table = FingeringTable::new(entries);
    table.save(store)?;
    tracing::info!(
        dictionary = %dictionary.display(),
        store = %store.display(),
        entries = table.len(),
        "built fingering store"
    );
    Ok(table.len())
}
