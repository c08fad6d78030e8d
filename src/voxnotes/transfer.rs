//! Export to and import from the external JSON representation.
//!
//! The export is the pretty-printed note collection. An import file must be a
//! JSON array of objects; anything else is rejected as a whole before the
//! repository is touched.

use crate::error::{NotesError, Result};
use crate::model::{Note, RawNote};
use serde_json::Value;

pub const DEFAULT_EXPORT_FILENAME: &str = "notes-export.json";

pub fn export_all(notes: &[Note]) -> Result<String> {
    serde_json::to_string_pretty(notes).map_err(NotesError::Serialization)
}

pub fn parse_import(text: &str) -> Result<Vec<RawNote>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| NotesError::InvalidFormat(format!("not valid JSON ({})", e)))?;

    let Value::Array(items) = value else {
        return Err(NotesError::InvalidFormat(
            "expected a list of notes".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(NotesError::InvalidFormat(format!(
                    "entry {} is not a note record",
                    i + 1
                )));
            }
            serde_json::from_value(item).map_err(|e| {
                NotesError::InvalidFormat(format!("entry {} has bad fields ({})", i + 1, e))
            })
        })
        .collect()
}
