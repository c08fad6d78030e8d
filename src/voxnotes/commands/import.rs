use crate::commands::{count_label, CmdMessage, CmdResult};
use crate::error::Result;
use crate::notebook::Notebook;
use crate::store::KvStore;

/// Merge the notes in `text` into the collection.
pub fn run<K: KvStore>(nb: &mut Notebook<K>, text: &str) -> Result<CmdResult> {
    let before = nb.notes().len();
    let imported = nb.import_text(text)?;

    let mut result = CmdResult::default();
    result.affected_notes = nb.notes()[before..].to_vec();
    if imported == 0 {
        result.add_message(CmdMessage::info("Nothing to import."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Imported {}",
            count_label(imported)
        )));
    }
    Ok(result)
}
