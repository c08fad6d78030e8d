use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::NoteId;
use crate::notebook::Notebook;
use crate::store::KvStore;

pub fn run<K: KvStore>(nb: &mut Notebook<K>, ids: &[NoteId]) -> Result<CmdResult> {
    // Resolve everything first so a bad id deletes nothing.
    let notes = ids
        .iter()
        .map(|id| nb.find(id).cloned().ok_or_else(|| NotesError::NotFound(id.clone())))
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    for note in &notes {
        if nb.delete(&note.id)? {
            result.add_message(CmdMessage::success(format!(
                "Deleted note: {}",
                note.display_title()
            )));
        }
    }
    Ok(result.with_affected_notes(notes))
}
