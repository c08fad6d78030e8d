use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::NoteId;
use crate::notebook::Notebook;
use crate::session::CommitOutcome;
use crate::store::KvStore;

/// Open `id`, replace its draft with `title`/`content` and save.
pub fn run<K: KvStore>(
    nb: &mut Notebook<K>,
    id: &NoteId,
    title: String,
    content: String,
) -> Result<CmdResult> {
    if !nb.open(id) {
        return Err(NotesError::NotFound(id.clone()));
    }
    nb.set_draft_title(title);
    nb.set_draft_content(content);

    let mut result = CmdResult::default();
    match nb.save()? {
        CommitOutcome::Updated(note) | CommitOutcome::Created(note) => {
            result.add_message(CmdMessage::success(format!(
                "Saved note: {}",
                note.display_title()
            )));
            result.affected_notes.push(note);
        }
        CommitOutcome::Skipped => {
            result.add_message(CmdMessage::warning("Note disappeared before saving"));
        }
    }
    Ok(result)
}
