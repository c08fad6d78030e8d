use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::notebook::Notebook;
use crate::session::CommitOutcome;
use crate::store::KvStore;

/// Create a note. With no text at all an empty note is stored and opened,
/// matching the "New" action; otherwise the text goes through the editor
/// session so it is trimmed like any other save.
pub fn run<K: KvStore>(nb: &mut Notebook<K>, title: String, content: String) -> Result<CmdResult> {
    if title.trim().is_empty() && content.trim().is_empty() {
        let note = nb.create_note()?;
        let mut result = CmdResult::default().with_affected_notes(vec![note]);
        result.add_message(CmdMessage::success("Created empty note"));
        return Ok(result);
    }

    nb.new_draft();
    nb.set_draft_title(title);
    nb.set_draft_content(content);

    let mut result = CmdResult::default();
    match nb.save()? {
        CommitOutcome::Created(note) | CommitOutcome::Updated(note) => {
            result.add_message(CmdMessage::success(format!(
                "Created note: {}",
                note.display_title()
            )));
            result.affected_notes.push(note);
        }
        CommitOutcome::Skipped => {
            result.add_message(CmdMessage::warning("Nothing to save"));
        }
    }
    Ok(result)
}
