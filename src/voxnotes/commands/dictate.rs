use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::NoteId;
use crate::notebook::Notebook;
use crate::session::CommitOutcome;
use crate::speech::TranscriptSource;
use crate::store::KvStore;
use tracing::debug;

/// Feed a dictation session into a note.
///
/// Capture starts in `lang`. Fragments are appended to the draft of `target`
/// (or of a fresh draft) and
/// autosave ticks run between events on `clock`. The draft is committed once
/// more when the source runs dry, so nothing dictated after the last tick is
/// lost. A capture failure is returned after that final commit.
pub fn run<K: KvStore, S: TranscriptSource>(
    nb: &mut Notebook<K>,
    source: &mut S,
    clock: &dyn Clock,
    target: Option<&NoteId>,
    lang: &str,
) -> Result<CmdResult> {
    match target {
        Some(id) => {
            if !nb.open(id) {
                return Err(NotesError::NotFound(id.clone()));
            }
        }
        None => nb.new_draft(),
    }

    source.start(lang)?;
    nb.autosave(clock.now_millis())?;

    let mut failure = None;
    let mut autosaves = 0usize;
    while let Some(event) = source.next_event() {
        if let Err(e) = nb.apply_dictation(event) {
            failure = Some(e);
            break;
        }
        if nb.autosave(clock.now_millis())?.is_some() {
            autosaves += 1;
        }
    }
    source.stop();
    debug!(autosaves, "dictation finished");

    let mut result = CmdResult::default();
    match nb.save()? {
        CommitOutcome::Created(note) | CommitOutcome::Updated(note) => {
            result.add_message(CmdMessage::success(format!(
                "Saved note: {} ({} characters)",
                note.display_title(),
                nb.session().char_count()
            )));
            result.affected_notes.push(note);
        }
        CommitOutcome::Skipped => {
            result.add_message(CmdMessage::info("Nothing was dictated."));
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(result),
    }
}
