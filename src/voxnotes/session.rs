//! # Editor Session
//!
//! Tracks which note (if any) is being edited and holds a private draft of
//! its title and content. The draft is a copy: edits stay staged here until
//! [`EditorSession::commit`] writes them to the repository.
//!
//! ```text
//!            open_note(id)          new_draft()
//!   Idle ─────────────────► Editing(Some(id))   Editing(None)
//!    ▲                             │                 │
//!    │   discard_and_clear()       │ commit()        │ commit() (non-empty)
//!    │   delete_active()           ▼                 ▼
//!    └──────────────────── Editing(Some(id)) ◄───────┘
//! ```

use crate::error::{NotesError, Result};
use crate::model::{Note, NoteId};
use crate::repository::NoteRepository;
use crate::store::KvStore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    /// Editing a note. `None` until the first commit creates the backing note.
    Editing(Option<NoteId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(Note),
    Updated(Note),
    Skipped,
}

impl CommitOutcome {
    pub fn note(&self) -> Option<&Note> {
        match self {
            CommitOutcome::Created(note) | CommitOutcome::Updated(note) => Some(note),
            CommitOutcome::Skipped => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct EditorSession {
    state: SessionState,
    draft_title: String,
    draft_content: String,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_id(&self) -> Option<&NoteId> {
        match &self.state {
            SessionState::Editing(Some(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    pub fn draft_content(&self) -> &str {
        &self.draft_content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft_title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft_content = content.into();
    }

    /// Append a dictated fragment to the content draft.
    pub fn append_content(&mut self, fragment: &str) {
        self.draft_content.push_str(fragment);
    }

    pub fn char_count(&self) -> usize {
        self.draft_content.chars().count()
    }

    /// True when either draft field is non-blank.
    pub fn has_unsaved_content(&self) -> bool {
        !self.draft_title.trim().is_empty() || !self.draft_content.trim().is_empty()
    }

    /// Start editing `id`. Unknown ids leave the session untouched.
    pub fn open_note<K: KvStore>(&mut self, repo: &NoteRepository<K>, id: &NoteId) -> bool {
        let Some(note) = repo.find(id) else {
            debug!(%id, "open rejected, no such note");
            return false;
        };
        self.state = SessionState::Editing(Some(note.id.clone()));
        self.draft_title = note.title.clone();
        self.draft_content = note.content.clone();
        true
    }

    pub fn new_draft(&mut self) {
        self.state = SessionState::Editing(None);
        self.draft_title.clear();
        self.draft_content.clear();
    }

    /// Write the trimmed draft to the repository, creating the backing note
    /// on first commit. The draft itself keeps its whitespace, so text
    /// appended after an autosave still joins up.
    pub fn commit<K: KvStore>(&mut self, repo: &mut NoteRepository<K>) -> Result<CommitOutcome> {
        let title = self.draft_title.trim().to_string();
        let content = self.draft_content.trim().to_string();

        match self.current_id().cloned() {
            None => {
                if title.is_empty() && content.is_empty() {
                    return Ok(CommitOutcome::Skipped);
                }
                let note = match repo.create(title, content) {
                    Ok(note) => note,
                    Err(e) => return Err(self.adopt_on_write_failure(repo, e)),
                };
                self.state = SessionState::Editing(Some(note.id.clone()));
                Ok(CommitOutcome::Created(note))
            }
            Some(id) => {
                match repo.update(&id, title, content) {
                    Ok(note) => Ok(CommitOutcome::Updated(note)),
                    Err(NotesError::NotFound(id)) => {
                        warn!(%id, "note being edited no longer exists, commit skipped");
                        Ok(CommitOutcome::Skipped)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    pub fn discard_and_clear(&mut self) {
        self.state = SessionState::Idle;
        self.draft_title.clear();
        self.draft_content.clear();
    }

    /// Delete the backing note and go idle. Returns the deleted id.
    pub fn delete_active<K: KvStore>(
        &mut self,
        repo: &mut NoteRepository<K>,
    ) -> Result<Option<NoteId>> {
        let Some(id) = self.current_id().cloned() else {
            return Ok(None);
        };
        self.discard_and_clear();
        repo.delete(&id)?;
        Ok(Some(id))
    }

    // A failed persist still leaves the created note in memory. Point the
    // session at it so the next commit updates instead of duplicating.
    fn adopt_on_write_failure<K: KvStore>(
        &mut self,
        repo: &NoteRepository<K>,
        err: NotesError,
    ) -> NotesError {
        if let NotesError::StoreWrite(_) = err {
            if let Some(note) = repo.list().last() {
                self.state = SessionState::Editing(Some(note.id.clone()));
            }
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::tests::repo_with_clock;

    #[test]
    fn starts_idle() {
        let session = EditorSession::new();
        assert!(session.is_idle());
        assert_eq!(session.current_id(), None);
        assert_eq!(session.draft_title(), "");
    }

    #[test]
    fn open_loads_a_copy_of_the_note() {
        let (mut repo, _clock) = repo_with_clock();
        let note = repo.create("Title".into(), "Body".into()).unwrap();
        let mut session = EditorSession::new();

        assert!(session.open_note(&repo, &note.id));
        session.set_content("changed");

        assert_eq!(session.current_id(), Some(&note.id));
        assert_eq!(session.draft_title(), "Title");
        assert_eq!(repo.find(&note.id).unwrap().content, "Body");
    }

    #[test]
    fn open_unknown_keeps_prior_state() {
        let (mut repo, _clock) = repo_with_clock();
        let note = repo.create("Title".into(), "Body".into()).unwrap();
        let mut session = EditorSession::new();
        session.open_note(&repo, &note.id);
        session.set_title("draft");

        assert!(!session.open_note(&repo, &NoteId::from("ghost")));
        assert_eq!(session.current_id(), Some(&note.id));
        assert_eq!(session.draft_title(), "draft");
    }

    #[test]
    fn first_commit_creates_then_updates() {
        let (mut repo, _clock) = repo_with_clock();
        let mut session = EditorSession::new();
        session.new_draft();
        session.set_title("  Grocery ");
        session.set_content("milk\n");

        let created = session.commit(&mut repo).unwrap();
        let CommitOutcome::Created(note) = created else {
            panic!("expected create, got {:?}", created);
        };
        assert_eq!(note.title, "Grocery");
        assert_eq!(note.content, "milk");
        assert_eq!(session.current_id(), Some(&note.id));

        session.set_content("milk, eggs");
        assert!(matches!(
            session.commit(&mut repo).unwrap(),
            CommitOutcome::Updated(_)
        ));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0].content, "milk, eggs");
    }

    #[test]
    fn empty_commit_without_backing_note_is_noop() {
        let (mut repo, _clock) = repo_with_clock();
        let mut session = EditorSession::new();
        session.new_draft();
        session.set_title("   ");

        assert_eq!(session.commit(&mut repo).unwrap(), CommitOutcome::Skipped);
        assert_eq!(repo.len(), 0);
        assert_eq!(session.current_id(), None);
    }

    #[test]
    fn empty_commit_with_backing_note_clears_it() {
        let (mut repo, _clock) = repo_with_clock();
        let note = repo.create("Title".into(), "Body".into()).unwrap();
        let mut session = EditorSession::new();
        session.open_note(&repo, &note.id);
        session.set_title("");
        session.set_content(" ");

        assert!(matches!(
            session.commit(&mut repo).unwrap(),
            CommitOutcome::Updated(_)
        ));
        let stored = repo.find(&note.id).unwrap();
        assert_eq!(stored.title, "");
        assert_eq!(stored.content, "");
    }

    #[test]
    fn commit_from_idle_with_text_creates() {
        let (mut repo, _clock) = repo_with_clock();
        let mut session = EditorSession::new();
        session.set_content("typed before pressing new");
        assert!(matches!(
            session.commit(&mut repo).unwrap(),
            CommitOutcome::Created(_)
        ));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn commit_leaves_draft_spacing_alone() {
        let (mut repo, _clock) = repo_with_clock();
        let mut session = EditorSession::new();
        session.new_draft();
        session.append_content("buy milk ");
        session.commit(&mut repo).unwrap();
        session.append_content("and eggs");
        session.commit(&mut repo).unwrap();

        assert_eq!(session.draft_content(), "buy milk and eggs");
        assert_eq!(repo.list()[0].content, "buy milk and eggs");
    }

    #[test]
    fn commit_after_note_vanished_is_skipped() {
        let (mut repo, _clock) = repo_with_clock();
        let note = repo.create("Title".into(), "Body".into()).unwrap();
        let mut session = EditorSession::new();
        session.open_note(&repo, &note.id);
        repo.delete_all().unwrap();

        assert_eq!(session.commit(&mut repo).unwrap(), CommitOutcome::Skipped);
        assert!(repo.is_empty());
    }

    #[test]
    fn discard_has_no_persistence_effect() {
        let (mut repo, _clock) = repo_with_clock();
        let note = repo.create("Title".into(), "Body".into()).unwrap();
        let mut session = EditorSession::new();
        session.open_note(&repo, &note.id);
        session.set_title("unsaved");

        session.discard_and_clear();

        assert!(session.is_idle());
        assert_eq!(session.draft_title(), "");
        assert_eq!(repo.find(&note.id).unwrap().title, "Title");
    }

    #[test]
    fn delete_active_removes_and_idles() {
        let (mut repo, _clock) = repo_with_clock();
        let note = repo.create("Title".into(), "Body".into()).unwrap();
        let mut session = EditorSession::new();
        session.open_note(&repo, &note.id);

        assert_eq!(session.delete_active(&mut repo).unwrap(), Some(note.id));
        assert!(session.is_idle());
        assert!(repo.is_empty());
    }

    #[test]
    fn delete_active_when_idle_is_noop() {
        let (mut repo, _clock) = repo_with_clock();
        repo.create("Title".into(), "Body".into()).unwrap();
        let mut session = EditorSession::new();
        assert_eq!(session.delete_active(&mut repo).unwrap(), None);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn failed_create_does_not_duplicate_on_retry() {
        let (mut repo, _clock) = repo_with_clock();
        let mut session = EditorSession::new();
        session.new_draft();
        session.set_title("Offline");

        repo.store().kv().set_simulate_write_error(true);
        assert!(session.commit(&mut repo).is_err());
        repo.store().kv().set_simulate_write_error(false);
        session.commit(&mut repo).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.store().load().len(), 1);
    }

    #[test]
    fn char_count_counts_chars_not_bytes() {
        let mut session = EditorSession::new();
        session.append_content("héllo");
        assert_eq!(session.char_count(), 5);
    }
}
