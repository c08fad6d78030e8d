//! # Notebook
//!
//! The single owner of all mutable state: the note repository, the editor
//! session, the autosave schedule, the theme and the dictation status. There
//! are no globals; a presentation layer holds one `Notebook` and drives it
//! through the methods below.
//!
//! ## Change notification
//!
//! Presentation code registers listeners with [`Notebook::subscribe`] and
//! re-renders when told. Every repository mutation emits
//! [`NotebookEvent::NotesChanged`], so the list view can be recomputed with
//! [`Notebook::view`].
//!
//! ## Single-threaded by construction
//!
//! Each method runs to completion before the next is called. An autosave tick
//! and a user action can never interleave mid-mutation, so nothing here needs
//! a lock.

use crate::autosave::AutosaveScheduler;
use crate::clock::Clock;
use crate::error::{NotesError, Result};
use crate::model::{Note, NoteId, RawNote, Theme};
use crate::projector::{self, ListedNote};
use crate::repository::NoteRepository;
use crate::session::{CommitOutcome, EditorSession};
use crate::speech::{CaptureFailure, DictationEvent};
use crate::store::{KvStore, NoteStore};
use crate::transfer;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookEvent {
    NotesChanged,
    SessionChanged,
    DraftChanged,
    ThemeChanged(Theme),
    DictationChanged { listening: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&NotebookEvent)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DictationStatus {
    pub listening: bool,
    /// Set once the capture device reported it does not exist.
    pub disabled: bool,
}

pub struct Notebook<K: KvStore> {
    repo: NoteRepository<K>,
    session: EditorSession,
    autosave: AutosaveScheduler,
    theme: Theme,
    dictation: DictationStatus,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<K: KvStore> Notebook<K> {
    /// Load notes and theme from `store`. The session starts idle.
    pub fn load(store: NoteStore<K>, clock: Box<dyn Clock>, autosave: AutosaveScheduler) -> Self {
        let theme = store.load_theme();
        let repo = NoteRepository::load(store, clock);
        info!(notes = repo.len(), %theme, "notebook loaded");
        Self {
            repo,
            session: EditorSession::new(),
            autosave,
            theme,
            dictation: DictationStatus::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn repository(&self) -> &NoteRepository<K> {
        &self.repo
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn notes(&self) -> &[Note] {
        self.repo.list()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn dictation(&self) -> DictationStatus {
        self.dictation
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.session.current_id().and_then(|id| self.repo.find(id))
    }

    // --- Change notification ---

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&NotebookEvent) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: NotebookEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // --- Views ---

    pub fn view(&self, query: &str) -> Vec<ListedNote> {
        projector::project(self.repo.list(), query)
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.repo.find(id)
    }

    pub fn by_index(&self, index: usize) -> Option<&Note> {
        projector::by_index(self.repo.list(), index)
    }

    // --- Commands ---

    /// Create an empty note right away and open it.
    pub fn create_note(&mut self) -> Result<Note> {
        let note = self.repo.create(String::new(), String::new());
        self.emit(NotebookEvent::NotesChanged);
        let note = note?;
        self.session.open_note(&self.repo, &note.id);
        self.emit(NotebookEvent::SessionChanged);
        Ok(note)
    }

    /// Start a draft with no backing note; nothing is stored until it has text.
    pub fn new_draft(&mut self) {
        self.session.new_draft();
        self.emit(NotebookEvent::SessionChanged);
    }

    pub fn open(&mut self, id: &NoteId) -> bool {
        let opened = self.session.open_note(&self.repo, id);
        if opened {
            self.emit(NotebookEvent::SessionChanged);
        }
        opened
    }

    /// Open the most recently updated note, if any.
    pub fn open_most_recent(&mut self) -> Option<NoteId> {
        let id = self.repo.most_recent()?.id.clone();
        self.open(&id).then_some(id)
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.session.set_title(title);
        self.emit(NotebookEvent::DraftChanged);
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.session.set_content(content);
        self.emit(NotebookEvent::DraftChanged);
    }

    /// Commit the draft (explicit save).
    pub fn save(&mut self) -> Result<CommitOutcome> {
        let was_backed = self.session.current_id().is_some();
        let outcome = self.session.commit(&mut self.repo);

        let touched_repo = match &outcome {
            Ok(CommitOutcome::Skipped) => false,
            Ok(_) => true,
            // A failed persist still changed the in-memory collection.
            Err(NotesError::StoreWrite(_)) => true,
            Err(_) => false,
        };
        if touched_repo {
            self.emit(NotebookEvent::NotesChanged);
        }
        if was_backed != self.session.current_id().is_some() {
            self.emit(NotebookEvent::SessionChanged);
        }
        outcome
    }

    /// Autosave tick: commits only when a tick is due and the draft has text.
    pub fn autosave(&mut self, now_ms: i64) -> Result<Option<CommitOutcome>> {
        if !self.autosave.poll(now_ms) {
            return Ok(None);
        }
        if !self.session.has_unsaved_content() {
            return Ok(None);
        }
        debug!("autosave tick");
        self.save().map(Some)
    }

    pub fn delete_current(&mut self) -> Result<Option<NoteId>> {
        if self.session.current_id().is_none() {
            return Ok(None);
        }
        let deleted = self.session.delete_active(&mut self.repo);
        self.emit(NotebookEvent::NotesChanged);
        self.emit(NotebookEvent::SessionChanged);
        deleted
    }

    /// Delete one note by id. Clears the session when it was the active one.
    pub fn delete(&mut self, id: &NoteId) -> Result<bool> {
        if self.session.current_id() == Some(id) {
            return self.delete_current().map(|d| d.is_some());
        }
        let removed = self.repo.delete(id);
        self.emit(NotebookEvent::NotesChanged);
        removed
    }

    pub fn delete_all(&mut self) -> Result<usize> {
        let removed = self.repo.delete_all();
        self.session.discard_and_clear();
        self.emit(NotebookEvent::NotesChanged);
        self.emit(NotebookEvent::SessionChanged);
        removed
    }

    /// Overwrite a stored note directly, bypassing the session.
    pub fn update(&mut self, id: &NoteId, title: String, content: String) -> Result<Note> {
        let note = self.repo.update(id, title, content)?;
        self.emit(NotebookEvent::NotesChanged);
        Ok(note)
    }

    pub fn import(&mut self, records: Vec<RawNote>) -> Result<usize> {
        let count = self.repo.import(records);
        self.emit(NotebookEvent::NotesChanged);
        count
    }

    /// Parse an import file and merge it. Nothing changes on a format error.
    pub fn import_text(&mut self, text: &str) -> Result<usize> {
        let records = transfer::parse_import(text)?;
        self.import(records)
    }

    pub fn export(&self) -> Result<String> {
        transfer::export_all(self.repo.list())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.emit(NotebookEvent::ThemeChanged(theme));
        self.repo.store().save_theme(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    // --- Dictation ---

    /// Apply one event from the capture device.
    pub fn apply_dictation(&mut self, event: DictationEvent) -> Result<()> {
        match event {
            DictationEvent::Started => {
                if self.dictation.disabled {
                    return Err(NotesError::CaptureUnavailable);
                }
                self.set_listening(true);
            }
            DictationEvent::Fragment(text) => {
                if self.session.is_idle() {
                    self.new_draft();
                }
                self.session.append_content(&text);
                self.emit(NotebookEvent::DraftChanged);
            }
            DictationEvent::Ended => self.set_listening(false),
            DictationEvent::Failed(failure) => {
                self.set_listening(false);
                warn!(?failure, "dictation failed");
                return Err(match failure {
                    CaptureFailure::Unavailable => {
                        self.dictation.disabled = true;
                        NotesError::CaptureUnavailable
                    }
                    CaptureFailure::PermissionDenied(reason) => {
                        NotesError::CapturePermissionDenied(reason)
                    }
                    CaptureFailure::Interrupted(reason) => NotesError::CaptureInterrupted(reason),
                });
            }
        }
        Ok(())
    }

    fn set_listening(&mut self, listening: bool) {
        if self.dictation.listening != listening {
            self.dictation.listening = listening;
            self.emit(NotebookEvent::DictationChanged { listening });
        }
    }
}
