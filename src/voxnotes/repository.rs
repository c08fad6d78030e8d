//! In-memory note collection, persisted in full after every mutation.
//!
//! The repository is the only owner of note data. Callers get copies or
//! shared borrows, never a way to mutate notes behind its back.
//!
//! A failed persist does not roll back the in-memory change: the collection
//! stays usable for the rest of the session and the `StoreWrite` error is
//! handed to the caller to report.

use crate::clock::Clock;
use crate::error::{NotesError, Result};
use crate::model::{Note, NoteId, RawNote};
use crate::store::{KvStore, NoteStore};
use std::collections::HashSet;
use tracing::{debug, warn};

pub struct NoteRepository<K: KvStore> {
    notes: Vec<Note>,
    store: NoteStore<K>,
    clock: Box<dyn Clock>,
}

impl<K: KvStore> NoteRepository<K> {
    /// Load the collection from `store`. Duplicate ids in the stored blob are
    /// re-keyed so ids stay unique.
    pub fn load(store: NoteStore<K>, clock: Box<dyn Clock>) -> Self {
        let mut notes = store.load();
        let mut seen = HashSet::new();
        for note in notes.iter_mut() {
            if !seen.insert(note.id.clone()) {
                let fresh = fresh_id(&seen);
                warn!(duplicate = %note.id, replacement = %fresh, "duplicate note id in store");
                seen.insert(fresh.clone());
                note.id = fresh;
            }
        }
        Self {
            notes,
            store,
            clock,
        }
    }

    pub fn store(&self) -> &NoteStore<K> {
        &self.store
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn create(&mut self, title: String, content: String) -> Result<Note> {
        let mut note = Note::new(title, content, self.now());
        while self.find(&note.id).is_some() {
            note.id = NoteId::generate();
        }
        self.notes.push(note.clone());
        debug!(id = %note.id, "note created");
        self.persist()?;
        Ok(note)
    }

    pub fn update(&mut self, id: &NoteId, title: String, content: String) -> Result<Note> {
        let now = self.now();
        let note = self
            .notes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| NotesError::NotFound(id.clone()))?;

        note.title = title;
        note.content = content;
        note.updated = now.max(note.updated);
        let updated = note.clone();
        debug!(id = %updated.id, "note updated");
        self.persist()?;
        Ok(updated)
    }

    /// Remove the note with `id`. Returns whether anything was removed; an
    /// absent id is not an error.
    pub fn delete(&mut self, id: &NoteId) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| &n.id != id);
        let removed = self.notes.len() != before;
        debug!(%id, removed, "note delete");
        self.persist()?;
        Ok(removed)
    }

    pub fn delete_all(&mut self) -> Result<usize> {
        let removed = self.notes.len();
        self.notes.clear();
        debug!(removed, "all notes deleted");
        self.persist()?;
        Ok(removed)
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The note with the highest `updated`; the earliest in collection order
    /// wins a tie.
    pub fn most_recent(&self) -> Option<&Note> {
        self.notes
            .iter()
            .reduce(|best, n| if n.updated > best.updated { n } else { best })
    }

    /// Append every incoming record. Records without an id, or whose id is
    /// already taken, get a fresh one. Persists once.
    pub fn import(&mut self, records: Vec<RawNote>) -> Result<usize> {
        let now = self.now();
        let mut taken: HashSet<NoteId> = self.notes.iter().map(|n| n.id.clone()).collect();
        let count = records.len();

        for raw in records {
            let id = match raw.id.filter(|id| !id.is_empty()).map(NoteId::from) {
                Some(id) if !taken.contains(&id) => id,
                Some(id) => {
                    let fresh = fresh_id(&taken);
                    debug!(conflict = %id, replacement = %fresh, "imported id already in use");
                    fresh
                }
                None => fresh_id(&taken),
            };
            taken.insert(id.clone());
            self.notes.push(Note {
                id,
                title: raw.title.unwrap_or_default(),
                content: raw.content.unwrap_or_default(),
                updated: raw.updated.unwrap_or(now),
            });
        }

        debug!(count, "notes imported");
        self.persist()?;
        Ok(count)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.notes).inspect_err(|e| {
            warn!(error = %e, "persisting notes failed");
        })
    }
}

fn fresh_id(taken: &HashSet<NoteId>) -> NoteId {
    loop {
        let id = NoteId::generate();
        if !taken.contains(&id) {
            return id;
        }
    }
}
