//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Every client
//! goes through it, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: turns user selectors into note ids
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O and no formatting. Business rules live in `commands/*.rs`.
//!
//! ## Selectors
//!
//! A user names a note in one of two ways:
//!
//! - a positive integer: the display index from `list` (unfiltered, newest
//!   first), e.g. `1`
//! - anything else: a note id or a unique id prefix, e.g. `3f2a`
//!
//! A prefix that matches more than one note is rejected rather than guessed.
//!
//! ## Generic Over KvStore
//!
//! `NotesApi<K: KvStore>` runs on `FileKv` in production and on `MemoryKv` in
//! tests, so the facade is tested without touching the filesystem.

use crate::clock::Clock;
use crate::commands;
use crate::error::{NotesError, Result};
use crate::model::NoteId;
use crate::notebook::Notebook;
use crate::speech::{Narrator, Synthesizer, TranscriptSource};
use crate::store::KvStore;
use std::path::{Path, PathBuf};

pub struct NotesApi<K: KvStore> {
    notebook: Notebook<K>,
    config_dir: PathBuf,
}

impl<K: KvStore> NotesApi<K> {
    pub fn new(notebook: Notebook<K>, config_dir: PathBuf) -> Self {
        Self {
            notebook,
            config_dir,
        }
    }

    pub fn notebook(&self) -> &Notebook<K> {
        &self.notebook
    }

    pub fn notebook_mut(&mut self) -> &mut Notebook<K> {
        &mut self.notebook
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn create_note(&mut self, title: String, content: String) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.notebook, title, content)
    }

    pub fn list_notes(&self, query: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.notebook, query)
    }

    pub fn view_notes<I: AsRef<str>>(&self, selectors: &[I]) -> Result<commands::CmdResult> {
        let ids = self.resolve_all(selectors)?;
        commands::view::run(&self.notebook, &ids)
    }

    pub fn edit_note(
        &mut self,
        selector: &str,
        title: String,
        content: String,
    ) -> Result<commands::CmdResult> {
        let id = self.resolve(selector)?;
        commands::edit::run(&mut self.notebook, &id, title, content)
    }

    pub fn delete_notes<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let ids = self.resolve_all(selectors)?;
        commands::delete::run(&mut self.notebook, &ids)
    }

    pub fn clear(&mut self) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.notebook)
    }

    pub fn export_notes(&self) -> Result<commands::CmdResult> {
        commands::export::run(&self.notebook)
    }

    pub fn import_notes(&mut self, text: &str) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.notebook, text)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn theme(&mut self, action: ThemeAction) -> Result<commands::CmdResult> {
        commands::theme::run(&mut self.notebook, action)
    }

    pub fn dictate<S: TranscriptSource>(
        &mut self,
        source: &mut S,
        clock: &dyn Clock,
        selector: Option<&str>,
        lang: &str,
    ) -> Result<commands::CmdResult> {
        let target = selector.map(|s| self.resolve(s)).transpose()?;
        commands::dictate::run(&mut self.notebook, source, clock, target.as_ref(), lang)
    }

    pub fn speak<S: Synthesizer>(
        &self,
        narrator: &mut Narrator<S>,
        selector: &str,
        voice: Option<&str>,
        rate: f32,
    ) -> Result<commands::CmdResult> {
        let id = self.resolve(selector)?;
        let note = self
            .notebook
            .find(&id)
            .ok_or_else(|| NotesError::NotFound(id.clone()))?;
        commands::speak::run(narrator, note, voice, rate)
    }

    pub fn voices<S: Synthesizer>(&self, narrator: &mut Narrator<S>) -> Result<commands::CmdResult> {
        commands::speak::voices(narrator)
    }

    /// Turn a selector into the id of an existing note.
    pub fn resolve(&self, selector: &str) -> Result<NoteId> {
        resolve_selector(&self.notebook, selector.trim())
    }

    fn resolve_all<I: AsRef<str>>(&self, selectors: &[I]) -> Result<Vec<NoteId>> {
        selectors.iter().map(|s| self.resolve(s.as_ref())).collect()
    }
}

/// Precedence: a display index in range, then an exact id, then a unique id
/// prefix. A number past the end of the list only matches an exact id, so
/// imported numeric ids stay reachable without digits matching id prefixes.
fn resolve_selector<K: KvStore>(nb: &Notebook<K>, selector: &str) -> Result<NoteId> {
    let index = selector.parse::<usize>().ok();
    if let Some(note) = index.and_then(|i| nb.by_index(i)) {
        return Ok(note.id.clone());
    }

    if let Some(note) = nb.notes().iter().find(|n| n.id.as_str() == selector) {
        return Ok(note.id.clone());
    }
    if index.is_some() {
        return Err(NotesError::NotFound(NoteId::from(selector)));
    }

    let mut matches = nb
        .notes()
        .iter()
        .filter(|n| !selector.is_empty() && n.id.as_str().starts_with(selector));
    match (matches.next(), matches.next()) {
        (Some(note), None) => Ok(note.id.clone()),
        (Some(_), Some(_)) => Err(NotesError::Api(format!(
            "'{}' matches more than one note; use more characters",
            selector
        ))),
        (None, _) => Err(NotesError::NotFound(NoteId::from(selector))),
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::theme::ThemeAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawNote;
    use crate::notebook::tests::notebook;
    use crate::store::memory::MemoryKv;

    fn api() -> NotesApi<MemoryKv> {
        let (nb, _clock) = notebook();
        NotesApi::new(nb, PathBuf::from("/nonexistent"))
    }

    fn seeded() -> NotesApi<MemoryKv> {
        let mut api = api();
        api.notebook_mut()
            .import(vec![
                RawNote {
                    id: Some("abc123".into()),
                    updated: Some(10),
                    ..RawNote::new("Old", "")
                },
                RawNote {
                    id: Some("abd999".into()),
                    updated: Some(20),
                    ..RawNote::new("New", "")
                },
            ])
            .unwrap();
        api
    }

    #[test]
    fn index_selects_from_sorted_list() {
        let api = seeded();
        assert_eq!(api.resolve("1").unwrap(), NoteId::from("abd999"));
        assert_eq!(api.resolve("2").unwrap(), NoteId::from("abc123"));
    }

    #[test]
    fn out_of_range_index_is_not_found() {
        let api = seeded();
        assert!(matches!(api.resolve("3"), Err(NotesError::NotFound(_))));
        assert!(matches!(api.resolve("0"), Err(NotesError::NotFound(_))));
    }

    #[test]
    fn numeric_id_selects_when_index_is_out_of_range() {
        let mut api = seeded();
        api.notebook_mut()
            .import(vec![RawNote {
                id: Some("42".into()),
                updated: Some(5),
                ..RawNote::new("Numbered", "")
            }])
            .unwrap();
        assert_eq!(api.resolve("42").unwrap(), NoteId::from("42"));
        assert_eq!(api.resolve("3").unwrap(), NoteId::from("42"));
        assert!(matches!(api.resolve("4"), Err(NotesError::NotFound(_))));
    }

    #[test]
    fn unique_prefix_selects() {
        let api = seeded();
        assert_eq!(api.resolve("abc").unwrap(), NoteId::from("abc123"));
        assert_eq!(api.resolve("abd999").unwrap(), NoteId::from("abd999"));
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let api = seeded();
        assert!(matches!(api.resolve("ab"), Err(NotesError::Api(_))));
    }

    #[test]
    fn unknown_prefix_is_not_found() {
        let api = seeded();
        assert!(matches!(api.resolve("zz"), Err(NotesError::NotFound(_))));
    }

    #[test]
    fn view_dispatches_with_resolved_ids() {
        let api = seeded();
        let result = api.view_notes(&["2", "abd"]).unwrap();
        let titles: Vec<_> = result
            .listed_notes
            .iter()
            .map(|l| l.note.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Old", "New"]);
    }

    #[test]
    fn edit_dispatches_by_index() {
        let mut api = seeded();
        api.edit_note("1", "Renamed".into(), "".into()).unwrap();
        assert!(api
            .notebook()
            .notes()
            .iter()
            .any(|n| n.id.as_str() == "abd999" && n.title == "Renamed"));
    }

    #[test]
    fn delete_dispatches() {
        let mut api = seeded();
        api.delete_notes(&["abc"]).unwrap();
        assert_eq!(api.notebook().notes().len(), 1);
    }
}
