//! # Storage Layer
//!
//! Notes are persisted as **one blob**: the whole collection serialized as a
//! JSON array under a single key. The theme preference lives under a second,
//! separate key.
//!
//! ## Two levels
//!
//! - [`KvStore`]: the raw key-value substrate (the "how"). It knows nothing
//!   about notes.
//!   - [`fs::FileKv`]: production, one file per key in the data directory
//!   - [`memory::MemoryKv`]: tests, with write-failure simulation
//! - [`NoteStore`]: the durable store adapter (the "what"). Loads and saves the
//!   collection, and recovers from a corrupt blob by starting empty.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── voice_notes_app_v1   # JSON array of {id, title, content, updated}
//! ├── vn_theme             # "dark" or "light"
//! └── config.json          # NotesConfig
//! ```

use crate::error::{NotesError, Result};
use crate::model::{Note, Theme};
use tracing::{debug, warn};

pub mod fs;
pub mod memory;

pub const DEFAULT_NOTES_KEY: &str = "voice_notes_app_v1";
pub const DEFAULT_THEME_KEY: &str = "vn_theme";

/// Keys are plain names: non-empty, not hidden, `[A-Za-z0-9._-]` only.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Abstract key-value persistence substrate.
pub trait KvStore {
    /// Read the value under `key`. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Durable store adapter for the note collection.
pub struct NoteStore<K: KvStore> {
    kv: K,
    notes_key: String,
    theme_key: String,
}

impl<K: KvStore> NoteStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            notes_key: DEFAULT_NOTES_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }

    pub fn with_keys(mut self, notes_key: &str, theme_key: &str) -> Self {
        self.notes_key = notes_key.to_string();
        self.theme_key = theme_key.to_string();
        self
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Load the full collection. Never fails: an absent, unreadable or
    /// unparsable blob yields an empty collection.
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.kv.get(&self.notes_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.notes_key, error = %e, "could not read notes, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<Note>>>(&raw) {
            Ok(notes) => {
                let notes = notes.unwrap_or_default();
                debug!(count = notes.len(), "loaded notes");
                notes
            }
            Err(e) => {
                warn!(key = %self.notes_key, error = %e, "stored notes are corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize and overwrite the whole collection.
    pub fn save(&self, notes: &[Note]) -> Result<()> {
        let payload = serde_json::to_string(notes).map_err(NotesError::Serialization)?;
        self.kv
            .set(&self.notes_key, &payload)
            .map_err(|e| NotesError::StoreWrite(e.to_string()))?;
        debug!(count = notes.len(), "saved notes");
        Ok(())
    }

    pub fn load_theme(&self) -> Theme {
        match self.kv.get(&self.theme_key) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "could not read theme preference");
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.kv
            .set(&self.theme_key, theme.as_str())
            .map_err(|e| NotesError::StoreWrite(e.to_string()))
    }
}
