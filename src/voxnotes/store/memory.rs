use super::KvStore;
use crate::error::{NotesError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value substrate for testing.
///
/// Uses `RefCell` for interior mutability since voxnotes is single-threaded,
/// which lets [`KvStore`] take `&self` everywhere.
#[derive(Default)]
pub struct MemoryKv {
    entries: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NotesError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let kv = MemoryKv::new();
        assert!(kv.is_empty());
        assert!(kv.get("k").unwrap().is_none());
        kv.set("k", "v").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
        assert!(!kv.is_empty());
    }

    #[test]
    fn simulated_write_error_leaves_value() {
        let kv = MemoryKv::new();
        kv.set("k", "old").unwrap();
        kv.set_simulate_write_error(true);
        assert!(kv.set("k", "new").is_err());
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("old"));
    }
}
