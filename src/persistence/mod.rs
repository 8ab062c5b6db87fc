//! Settings store for the best score
//!
//! The game treats the store as an external key-value collaborator holding
//! integers. `MemoryStore` backs tests and headless runs; `JsonFileStore`
//! persists to a small JSON file on native targets.

use std::collections::BTreeMap;

mod file;

pub use file::JsonFileStore;

/// Integer key-value settings store
pub trait ScoreStore {
    /// Stored value, or 0 when the key is absent
    fn get_integer(&self, key: &str) -> i64;
    /// Store a value; assumed durable once this returns
    fn set_integer(&mut self, key: &str, value: i64);
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get_integer(&self, key: &str) -> i64 {
        (**self).get_integer(key)
    }

    fn set_integer(&mut self, key: &str, value: i64) {
        (**self).set_integer(key, value)
    }
}

/// In-memory store that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value (not counted as a write)
    pub fn with_value(key: &str, value: i64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    /// Number of `set_integer` calls so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn get_integer(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_integer(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
    }
}
