//! Durable key-value persistence for engine state.
//!
//! The engine serializes its full state into a single slot under a fixed
//! key on every mutating call and reads it back on construction. Storage
//! failures are reported through `StorageError` but the engine treats the
//! in-memory state as authoritative and only logs them.

use catalog::{ItemId, RatingEntry, ViewEvent};
use profile::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Fixed identifier of the engine's state slot.
pub const STATE_KEY: &str = "watchwise.state.v1";

/// Errors that can occur while loading or saving persisted state.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A durable string-keyed slot store.
///
/// Implementations only need get/set semantics; the engine owns the
/// serialization format.
pub trait StateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The serialized shape of the engine's state slot.
///
/// Every field defaults to empty so older or partial payloads still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub history: Vec<ViewEvent>,
    #[serde(default)]
    pub ratings: HashMap<ItemId, RatingEntry>,
    #[serde(default)]
    pub watched: HashSet<ItemId>,
    #[serde(default)]
    pub preferences: PreferenceStore,
    #[serde(default)]
    pub saved_at: i64,
}

/// In-memory store, used in tests and as a null persistence layer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store keeping one JSON file per key inside a directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
