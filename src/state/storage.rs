//! Local persistent slot.
//!
//! The host supplies a [`KeyValueStore`] (browser `localStorage` behind a
//! bridge, or [`MemoryStore`] in tests). [`TeamStore`] keeps one team under
//! one key and never lets a storage problem escape: reads fall back to an
//! empty team and writes are best-effort.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use super::roster::Roster;
use super::selection::TeamSelection;
use super::stored::StoredState;

/// Storage backend errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage error: {0}")]
    Backend(String),
}

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Best-effort persistence of the user's own team under a single key.
#[derive(Debug)]
pub struct TeamStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TeamStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Access the underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Read the raw stored state.
    ///
    /// `Ok(None)` when nothing has been saved yet.
    pub fn read(&self) -> Result<Option<StoredState>, StorageError> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        StoredState::from_json(&json)
            .map(Some)
            .map_err(|e| StorageError::Backend(format!("corrupt team JSON: {}", e)))
    }

    /// Load the saved team, or an empty one if nothing usable is stored.
    pub fn load(&self, roster: &Roster) -> TeamSelection {
        match self.read() {
            Ok(Some(stored)) => TeamSelection::from_stored(&stored, roster),
            Ok(None) => {
                debug!(key = %self.key, "no saved team");
                TeamSelection::new()
            }
            Err(e) => {
                warn!(key = %self.key, "failed to load saved team: {}", e);
                TeamSelection::new()
            }
        }
    }

    /// Write the team. Failures are logged and reported, never fatal.
    pub fn save(&mut self, team: &TeamSelection) -> Result<(), StorageError> {
        let result = team
            .to_stored()
            .to_json()
            .map_err(|e| StorageError::Backend(e.to_string()))
            .and_then(|json| self.store.set(&self.key, &json));

        if let Err(e) = &result {
            warn!(key = %self.key, "failed to save team: {}", e);
        }
        result
    }
}
