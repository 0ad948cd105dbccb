//! In-memory engine repository for testing.
//!
//! This adapter provides a pure in-memory implementation of EngineRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, persistence::SavedEngine, ports::EngineRepository};

/// In-memory repository for testing.
///
/// Stores MessagePack-encoded engines in a shared HashMap keyed by path.
/// All clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use roshambo::adapters::InMemoryRepository;
/// use roshambo::persistence::SavedEngine;
/// use roshambo::ports::EngineRepository;
/// use roshambo::{EngineConfig, PredictionEngine, Scoreboard};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let engine = PredictionEngine::new(EngineConfig::default().with_seed(1))?;
/// let saved = SavedEngine::new(engine, Scoreboard::default());
///
/// repo.save(&saved, Path::new("session"))?;
/// let loaded = repo.load(Path::new("session"))?;
/// assert_eq!(loaded, saved);
/// # Ok::<(), roshambo::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // entries are replaced whole, so a poisoned map is still consistent
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the number of engines currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored engines.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if an engine exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(path.to_string_lossy().as_ref())
    }
}

impl EngineRepository for InMemoryRepository {
    fn save(&self, saved: &SavedEngine, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(saved).map_err(|e| Error::SerializationContext {
            operation: "serialize engine for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedEngine> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage();

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load engine from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        let saved: SavedEngine =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize engine from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        saved.validate()?;
        Ok(saved)
    }
}
