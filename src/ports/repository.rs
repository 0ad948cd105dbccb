//! Repository port for engine persistence.

use std::path::Path;

use crate::{Result, persistence::SavedEngine};

/// Port for persisting and loading saved engines.
///
/// This trait abstracts the storage mechanism so the game host can keep an
/// engine between sessions without depending on a particular format.
///
/// # Examples
///
/// ```no_run
/// use roshambo::ports::EngineRepository;
/// use roshambo::persistence::SavedEngine;
/// use std::path::Path;
///
/// fn save_engine<R: EngineRepository>(
///     repo: &R,
///     saved: &SavedEngine,
///     path: &Path,
/// ) -> roshambo::Result<()> {
///     repo.save(saved, path)
/// }
/// ```
pub trait EngineRepository {
    /// Save an engine to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, saved: &SavedEngine, path: &Path) -> Result<()>;

    /// Load an engine from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The location does not exist or cannot be read
    /// - The data is corrupted or cannot be deserialized
    /// - The save format version is not supported
    fn load(&self, path: &Path) -> Result<SavedEngine>;
}
