//! MessagePack implementation of the engine repository.
//!
//! This adapter implements the EngineRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, persistence::SavedEngine, ports::EngineRepository};

/// MessagePack-based engine repository.
///
/// # Examples
///
/// ```no_run
/// use roshambo::adapters::MsgPackRepository;
/// use roshambo::persistence::SavedEngine;
/// use roshambo::ports::EngineRepository;
/// use roshambo::{EngineConfig, PredictionEngine, Scoreboard};
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let engine = PredictionEngine::new(EngineConfig::default())?;
/// let saved = SavedEngine::new(engine, Scoreboard::default());
///
/// repo.save(&saved, Path::new("engine.msgpack"))?;
/// let loaded = repo.load(Path::new("engine.msgpack"))?;
/// # Ok::<(), roshambo::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl EngineRepository for MsgPackRepository {
    fn save(&self, saved: &SavedEngine, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, saved).map_err(|e| Error::SerializationContext {
            operation: "serialize engine to MessagePack".to_string(),
            message: e.to_string(),
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;

        log::info!(
            "saved engine ({} moves observed) to {}",
            saved.engine.total_moves(),
            path.display()
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedEngine> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedEngine = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize engine from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;
        saved.validate()?;

        log::info!(
            "loaded engine ({} moves observed) from {}",
            saved.engine.total_moves(),
            path.display()
        );
        Ok(saved)
    }
}
