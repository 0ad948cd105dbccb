//! Dependency injection container.

use std::{path::Path, sync::Arc};

use crate::{
    Result,
    adapters::MsgPackRepository,
    engine::{EngineConfig, PredictionEngine},
    persistence::SavedEngine,
    ports::EngineRepository,
    session::GameSession,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ```no_run
/// use roshambo::app::App;
/// use roshambo::{EngineConfig, Move};
/// use std::path::Path;
///
/// let app = App::new();
/// let mut session = app.create_session(EngineConfig::default())?;
/// session.play_round(Move::Rock);
/// app.save_session(&session, Path::new("session.msgpack"))?;
/// # Ok::<(), roshambo::Error>(())
/// ```
pub struct App {
    /// Repository for saved engines
    engine_repository: Arc<dyn EngineRepository + Send + Sync>,
    /// Seed used when a config has none (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults: MessagePack files and no
    /// default seed.
    pub fn new() -> Self {
        Self {
            engine_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn engine_repository(&self) -> Arc<dyn EngineRepository + Send + Sync> {
        Arc::clone(&self.engine_repository)
    }

    /// Create an engine, falling back to the app's default seed.
    pub fn create_engine(&self, mut config: EngineConfig) -> Result<PredictionEngine> {
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        PredictionEngine::new(config)
    }

    pub fn create_session(&self, config: EngineConfig) -> Result<GameSession> {
        Ok(GameSession::from_engine(self.create_engine(config)?))
    }

    /// Persist the session's engine and scoreboard.
    pub fn save_session(&self, session: &GameSession, path: &Path) -> Result<()> {
        self.save(&SavedEngine::from_session(session), path)
    }

    pub fn save(&self, saved: &SavedEngine, path: &Path) -> Result<()> {
        self.engine_repository.save(saved, path)
    }

    /// Load a saved engine without resuming it.
    pub fn load(&self, path: &Path) -> Result<SavedEngine> {
        self.engine_repository.load(path)
    }

    /// Resume a saved session. The restored engine keeps its own seed and
    /// random stream position; the app default does not apply.
    pub fn load_session(&self, path: &Path) -> Result<GameSession> {
        self.load(path)?.into_session()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`App`] with custom dependencies.
#[derive(Default)]
pub struct AppBuilder {
    engine_repository: Option<Arc<dyn EngineRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom engine repository.
    pub fn with_repository<R>(mut self, repository: R) -> Self
    where
        R: EngineRepository + Send + Sync + 'static,
    {
        self.engine_repository = Some(Arc::new(repository));
        self
    }

    /// Seed every engine whose config does not set one.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Without a repository, `MsgPackRepository` is used.
    pub fn build(self) -> App {
        App {
            engine_repository: self
                .engine_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryRepository, types::Move};

    #[test]
    fn test_app_applies_default_seed() {
        let app = App::for_testing().with_default_seed(42).build();
        let engine = app.create_engine(EngineConfig::default()).unwrap();
        assert_eq!(engine.seed(), 42);
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(42).build();
        let engine = app
            .create_engine(EngineConfig::default().with_seed(123))
            .unwrap();
        assert_eq!(engine.seed(), 123);
    }

    #[test]
    fn test_session_roundtrip_through_repository() {
        let repo = InMemoryRepository::new();
        let app = App::for_testing()
            .with_repository(repo.clone())
            .with_default_seed(5)
            .build();

        let mut session = app.create_session(EngineConfig::default()).unwrap();
        for mv in [Move::Rock, Move::Rock, Move::Paper] {
            session.play_round(mv);
        }
        app.save_session(&session, Path::new("game")).unwrap();
        assert_eq!(repo.count(), 1);

        let restored = app.load_session(Path::new("game")).unwrap();
        assert_eq!(restored.engine(), session.engine());
        assert_eq!(restored.scoreboard(), session.scoreboard());
    }
}
