//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters: scripted
//! players, match observers and engine storage backends.

pub mod observer;
pub mod player;
pub mod repository;

pub use observer::Observer;
pub use player::Player;
pub use repository::EngineRepository;
