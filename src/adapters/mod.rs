//! Adapters implementing domain ports.
//!
//! Storage backends for the [`EngineRepository`](crate::ports::EngineRepository)
//! port. Scripted players live in [`crate::opponents`] and match observers in
//! [`crate::pipeline::observers`].

pub mod in_memory_repository;
pub mod msgpack_repository;

pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
