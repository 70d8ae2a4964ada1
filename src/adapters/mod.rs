//! Adapters layer: Concrete implementations of ports.
//!
//! - `memory`: session-scoped in-memory store
//! - `sqlite`: local-scoped SQLite store
//! - `codec`: JSON wire format for saved history

pub mod codec;
pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StorageError};
