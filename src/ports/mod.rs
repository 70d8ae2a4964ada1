//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the stores history is persisted in.

mod store;

pub use store::{KeyValueStore, StoreScope};
