//! # bmitrack
//!
//! Terminal BMI calculator with a capped, migratable result history.
//!
//! This crate provides:
//! - BMI computation and four-band classification
//! - A most-recent-first history persisted as JSON in a key-value store,
//!   with one-time migration of the legacy indexed format
//! - Terminal UI for entering measurements and managing saved results
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (Band, BmiResult, HistoryRecord, History)
//! - `ports`: Key-value store trait
//! - `adapters`: Concrete stores (in-memory, SQLite) and the wire codec
//! - `application`: History service and calculator session
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::Config;
pub use domain::{compute, Band, BmiResult, HistoryRecord};

/// Result type for bmitrack operations
pub type Result<T> = std::result::Result<T, BmiError>;

/// Main error type for bmitrack
#[derive(Debug, thiserror::Error)]
pub enum BmiError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(String),
}
