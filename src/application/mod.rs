//! Application layer: Use cases and services.
//!
//! Orchestrates the BMI engine and history persistence behind the
//! key-value store port.

mod calculator;
mod history;

pub use calculator::Calculator;
pub use history::{HistoryService, HISTORY_STORAGE_KEY};
