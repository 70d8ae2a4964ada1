//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O: the BMI engine, saved records and the capped
//! history list.

pub mod bmi;
mod history;
mod record;

pub use bmi::{compute, Band, BmiResult};
pub use history::{History, DEFAULT_MAX_HISTORY};
pub use record::{HistoryRecord, DATE_FORMAT};
