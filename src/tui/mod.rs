//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides:
//! - Calculator screen with measurement form and banded result
//! - History screen for reviewing and deleting saved results

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::Theme;
