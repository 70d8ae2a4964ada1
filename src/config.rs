//! Runtime configuration read from the environment.
//!
//! | Variable               | Default        |
//! |------------------------|----------------|
//! | `BMITRACK_DB_PATH`     | `bmitrack.db`  |
//! | `BMITRACK_HISTORY_MAX` | `15`           |
//! | `BMITRACK_LOG_MODE`    | `auto`         |
//! | `BMITRACK_LOG_FILE`    | `bmitrack.log` |

use std::path::PathBuf;

use crate::domain::DEFAULT_MAX_HISTORY;

const DB_PATH_ENV: &str = "BMITRACK_DB_PATH";
const HISTORY_MAX_ENV: &str = "BMITRACK_HISTORY_MAX";
const LOG_MODE_ENV: &str = "BMITRACK_LOG_MODE";
const LOG_FILE_ENV: &str = "BMITRACK_LOG_FILE";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stdout,
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise.
    Auto,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file backing the local store
    pub db_path: PathBuf,
    /// Maximum number of saved records
    pub history_max: usize,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("bmitrack.db"),
            history_max: DEFAULT_MAX_HISTORY,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("bmitrack.log"),
        }
    }
}

impl Config {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            db_path: lookup(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            history_max: parse_history_max(lookup(HISTORY_MAX_ENV).as_deref()),
            log_mode: lookup(LOG_MODE_ENV).map_or(defaults.log_mode, |v| LogMode::parse(&v)),
            log_file: lookup(LOG_FILE_ENV).map_or(defaults.log_file, PathBuf::from),
        }
    }
}

/// Positive integers are accepted; anything else falls back to the default.
fn parse_history_max(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_MAX_HISTORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.db_path, PathBuf::from("bmitrack.db"));
        assert_eq!(config.history_max, 15);
        assert_eq!(config.log_mode, LogMode::Auto);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("BMITRACK_DB_PATH", "/tmp/bmi.db"),
            ("BMITRACK_HISTORY_MAX", "30"),
            ("BMITRACK_LOG_MODE", "STDOUT"),
            ("BMITRACK_LOG_FILE", "/tmp/bmi.log"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|name| env.get(name).map(|v| (*v).to_string()));
        assert_eq!(config.db_path, PathBuf::from("/tmp/bmi.db"));
        assert_eq!(config.history_max, 30);
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/bmi.log"));
    }

    #[test]
    fn test_invalid_history_max_falls_back() {
        assert_eq!(parse_history_max(Some("0")), 15);
        assert_eq!(parse_history_max(Some("-3")), 15);
        assert_eq!(parse_history_max(Some("many")), 15);
        assert_eq!(parse_history_max(Some(" 7 ")), 7);
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
