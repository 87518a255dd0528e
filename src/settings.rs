// src/settings.rs

//! Runtime settings resolved from the environment.
//!
//! The simulated program owns the whole argument vector, so nothing about
//! simcli itself can be configured through flags. Instead:
//!
//! - `SIMCLI_CONFIG`: path to the config file (default `simcli.yaml`)
//! - `SIMCLI_LOG`: log level (default `warn`)
//!
//! Relative task inputs are resolved against the directory holding the
//! config file.

use std::path::{Path, PathBuf};

pub const CONFIG_ENV_KEY: &str = "SIMCLI_CONFIG";
pub const LOG_ENV_KEY: &str = "SIMCLI_LOG";
pub const DEFAULT_CONFIG_FILE: &str = "simcli.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub base_path: PathBuf,
    pub log_level: tracing::Level,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings using `lookup` in place of `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config_path = lookup(CONFIG_ENV_KEY)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let log_level = lookup(LOG_ENV_KEY)
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::WARN);

        let base_path = config_root_dir(&config_path);

        Self {
            config_path,
            base_path,
            log_level,
        }
    }
}

/// Directory that relative task inputs are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "sims/git.yaml"),
///   we use that directory.
/// - If it's just a bare filename like "simcli.yaml" (parent = ""),
///   we fall back to the current working directory.
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
