// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::exec::TaskKind;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("command not found for `{0}` and no default command specified")]
    NoMatchingCommand(String),

    #[error("task '{task}' referenced by command '{command}' not found")]
    TaskNotFound { command: String, task: String },

    #[error("task '{task}' has unknown type '{kind}'")]
    UnknownTaskType { task: String, kind: String },

    #[error("task '{task}' ({kind}) failed: {cause:#}")]
    TaskFailed {
        task: String,
        kind: TaskKind,
        cause: anyhow::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
