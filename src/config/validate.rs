// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{Config, RawConfig};
use crate::errors::{Result, SimError};

/// Highest mode value accepted for `perms` (setuid/setgid/sticky + rwx).
const MAX_MODE: u32 = 0o7777;

impl TryFrom<RawConfig> for Config {
    type Error = crate::errors::SimError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(Config::new_unchecked(
            raw.tasks,
            raw.commands,
            raw.default_command,
        ))
    }
}

/// Structural checks only.
///
/// Task references inside commands and task types are deliberately left
/// alone: both are resolved when the command actually runs, and an
/// unresolved reference is reported then.
fn validate_raw_config(cfg: &RawConfig) -> Result<()> {
    validate_task_names(cfg)?;
    validate_command_keys(cfg)?;
    validate_permissions(cfg)?;
    Ok(())
}

fn validate_task_names(cfg: &RawConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for task in cfg.tasks.iter() {
        if task.name.trim().is_empty() {
            return Err(SimError::ConfigError(
                "every task needs a non-empty `name`".to_string(),
            ));
        }
        if !seen.insert(task.name.as_str()) {
            return Err(SimError::ConfigError(format!(
                "duplicate task name '{}'",
                task.name
            )));
        }
    }
    Ok(())
}

fn validate_command_keys(cfg: &RawConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for cmd in cfg.commands.iter() {
        if !seen.insert(cmd.args.as_str()) {
            return Err(SimError::ConfigError(format!(
                "duplicate command args '{}'",
                cmd.args
            )));
        }
    }
    Ok(())
}

fn validate_permissions(cfg: &RawConfig) -> Result<()> {
    for task in cfg.tasks.iter() {
        if task.permissions > MAX_MODE {
            return Err(SimError::ConfigError(format!(
                "task '{}' has perms {} ({:#o}) outside 0..=0o7777; plain integers are raw mode bits, write octal as 0755 or \"0755\"",
                task.name, task.permissions, task.permissions
            )));
        }
    }
    Ok(())
}
