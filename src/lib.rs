// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod settings;

use tracing::{debug, info};

use crate::config::load_and_validate;
use crate::engine::{run_command, select};
use crate::errors::Result;
use crate::exec::RealTaskBackend;
use crate::settings::Settings;

/// High-level entry point used by `main.rs`.
///
/// Loads the config named by `settings`, picks the command for
/// `invocation`, runs it against the real stdio streams and returns the
/// exit code the process should terminate with.
pub async fn run(settings: &Settings, invocation: &str) -> Result<i32> {
    let cfg = load_and_validate(&settings.config_path)?;
    debug!(
        config = ?settings.config_path,
        base_path = ?settings.base_path,
        commands = cfg.commands().len(),
        "config loaded"
    );

    let matched = select(&cfg, invocation)?;
    info!(
        invocation,
        command = %matched.command,
        matched_by = ?matched.kind,
        "command selected"
    );

    let mut backend = RealTaskBackend::stdio(&settings.base_path);
    run_command(&cfg, matched.command, &mut backend).await
}
