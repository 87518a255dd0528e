// src/logging.rs

//! Logging setup for `simcli` using `tracing` + `tracing-subscriber`.
//!
//! The level comes from [`Settings`](crate::settings::Settings)
//! (`SIMCLI_LOG`, default `warn`). Logs go to STDERR; the default level is
//! kept quiet so that simulated stderr output is not interleaved with
//! diagnostics during normal runs.

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt;

/// Initialise global logging subscriber.
///
/// Call once at startup; a second call returns an error.
pub fn init_logging(level: tracing::Level) -> Result<()> {
    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}
