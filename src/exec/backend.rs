// src/exec/backend.rs

//! Pluggable task backend abstraction.
//!
//! The executor talks to a `TaskBackend` instead of calling handlers
//! directly, so tests can swap in a backend that records invocations
//! without touching files or the real stdio streams.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use anyhow::Result;
use tokio::io::{AsyncWrite, Stderr, Stdout};

use crate::config::TaskConfig;
use crate::exec::handlers;
use crate::exec::registry::TaskKind;

/// Performs one invocation of a task whose kind is already resolved.
pub trait TaskBackend: Send {
    fn invoke<'a>(
        &'a mut self,
        task: &'a TaskConfig,
        kind: TaskKind,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Production backend: real files, and the given stdout/stderr sinks.
pub struct RealTaskBackend<O, E> {
    base_path: PathBuf,
    stdout: O,
    stderr: E,
}

impl RealTaskBackend<Stdout, Stderr> {
    /// Backend writing to the process's own standard streams.
    pub fn stdio(base_path: impl Into<PathBuf>) -> Self {
        Self::new(base_path, tokio::io::stdout(), tokio::io::stderr())
    }
}

impl<O, E> RealTaskBackend<O, E> {
    pub fn new(base_path: impl Into<PathBuf>, stdout: O, stderr: E) -> Self {
        Self {
            base_path: base_path.into(),
            stdout,
            stderr,
        }
    }

    /// Give back the stdout and stderr sinks.
    pub fn into_sinks(self) -> (O, E) {
        (self.stdout, self.stderr)
    }
}

impl<O, E> fmt::Debug for RealTaskBackend<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealTaskBackend")
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

impl<O, E> TaskBackend for RealTaskBackend<O, E>
where
    O: AsyncWrite + Unpin + Send,
    E: AsyncWrite + Unpin + Send,
{
    fn invoke<'a>(
        &'a mut self,
        task: &'a TaskConfig,
        kind: TaskKind,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            match kind {
                TaskKind::Stdout => {
                    handlers::stream_file(&self.base_path, task, &mut self.stdout).await?;
                }
                TaskKind::Stderr => {
                    handlers::stream_file(&self.base_path, task, &mut self.stderr).await?;
                }
                TaskKind::FileCopy => {
                    handlers::copy_file(&self.base_path, task).await?;
                }
                TaskKind::Hang => handlers::hang().await?,
            }
            Ok(())
        })
    }
}
