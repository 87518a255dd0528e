// src/engine/executor.rs

//! Runs a resolved command's tasks in order.
//!
//! Nothing in here exits the process: [`run_command`] returns the exit code
//! (or the fatal error) and `main` performs the actual exit.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::{CommandConfig, Config, TaskConfig};
use crate::errors::{Result, SimError};
use crate::exec::{TaskBackend, TaskKind};

/// `repeat` value that makes a task run until the process is killed.
pub const FOREVER: &str = "forever";

/// How many times a task's handler is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Times(u64),
    Forever,
}

impl Repeat {
    /// Interpret a task's `repeat` value.
    ///
    /// - absent or empty: once
    /// - `forever`: unbounded
    /// - an integer: that many times (zero or negative: not at all)
    /// - anything else (including padded numbers such as `" 2 "`): once
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw {
            None | Some("") => return Repeat::Times(1),
            Some(s) => s,
        };

        if raw == FOREVER {
            return Repeat::Forever;
        }

        match raw.parse::<i64>() {
            Ok(n) => Repeat::Times(n.max(0) as u64),
            Err(_) => Repeat::Times(1),
        }
    }
}

/// Run every task of `command` in order and return its exit code.
///
/// The first failure stops the command: an unknown task name, an unknown
/// task type, or a handler error. A task with `repeat: forever` (or of
/// kind `hang`) never completes, so neither does this future.
pub async fn run_command<B: TaskBackend>(
    config: &Config,
    command: &CommandConfig,
    backend: &mut B,
) -> Result<i32> {
    info!(
        command = %command,
        tasks = command.tasks.len(),
        "running command"
    );

    for name in command.tasks.iter() {
        let task = config.task(name).ok_or_else(|| {
            let err = SimError::TaskNotFound {
                command: command.label().to_string(),
                task: name.clone(),
            };
            error!(command = %command, task = %name, "task not found");
            err
        })?;

        run_task(task, backend).await?;
    }

    info!(command = %command, exit_code = command.exit_code, "command finished");
    Ok(command.exit_code)
}

async fn run_task<B: TaskBackend>(task: &TaskConfig, backend: &mut B) -> Result<()> {
    if task.init_delay > 0 {
        debug!(task = %task.name, init_delay_ms = task.init_delay, "initial delay");
        sleep(Duration::from_millis(task.init_delay)).await;
    }

    let kind = TaskKind::resolve(task).inspect_err(|e| {
        error!(task = %task.name, error = %e, "cannot dispatch task");
    })?;

    match Repeat::parse(task.repeat.as_deref()) {
        Repeat::Forever => {
            info!(task = %task.name, kind = %kind, "repeating task forever");
            loop {
                invoke(task, kind, backend).await?;
            }
        }
        Repeat::Times(n) => {
            debug!(task = %task.name, kind = %kind, times = n, "starting task");
            for _ in 0..n {
                invoke(task, kind, backend).await?;
            }
        }
    }

    Ok(())
}

async fn invoke<B: TaskBackend>(task: &TaskConfig, kind: TaskKind, backend: &mut B) -> Result<()> {
    backend.invoke(task, kind).await.map_err(|cause| {
        error!(task = %task.name, kind = %kind, error = %format!("{cause:#}"), "task failed");
        SimError::TaskFailed {
            task: task.name.clone(),
            kind,
            cause,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_parsing() {
        assert_eq!(Repeat::parse(None), Repeat::Times(1));
        assert_eq!(Repeat::parse(Some("")), Repeat::Times(1));
        assert_eq!(Repeat::parse(Some("3")), Repeat::Times(3));
        assert_eq!(Repeat::parse(Some(" 2 ")), Repeat::Times(1));
        assert_eq!(Repeat::parse(Some("+2")), Repeat::Times(2));
        assert_eq!(Repeat::parse(Some("forever")), Repeat::Forever);
        assert_eq!(Repeat::parse(Some("abc")), Repeat::Times(1));
        assert_eq!(Repeat::parse(Some("2.5")), Repeat::Times(1));
        assert_eq!(Repeat::parse(Some("0")), Repeat::Times(0));
        assert_eq!(Repeat::parse(Some("-4")), Repeat::Times(0));
    }

    #[test]
    fn forever_is_case_sensitive() {
        assert_eq!(Repeat::parse(Some("Forever")), Repeat::Times(1));
    }
}
