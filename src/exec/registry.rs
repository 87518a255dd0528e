// src/exec/registry.rs

//! The closed set of task types and their config names.

use std::fmt;
use std::str::FromStr;

use crate::config::TaskConfig;
use crate::errors::{Result, SimError};

/// Kind of simulated I/O a task performs.
///
/// Every variant is bound to exactly one handler in
/// [`RealTaskBackend`](crate::exec::RealTaskBackend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Stream `input` to standard output (`sysout`).
    Stdout,
    /// Stream `input` to standard error (`syserr`).
    Stderr,
    /// Copy `input` to `outPath` (`file`).
    FileCopy,
    /// Block forever (`hang`).
    Hang,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Stdout,
        TaskKind::Stderr,
        TaskKind::FileCopy,
        TaskKind::Hang,
    ];

    /// Name used for this kind in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Stdout => "sysout",
            TaskKind::Stderr => "syserr",
            TaskKind::FileCopy => "file",
            TaskKind::Hang => "hang",
        }
    }

    /// Look up the kind named by a task's `type`.
    pub fn resolve(task: &TaskConfig) -> Result<TaskKind> {
        task.kind
            .parse()
            .map_err(|_| SimError::UnknownTaskType {
                task: task.name.clone(),
                kind: task.kind.clone(),
            })
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!("invalid task type: {s} (expected \"sysout\", \"syserr\", \"file\" or \"hang\")")
            })
    }
}
