use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use simcli::config::TaskConfig;
use simcli::exec::{TaskBackend, TaskKind};

/// One recorded handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub task: String,
    pub kind: TaskKind,
    pub at: tokio::time::Instant,
}

/// A fake backend that:
/// - records every invocation (task name, kind, tokio clock time)
/// - sleeps a short, fixed time per invocation so `timeout` can bound
///   `repeat: forever` tasks
/// - fails for task names registered with [`RecordingBackend::failing`].
pub struct RecordingBackend {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    failing: HashSet<String>,
    step: Duration,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            invocations: Arc::new(Mutex::new(Vec::new())),
            failing: HashSet::new(),
            step: Duration::from_millis(1),
        }
    }

    /// Make every invocation of `task` return an error.
    pub fn failing(mut self, task: &str) -> Self {
        self.failing.insert(task.to_string());
        self
    }

    /// Shared handle to the log, usable after the backend has been moved.
    pub fn log(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.invocations)
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Task names in invocation order.
    pub fn task_names(&self) -> Vec<String> {
        self.invocations().into_iter().map(|i| i.task).collect()
    }

    pub fn count(&self, task: &str) -> usize {
        self.invocations().iter().filter(|i| i.task == task).count()
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBackend for RecordingBackend {
    fn invoke<'a>(
        &'a mut self,
        task: &'a TaskConfig,
        kind: TaskKind,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            {
                let mut guard = self.invocations.lock().unwrap();
                guard.push(Invocation {
                    task: task.name.clone(),
                    kind,
                    at: tokio::time::Instant::now(),
                });
            }

            tokio::time::sleep(self.step).await;

            if self.failing.contains(&task.name) {
                return Err(anyhow!("simulated failure in '{}'", task.name));
            }
            Ok(())
        })
    }
}
