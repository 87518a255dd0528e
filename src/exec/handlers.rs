// src/exec/handlers.rs

//! One function per task kind.
//!
//! Every handler opens its own files and drops them before returning, on
//! success and on error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::config::TaskConfig;
use crate::exec::emitter::{EmitStats, LineRateEmitter};

/// Mode applied to copied files when the task has no `perms`.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

const HANG_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24);

/// Resolve a task `input` against the base path unless it is absolute.
pub fn resolve_input(base_path: &Path, input: &str) -> PathBuf {
    let path = Path::new(input);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_path.join(path)
    }
}

fn input_path(base_path: &Path, task: &TaskConfig) -> Result<PathBuf> {
    if task.input.is_empty() {
        return Err(anyhow!("task '{}' has no `input`", task.name));
    }
    Ok(resolve_input(base_path, &task.input))
}

/// Stream the task's input file to `dest` through a [`LineRateEmitter`].
pub async fn stream_file<W>(base_path: &Path, task: &TaskConfig, dest: &mut W) -> Result<EmitStats>
where
    W: AsyncWrite + Unpin,
{
    let path = input_path(base_path, task)?;
    let file = File::open(&path)
        .await
        .with_context(|| format!("opening input {:?}", path))?;

    let emitter = LineRateEmitter::new(task.delay);
    let stats = emitter
        .emit(BufReader::new(file), dest)
        .await
        .with_context(|| format!("streaming {:?}", path))?;

    debug!(
        task = %task.name,
        lines = stats.lines,
        sleeps = stats.sleeps,
        pacing = ?emitter.pacing(),
        "stream finished"
    );

    Ok(stats)
}

/// Copy the task's input to `outPath`, then apply its permission bits.
///
/// The destination is created or truncated. Returns the number of bytes
/// copied.
pub async fn copy_file(base_path: &Path, task: &TaskConfig) -> Result<u64> {
    let src = input_path(base_path, task)?;
    let dst = task
        .out_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("task '{}' has no `outPath`", task.name))?;

    let mut input = File::open(&src)
        .await
        .with_context(|| format!("opening input {:?}", src))?;
    let mut output = File::create(&dst)
        .await
        .with_context(|| format!("creating output {:?}", dst))?;

    let bytes = tokio::io::copy(&mut input, &mut output)
        .await
        .with_context(|| format!("copying {:?} to {:?}", src, dst))?;
    output
        .flush()
        .await
        .with_context(|| format!("writing output {:?}", dst))?;

    let mode = if task.permissions != 0 {
        task.permissions
    } else {
        DEFAULT_FILE_MODE
    };
    set_mode(&output, mode)
        .await
        .with_context(|| format!("setting mode {:o} on {:?}", mode, dst))?;

    debug!(task = %task.name, bytes, mode = %format!("{:o}", mode), "file copied");

    Ok(bytes)
}

#[cfg(unix)]
async fn set_mode(file: &File, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(std::fs::Permissions::from_mode(mode)).await
}

#[cfg(not(unix))]
async fn set_mode(_file: &File, mode: u32) -> std::io::Result<()> {
    debug!(mode = %format!("{:o}", mode), "mode bits ignored on this platform");
    Ok(())
}

/// Block forever, like a process that never terminates.
pub async fn hang() -> Result<()> {
    loop {
        tokio::time::sleep(HANG_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_inputs_ignore_base_path() {
        let abs = std::env::temp_dir().join("simcli-input.txt");
        let resolved = resolve_input(Path::new("base"), abs.to_str().unwrap());
        assert_eq!(resolved, abs);
    }

    #[test]
    fn relative_inputs_join_base_path() {
        let resolved = resolve_input(Path::new("base"), "data/hello.txt");
        assert_eq!(resolved, Path::new("base").join("data/hello.txt"));
    }
}
