// src/exec/emitter.rs

//! Rate-limited line emission.
//!
//! Sleeping once per line is unreliable for small delays: timers have a
//! practical minimum granularity (about 16ms on some platforms), so asking
//! for 3ms per line can cost as much as 16ms per line. For delays below the
//! granularity the emitter writes lines in batches and sleeps one full
//! granularity tick per batch instead.
//!
//! | requested delay `D` | behaviour                                        |
//! |---------------------|--------------------------------------------------|
//! | `0`                 | write every line immediately                     |
//! | `1..=14`            | batches of `16 - D` lines, sleep 16ms per batch  |
//! | `>= 15`             | write each line, then sleep `D` ms               |
//!
//! A trailing partial batch is written without a sleep after it.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::sleep;
use tracing::trace;

/// Minimum reliable sleep, in milliseconds, assumed for pacing.
pub const GRANULARITY_MS: u64 = 16;

/// How lines are spaced out for a given requested delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// No delay at all.
    Immediate,
    /// Write `size` lines, then sleep [`GRANULARITY_MS`].
    Batched { size: usize },
    /// Write one line, then sleep `delay`.
    PerLine { delay: Duration },
}

impl Pacing {
    pub fn for_delay(delay_ms: u64) -> Self {
        if delay_ms == 0 {
            return Pacing::Immediate;
        }

        let size = GRANULARITY_MS.saturating_sub(delay_ms);
        if size > 1 {
            Pacing::Batched {
                size: size as usize,
            }
        } else {
            Pacing::PerLine {
                delay: Duration::from_millis(delay_ms),
            }
        }
    }
}

/// What an emission did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    /// Lines written to the destination.
    pub lines: usize,
    /// Pacing sleeps performed.
    pub sleeps: usize,
}

/// Copies a line-oriented source to a destination at a requested rate.
#[derive(Debug, Clone, Copy)]
pub struct LineRateEmitter {
    pacing: Pacing,
}

impl LineRateEmitter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            pacing: Pacing::for_delay(delay_ms),
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Read `source` to exhaustion, writing every line to `dest` in order.
    ///
    /// Lines end at `\n`; a trailing `\r` is dropped and any other `\r` is
    /// written as a line break. Every written line is terminated with `\n`,
    /// including a final line that had none in the source.
    pub async fn emit<R, W>(&self, mut source: R, dest: &mut W) -> io::Result<EmitStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut stats = EmitStats::default();
        let mut batch: Vec<Vec<u8>> = match self.pacing {
            Pacing::Batched { size } => Vec::with_capacity(size),
            _ => Vec::new(),
        };
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if source.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = normalize_line(&buf);

            match self.pacing {
                Pacing::Immediate => {
                    write_line(dest, &line).await?;
                    stats.lines += 1;
                }
                Pacing::PerLine { delay } => {
                    write_line(dest, &line).await?;
                    dest.flush().await?;
                    stats.lines += 1;

                    sleep(delay).await;
                    stats.sleeps += 1;
                }
                Pacing::Batched { size } => {
                    batch.push(line);
                    if batch.len() == size {
                        stats.lines += write_batch(dest, &mut batch).await?;
                        dest.flush().await?;
                        trace!(size, "batch flushed");

                        sleep(Duration::from_millis(GRANULARITY_MS)).await;
                        stats.sleeps += 1;
                    }
                }
            }
        }

        // Short final batch: written in full, no trailing sleep.
        stats.lines += write_batch(dest, &mut batch).await?;
        dest.flush().await?;

        Ok(stats)
    }
}

fn normalize_line(raw: &[u8]) -> Vec<u8> {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    line.iter()
        .map(|&b| if b == b'\r' { b'\n' } else { b })
        .collect()
}

async fn write_line<W: AsyncWrite + Unpin>(dest: &mut W, line: &[u8]) -> io::Result<()> {
    dest.write_all(line).await?;
    dest.write_all(b"\n").await
}

async fn write_batch<W: AsyncWrite + Unpin>(
    dest: &mut W,
    batch: &mut Vec<Vec<u8>>,
) -> io::Result<usize> {
    let count = batch.len();
    for line in batch.drain(..) {
        write_line(dest, &line).await?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_table() {
        assert_eq!(Pacing::for_delay(0), Pacing::Immediate);
        assert_eq!(Pacing::for_delay(1), Pacing::Batched { size: 15 });
        assert_eq!(Pacing::for_delay(10), Pacing::Batched { size: 6 });
        assert_eq!(Pacing::for_delay(14), Pacing::Batched { size: 2 });
        assert_eq!(
            Pacing::for_delay(15),
            Pacing::PerLine {
                delay: Duration::from_millis(15)
            }
        );
        assert_eq!(
            Pacing::for_delay(16),
            Pacing::PerLine {
                delay: Duration::from_millis(16)
            }
        );
        assert_eq!(
            Pacing::for_delay(250),
            Pacing::PerLine {
                delay: Duration::from_millis(250)
            }
        );
    }

    #[test]
    fn normalizes_line_endings() {
        assert_eq!(normalize_line(b"plain\n"), b"plain");
        assert_eq!(normalize_line(b"dos\r\n"), b"dos");
        assert_eq!(normalize_line(b"no newline"), b"no newline");
        assert_eq!(normalize_line(b"10%\r20%\r30%\n"), b"10%\n20%\n30%");
    }

    #[tokio::test]
    async fn immediate_copies_lines_in_order() {
        let mut out = Vec::new();
        let stats = LineRateEmitter::new(0)
            .emit(&b"a\nb\r\nc"[..], &mut out)
            .await
            .unwrap();

        assert_eq!(out, b"a\nb\nc\n");
        assert_eq!(stats, EmitStats { lines: 3, sleeps: 0 });
    }

    #[tokio::test]
    async fn empty_source_writes_nothing() {
        let mut out = Vec::new();
        let stats = LineRateEmitter::new(5).emit(&b""[..], &mut out).await.unwrap();

        assert!(out.is_empty());
        assert_eq!(stats, EmitStats::default());
    }

    #[tokio::test]
    async fn non_utf8_bytes_pass_through() {
        let mut out = Vec::new();
        LineRateEmitter::new(0)
            .emit(&b"\xff\xfe\n"[..], &mut out)
            .await
            .unwrap();

        assert_eq!(out, b"\xff\xfe\n");
    }
}
