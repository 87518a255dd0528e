// src/exec/mod.rs

//! Task execution layer.
//!
//! - [`registry`] names the closed set of task kinds.
//! - [`handlers`] implements each kind: stream to stdout/stderr, copy a
//!   file, hang.
//! - [`emitter`] paces streamed lines (the batching logic lives here).
//! - [`backend`] is the seam the engine calls through; production uses
//!   [`RealTaskBackend`].

pub mod backend;
pub mod emitter;
pub mod handlers;
pub mod registry;

pub use backend::{RealTaskBackend, TaskBackend};
pub use emitter::{EmitStats, LineRateEmitter, Pacing, GRANULARITY_MS};
pub use registry::TaskKind;
