// src/engine/mod.rs

//! Simulation engine.
//!
//! - [`matcher`] picks the command for an invocation.
//! - [`executor`] runs that command's tasks and yields its exit code.

pub mod executor;
pub mod matcher;

pub use executor::{run_command, Repeat, FOREVER};
pub use matcher::{resolve, select, Match, MatchKind};
