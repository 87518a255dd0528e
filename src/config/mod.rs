// src/config/mod.rs

//! Configuration loading and validation for simcli.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate structural invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{CommandConfig, Config, MatchMode, RawConfig, TaskConfig};
