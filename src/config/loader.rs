// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{Config, RawConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawConfig`.
///
/// Files ending in `.toml` are parsed as TOML, everything else as YAML.
/// This only performs deserialization; use [`load_and_validate`] to get a
/// checked [`Config`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config: RawConfig = if is_toml {
        toml::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads YAML (or TOML).
/// - Applies defaults (handled by `serde` attributes).
/// - Checks for duplicate task names, duplicate command keys and
///   out-of-range permission bits.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config> {
    let raw_config = load_from_path(&path)?;
    let config = Config::try_from(raw_config)?;
    Ok(config)
}
