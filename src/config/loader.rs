// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// File looked up in the watched root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "Pollwatch.toml";

/// Load a configuration file and return the unvalidated [`RawConfigFile`].
///
/// This only performs TOML deserialization; callers may still adjust the raw
/// values (e.g. CLI overrides) before validating.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw = load_from_path(path)?;
    ConfigFile::try_from(raw)
}

/// Where to look for a config file for `root` when none was given explicitly.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_CONFIG_FILE)
}

/// Resolve the raw config for a watch of `root`.
///
/// - An explicit path must exist.
/// - Otherwise `<root>/Pollwatch.toml` is used if present.
/// - Otherwise built-in defaults apply.
pub fn resolve_raw_config(root: &Path, explicit: Option<&Path>) -> Result<RawConfigFile> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    let candidate = default_config_path(root);
    if candidate.is_file() {
        return load_from_path(candidate);
    }
    Ok(RawConfigFile::default())
}
