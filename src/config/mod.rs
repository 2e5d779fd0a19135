// src/config/mod.rs

//! Configuration loading and validation for pollwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate timing and filter settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_raw_config, DEFAULT_CONFIG_FILE};
pub use model::{ConfigFile, FilterSection, RawConfigFile, WatchSection};
pub use validate::validate_raw_config;
