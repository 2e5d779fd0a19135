// src/config/model.rs

use serde::Deserialize;

use crate::engine::{WatchOptions, DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_SLEEP_MS};
use crate::types::{FilterKind, FingerprintMode};

/// Raw configuration as read from a TOML file, before validation.
///
/// ```toml
/// [watch]
/// debounce_ms = 400
/// min_sleep_ms = 50
/// fingerprint = "metadata"
///
/// [filter]
/// kind = "default"
/// exclude = ["target"]
/// ```
///
/// All sections are optional and have reasonable defaults. Convert into a
/// [`ConfigFile`] with `ConfigFile::try_from(raw)` to validate it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub filter: FilterSection,
}

/// `[watch]` section: loop timing and fingerprinting.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Coalescing window in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum pause between polls in milliseconds.
    #[serde(default = "default_min_sleep_ms")]
    pub min_sleep_ms: u64,

    #[serde(default)]
    pub fingerprint: FingerprintMode,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_min_sleep_ms() -> u64 {
    DEFAULT_MIN_SLEEP_MS
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_sleep_ms: default_min_sleep_ms(),
            fingerprint: FingerprintMode::default(),
        }
    }
}

/// `[filter]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSection {
    #[serde(default)]
    pub kind: FilterKind,

    /// Allowed extensions when `kind = "extensions"`.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Extra directory names to skip (default-based kinds only).
    #[serde(default)]
    pub ignore_dirs: Vec<String>,

    /// Extra file-name regexes to skip (default-based kinds only).
    #[serde(default)]
    pub ignore_files: Vec<String>,

    /// Root-relative globs a file must match, if any are given.
    #[serde(default)]
    pub include: Vec<String>,

    /// Root-relative globs for files and directories to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    watch: WatchSection,
    filter: FilterSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(watch: WatchSection, filter: FilterSection) -> Self {
        Self { watch, filter }
    }

    pub fn watch(&self) -> &WatchSection {
        &self.watch
    }

    pub fn filter(&self) -> &FilterSection {
        &self.filter
    }

    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions::from_millis(self.watch.debounce_ms, self.watch.min_sleep_ms)
    }
}
