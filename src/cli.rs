// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RawConfigFile;
use crate::types::{FilterKind, FingerprintMode};

/// Command-line arguments for `pollwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pollwatch",
    version,
    about = "Watch a directory tree by polling and print debounced batches of changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to watch.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Path to a config file (TOML).
    ///
    /// Default: `Pollwatch.toml` in the watched directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Filter policy (all, default, python, rust, extensions).
    #[arg(long, value_name = "KIND")]
    pub filter: Option<FilterKind>,

    /// Only watch files with this extension (repeatable). Implies
    /// `--filter extensions`.
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Coalescing window in milliseconds.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Minimum pause between polls in milliseconds.
    #[arg(long, value_name = "MS")]
    pub min_sleep_ms: Option<u64>,

    /// Compare file contents (blake3) instead of only mtime and size.
    #[arg(long)]
    pub content_hash: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `POLLWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the effective configuration and initial file count, then exit.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Apply flag values on top of file/default configuration.
    pub fn apply_overrides(&self, raw: &mut RawConfigFile) {
        if let Some(kind) = self.filter {
            raw.filter.kind = kind;
        }
        if !self.extensions.is_empty() {
            raw.filter.extensions = self.extensions.clone();
            if self.filter.is_none() {
                raw.filter.kind = FilterKind::Extensions;
            }
        }
        if let Some(ms) = self.debounce_ms {
            raw.watch.debounce_ms = ms;
        }
        if let Some(ms) = self.min_sleep_ms {
            raw.watch.min_sleep_ms = ms;
        }
        if self.content_hash {
            raw.watch.fingerprint = FingerprintMode::Content;
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
