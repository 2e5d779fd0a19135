#![allow(dead_code)]

use std::fs;
use std::path::Path;

use pollwatch::config::RawConfigFile;
use pollwatch::types::{FilterKind, FingerprintMode};

/// Create files (and their parent directories) under `root`.
///
/// Entries are `(relative_path, content)` pairs.
pub fn write_tree(root: &Path, entries: &[(&str, &str)]) -> std::io::Result<()> {
    for (rel, content) in entries {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
    }
    Ok(())
}

/// A small project tree with a source file, bytecode, a nested dir and a
/// `.git` directory.
pub fn sample_tree(root: &Path) -> std::io::Result<()> {
    write_tree(
        root,
        &[
            ("foo/bar.txt", "bar"),
            ("foo/spam.py", "whatever"),
            ("foo/spam.pyc", "splosh"),
            ("foo/recursive_dir/a.js", "boom"),
            ("foo/.git/x", "y"),
        ],
    )
}

/// Builder for `RawConfigFile` to simplify test setup.
pub struct RawConfigBuilder {
    config: RawConfigFile,
}

impl RawConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.watch.debounce_ms = ms;
        self
    }

    pub fn min_sleep_ms(mut self, ms: u64) -> Self {
        self.config.watch.min_sleep_ms = ms;
        self
    }

    pub fn fingerprint(mut self, mode: FingerprintMode) -> Self {
        self.config.watch.fingerprint = mode;
        self
    }

    pub fn filter_kind(mut self, kind: FilterKind) -> Self {
        self.config.filter.kind = kind;
        self
    }

    pub fn extension(mut self, ext: &str) -> Self {
        self.config.filter.extensions.push(ext.to_string());
        self
    }

    pub fn ignore_dir(mut self, name: &str) -> Self {
        self.config.filter.ignore_dirs.push(name.to_string());
        self
    }

    pub fn ignore_file(mut self, pattern: &str) -> Self {
        self.config.filter.ignore_files.push(pattern.to_string());
        self
    }

    pub fn include(mut self, pattern: &str) -> Self {
        self.config.filter.include.push(pattern.to_string());
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.filter.exclude.push(pattern.to_string());
        self
    }

    pub fn build(self) -> RawConfigFile {
        self.config
    }
}

impl Default for RawConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
