// src/filter/defaults.rs

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::RegexSet;

use crate::errors::{PollwatchError, Result};
use crate::filter::path_utils::file_name_str;
use crate::filter::PathFilter;

/// Directory names never descended into by [`DefaultFilter`].
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "__pycache__",
    "site-packages",
    ".idea",
    "node_modules",
    ".tox",
    ".venv",
    ".mypy_cache",
    ".pytest_cache",
    ".hypothesis",
];

/// File-name regexes for throwaway files skipped by [`DefaultFilter`]:
/// bytecode, JetBrains safe-write temporaries, vim swap files, editor
/// backups, emacs lock/autosave files, OS metadata and office lock files.
pub const DEFAULT_IGNORED_FILE_PATTERNS: &[&str] = &[
    r"\.py[cod]$",
    r"\.___jb_...___$",
    r"\.sw.$",
    r"~$",
    r"^\.#",
    r"^#.*#$",
    r"^flycheck_",
    r"^\.DS_Store$",
    r"^Thumbs\.db$",
    r"^desktop\.ini$",
    r"^\.~lock\..*#$",
];

static DEFAULT_FILE_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(DEFAULT_IGNORED_FILE_PATTERNS).expect("built-in ignore patterns are valid")
});

/// Skips version-control and cache directories plus common throwaway files.
///
/// Matching is done on the entry's final path component only.
#[derive(Clone)]
pub struct DefaultFilter {
    ignored_dirs: HashSet<String>,
    ignored_files: RegexSet,
}

impl fmt::Debug for DefaultFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultFilter")
            .field("ignored_dirs", &self.ignored_dirs.len())
            .field("ignored_files", &self.ignored_files.len())
            .finish()
    }
}

impl Default for DefaultFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultFilter {
    pub fn new() -> Self {
        Self {
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            ignored_files: DEFAULT_FILE_SET.clone(),
        }
    }

    /// Default lists extended with extra directory names and file-name
    /// regexes (from `[filter].ignore_dirs` / `[filter].ignore_files`).
    pub fn with_extra(extra_dirs: &[String], extra_file_patterns: &[String]) -> Result<Self> {
        let mut ignored_dirs: HashSet<String> =
            DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect();
        ignored_dirs.extend(extra_dirs.iter().cloned());

        let patterns = DEFAULT_IGNORED_FILE_PATTERNS
            .iter()
            .map(|s| s.to_string())
            .chain(extra_file_patterns.iter().cloned());
        let ignored_files = RegexSet::new(patterns).map_err(|e| {
            PollwatchError::ConfigError(format!("invalid ignore_files pattern: {e}"))
        })?;

        Ok(Self {
            ignored_dirs,
            ignored_files,
        })
    }

    pub fn is_ignored_dir_name(&self, name: &str) -> bool {
        self.ignored_dirs.contains(name)
    }

    pub fn is_ignored_file_name(&self, name: &str) -> bool {
        self.ignored_files.is_match(name)
    }
}

impl PathFilter for DefaultFilter {
    fn admit_dir(&self, path: &Path) -> bool {
        match file_name_str(path) {
            Some(name) => !self.is_ignored_dir_name(&name),
            None => true,
        }
    }

    fn admit_file(&self, path: &Path) -> bool {
        match file_name_str(path) {
            Some(name) => !self.is_ignored_file_name(&name),
            None => true,
        }
    }
}
