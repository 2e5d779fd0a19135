// src/filter/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::{PollwatchError, Result};
use crate::filter::path_utils::relative_str;
use crate::filter::{PathFilter, Unfiltered};

/// Include/exclude globs evaluated against paths relative to a root.
///
/// Mirrors a `[filter]` section like:
///
/// ```toml
/// [filter]
/// include = ["src/**/*.rs", "Cargo.toml"]
/// exclude = ["**/generated/**", "target"]
/// ```
///
/// - A file must match `include` (when non-empty) and must not match
///   `exclude`.
/// - A directory is not descended into when its own relative path matches
///   `exclude` (use `"target"` or `"**/target"`, not `"target/**"`).
/// - The inner filter is consulted first in both cases.
#[derive(Clone)]
pub struct PatternFilter<F = Unfiltered> {
    root: PathBuf,
    inner: F,
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl<F> fmt::Debug for PatternFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternFilter")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<F: PathFilter> PatternFilter<F> {
    pub fn new(
        root: impl Into<PathBuf>,
        inner: F,
        include: &[String],
        exclude: &[String],
    ) -> Result<Self> {
        let root = root.into();
        // Watchers canonicalize their root; do the same so prefixes line up.
        let root = root.canonicalize().unwrap_or(root);

        let include = if include.is_empty() {
            None
        } else {
            Some(build_globset(include)?)
        };
        let exclude = if exclude.is_empty() {
            None
        } else {
            Some(build_globset(exclude)?)
        };

        Ok(Self {
            root,
            inner,
            include,
            exclude,
        })
    }

    fn is_excluded(&self, rel: &str) -> bool {
        self.exclude.as_ref().is_some_and(|set| set.is_match(rel))
    }

    fn is_included(&self, rel: &str) -> bool {
        self.include.as_ref().is_none_or(|set| set.is_match(rel))
    }
}

impl<F: PathFilter> PathFilter for PatternFilter<F> {
    fn admit_dir(&self, path: &Path) -> bool {
        if !self.inner.admit_dir(path) {
            return false;
        }
        match relative_str(&self.root, path) {
            Some(rel) => !self.is_excluded(&rel),
            None => true,
        }
    }

    fn admit_file(&self, path: &Path) -> bool {
        if !self.inner.admit_file(path) {
            return false;
        }
        match relative_str(&self.root, path) {
            Some(rel) => self.is_included(&rel) && !self.is_excluded(&rel),
            None => self.include.is_none(),
        }
    }
}

/// Build a GlobSet from simple string patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).map_err(|e| {
            PollwatchError::ConfigError(format!("invalid glob pattern {pat:?}: {e}"))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| PollwatchError::ConfigError(format!("building glob set: {e}")))
}
