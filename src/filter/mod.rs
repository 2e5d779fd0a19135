// src/filter/mod.rs

//! Path filter policies.
//!
//! A [`PathFilter`] decides which entries take part in a snapshot:
//! - `admit_dir` is asked before descending into a directory,
//! - `admit_file` is asked before fingerprinting a file.
//!
//! Policies are pure and total: they look only at the path they are given
//! and never touch the filesystem.
//!
//! - [`Unfiltered`] admits everything.
//! - [`DefaultFilter`] skips VCS/cache directories and throwaway files.
//! - [`LanguageFilter`] narrows another filter to a file-extension allow-list.
//! - [`PatternFilter`] applies root-relative include/exclude globs on top of
//!   another filter.

use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

use crate::config::model::FilterSection;
use crate::errors::Result;
use crate::types::FilterKind;

pub mod defaults;
pub mod language;
pub mod path_utils;
pub mod patterns;

pub use defaults::{DefaultFilter, DEFAULT_IGNORED_DIRS, DEFAULT_IGNORED_FILE_PATTERNS};
pub use language::LanguageFilter;
pub use patterns::PatternFilter;

/// Inclusion policy consulted while walking a tree.
pub trait PathFilter: Send + Sync + Debug {
    /// Whether to descend into the directory at `path`.
    fn admit_dir(&self, path: &Path) -> bool;

    /// Whether the file at `path` takes part in the snapshot.
    fn admit_file(&self, path: &Path) -> bool;
}

/// Admits every directory and file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unfiltered;

impl PathFilter for Unfiltered {
    fn admit_dir(&self, _path: &Path) -> bool {
        true
    }

    fn admit_file(&self, _path: &Path) -> bool {
        true
    }
}

impl<F: PathFilter + ?Sized> PathFilter for Box<F> {
    fn admit_dir(&self, path: &Path) -> bool {
        (**self).admit_dir(path)
    }

    fn admit_file(&self, path: &Path) -> bool {
        (**self).admit_file(path)
    }
}

impl<F: PathFilter + ?Sized> PathFilter for Arc<F> {
    fn admit_dir(&self, path: &Path) -> bool {
        (**self).admit_dir(path)
    }

    fn admit_file(&self, path: &Path) -> bool {
        (**self).admit_file(path)
    }
}

/// Build the effective filter for `root` from a `[filter]` section.
///
/// The base policy comes from `kind`; extra ignored names only apply to the
/// default-based kinds. Include/exclude globs, when present, are layered on
/// top as a [`PatternFilter`].
pub fn from_config(root: &Path, section: &FilterSection) -> Result<Arc<dyn PathFilter>> {
    let base: Box<dyn PathFilter> = match section.kind {
        FilterKind::All => Box::new(Unfiltered),
        FilterKind::Default => Box::new(default_from_section(section)?),
        FilterKind::Python => Box::new(LanguageFilter::python_over(default_from_section(section)?)),
        FilterKind::Rust => Box::new(LanguageFilter::rust_over(default_from_section(section)?)),
        FilterKind::Extensions => Box::new(LanguageFilter::new(
            default_from_section(section)?,
            section.extensions.iter().map(String::as_str),
        )),
    };

    if section.include.is_empty() && section.exclude.is_empty() {
        return Ok(Arc::from(base));
    }

    let layered = PatternFilter::new(root, base, &section.include, &section.exclude)?;
    Ok(Arc::new(layered))
}

fn default_from_section(section: &FilterSection) -> Result<DefaultFilter> {
    if section.ignore_dirs.is_empty() && section.ignore_files.is_empty() {
        return Ok(DefaultFilter::new());
    }
    DefaultFilter::with_extra(&section.ignore_dirs, &section.ignore_files)
}
