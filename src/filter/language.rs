// src/filter/language.rs

use std::path::Path;

use crate::filter::{DefaultFilter, PathFilter};

/// Narrows an inner filter to files with one of the given extensions.
///
/// Directory decisions are delegated to the inner filter unchanged, so a
/// language filter over [`DefaultFilter`] still skips `.git`,
/// `node_modules` and friends.
#[derive(Debug, Clone)]
pub struct LanguageFilter<F = DefaultFilter> {
    inner: F,
    /// Lower-cased, without the leading dot.
    extensions: Vec<String>,
}

impl<F: PathFilter> LanguageFilter<F> {
    /// `extensions` may be given with or without a leading dot.
    pub fn new<'a>(inner: F, extensions: impl IntoIterator<Item = &'a str>) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { inner, extensions }
    }

    pub fn python_over(inner: F) -> Self {
        Self::new(inner, ["py", "pyx", "pyd"])
    }

    pub fn rust_over(inner: F) -> Self {
        Self::new(inner, ["rs"])
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }
}

impl LanguageFilter<DefaultFilter> {
    /// Python sources (`.py`, `.pyx`, `.pyd`) with default exclusions.
    pub fn python() -> Self {
        Self::python_over(DefaultFilter::new())
    }

    /// Rust sources (`.rs`) with default exclusions.
    pub fn rust() -> Self {
        Self::rust_over(DefaultFilter::new())
    }
}

impl<F: PathFilter> PathFilter for LanguageFilter<F> {
    fn admit_dir(&self, path: &Path) -> bool {
        self.inner.admit_dir(path)
    }

    fn admit_file(&self, path: &Path) -> bool {
        self.has_allowed_extension(path) && self.inner.admit_file(path)
    }
}
