// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which built-in filter policy to start from.
///
/// - `All`: every file and directory participates.
/// - `Default`: skip VCS/cache directories and throwaway files (default).
/// - `Python` / `Rust`: `Default`, narrowed to that language's sources.
/// - `Extensions`: `Default`, narrowed to `[filter].extensions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    All,
    Default,
    Python,
    Rust,
    Extensions,
}

impl Default for FilterKind {
    fn default() -> Self {
        FilterKind::Default
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterKind::All),
            "default" => Ok(FilterKind::Default),
            "python" => Ok(FilterKind::Python),
            "rust" => Ok(FilterKind::Rust),
            "extensions" => Ok(FilterKind::Extensions),
            other => Err(format!(
                "invalid filter kind: {other} (expected \"all\", \"default\", \"python\", \"rust\" or \"extensions\")"
            )),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterKind::All => "all",
            FilterKind::Default => "default",
            FilterKind::Python => "python",
            FilterKind::Rust => "rust",
            FilterKind::Extensions => "extensions",
        };
        f.write_str(s)
    }
}

/// How a file's state is summarised in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintMode {
    /// Modification time and size only.
    Metadata,
    /// Metadata plus a blake3 digest of the content. Touching a file without
    /// changing its bytes is not reported as a modification.
    Content,
}

impl Default for FingerprintMode {
    fn default() -> Self {
        FingerprintMode::Metadata
    }
}

impl FromStr for FingerprintMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metadata" => Ok(FingerprintMode::Metadata),
            "content" => Ok(FingerprintMode::Content),
            other => Err(format!(
                "invalid fingerprint mode: {other} (expected \"metadata\" or \"content\")"
            )),
        }
    }
}
