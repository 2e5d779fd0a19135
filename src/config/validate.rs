// src/config/validate.rs

use regex::RegexSet;

use crate::config::model::{ConfigFile, FilterSection, RawConfigFile, WatchSection};
use crate::errors::{PollwatchError, Result};
use crate::filter::patterns::build_globset;
use crate::types::FilterKind;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PollwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.watch, raw.filter))
    }
}

pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_watch_section(&cfg.watch)?;
    validate_filter_section(&cfg.filter)?;
    Ok(())
}

fn validate_watch_section(watch: &WatchSection) -> Result<()> {
    if watch.debounce_ms == 0 {
        return Err(PollwatchError::ConfigError(
            "[watch].debounce_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    if watch.min_sleep_ms == 0 {
        return Err(PollwatchError::ConfigError(
            "[watch].min_sleep_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_filter_section(filter: &FilterSection) -> Result<()> {
    if filter.kind == FilterKind::Extensions && filter.extensions.is_empty() {
        return Err(PollwatchError::ConfigError(
            "[filter].extensions must list at least one extension when kind = \"extensions\""
                .to_string(),
        ));
    }

    if filter.kind != FilterKind::Extensions && !filter.extensions.is_empty() {
        return Err(PollwatchError::ConfigError(format!(
            "[filter].extensions is only used when kind = \"extensions\" (got kind = \"{}\")",
            filter.kind
        )));
    }

    if let Some(ext) = filter
        .extensions
        .iter()
        .find(|e| e.trim().trim_start_matches('.').is_empty())
    {
        return Err(PollwatchError::ConfigError(format!(
            "[filter].extensions contains an empty extension: {ext:?}"
        )));
    }

    if !filter.ignore_files.is_empty() {
        RegexSet::new(&filter.ignore_files).map_err(|e| {
            PollwatchError::ConfigError(format!("invalid [filter].ignore_files pattern: {e}"))
        })?;
    }

    build_globset(&filter.include)?;
    build_globset(&filter.exclude)?;

    Ok(())
}
