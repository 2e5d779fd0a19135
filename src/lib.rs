// src/lib.rs

pub mod changes;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod fs;
pub mod logging;
pub mod snapshot;
pub mod types;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

pub use crate::changes::{Change, ChangeKind, ChangeSet};
pub use crate::engine::{awatch, watch, AsyncWatch, CancelToken, Watch, WatchOptions};
pub use crate::errors::PollwatchError;
pub use crate::filter::{DefaultFilter, LanguageFilter, PathFilter, PatternFilter, Unfiltered};
pub use crate::watch::{ChangeDetector, SnapshotWatcherFactory, Watcher, WatcherFactory};

use crate::cli::CliArgs;
use crate::config::{resolve_raw_config, ConfigFile};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (file, then CLI overrides, then validation)
/// - the filter policy and snapshot watcher
/// - the async debounce loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let root = args.path.clone();

    let mut raw = resolve_raw_config(&root, args.config.as_deref())?;
    args.apply_overrides(&mut raw);
    let cfg = ConfigFile::try_from(raw)?;

    let filter = filter::from_config(&root, cfg.filter())?;
    let factory = SnapshotWatcherFactory::new(cfg.watch().fingerprint);

    if args.dry_run {
        print_dry_run(&root, &cfg, filter, &factory)?;
        return Ok(());
    }

    let cancel = CancelToken::new();

    // Ctrl-C → cooperative cancellation.
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            cancel.cancel();
        });
    }

    let options = cfg.watch_options();
    let mut stream = awatch(&root, filter, &options, &factory, cancel)?;
    info!(root = ?root, ?options, "watching for changes");

    while let Some(batch) = stream.next().await {
        let batch = batch?;
        for change in batch {
            println!("{change}");
        }
    }

    info!("watch finished");
    Ok(())
}

/// Dry-run output: effective settings plus the size of the initial snapshot.
fn print_dry_run(
    root: &Path,
    cfg: &ConfigFile,
    filter: Arc<dyn PathFilter>,
    factory: &SnapshotWatcherFactory,
) -> Result<()> {
    let watcher = factory.create(root, filter)?;

    println!("pollwatch dry-run");
    println!("  root = {}", watcher.root().display());
    println!("  watch.debounce_ms = {}", cfg.watch().debounce_ms);
    println!("  watch.min_sleep_ms = {}", cfg.watch().min_sleep_ms);
    println!("  watch.fingerprint = {:?}", cfg.watch().fingerprint);
    println!("  filter.kind = {}", cfg.filter().kind);
    if !cfg.filter().extensions.is_empty() {
        println!("  filter.extensions = {:?}", cfg.filter().extensions);
    }
    if !cfg.filter().include.is_empty() {
        println!("  filter.include = {:?}", cfg.filter().include);
    }
    if !cfg.filter().exclude.is_empty() {
        println!("  filter.exclude = {:?}", cfg.filter().exclude);
    }
    println!("  files = {}", watcher.snapshot().len());

    debug!("dry-run complete (no polling)");
    Ok(())
}
